//! Graphics state abstraction and scoped state handling

use std::ops::{Deref, DerefMut};

use super::texture::TextureHandle;
use crate::foundation::math::{self, Mat4, Vec3};

/// Low-level graphics state used while drawing parts
///
/// A stack discipline: every `push_state` is matched by a `pop_state`.
/// Use [`StateGuard`] rather than calling the pair directly.
pub trait GraphicsState {
    /// Save the current transform
    fn push_state(&mut self);

    /// Restore the most recently saved transform
    fn pop_state(&mut self);

    /// Post-multiply the current transform by a translation
    fn translate(&mut self, offset: Vec3);

    /// Post-multiply the current transform by a scale
    fn scale(&mut self, factors: Vec3);

    /// Post-multiply the current transform by an arbitrary matrix
    fn transform(&mut self, matrix: &Mat4);

    /// Bind a texture for subsequent draws
    fn bind_texture(&mut self, texture: TextureHandle);
}

/// Saved graphics state that is restored when dropped
///
/// Restoration happens on every exit path, including early returns through
/// `?` and unwinding out of a panicking hook or model.
pub struct StateGuard<'a> {
    gfx: &'a mut dyn GraphicsState,
}

impl<'a> StateGuard<'a> {
    /// Push the state and return a guard that pops it
    pub fn push(gfx: &'a mut dyn GraphicsState) -> Self {
        gfx.push_state();
        Self { gfx }
    }
}

impl<'a> Deref for StateGuard<'a> {
    type Target = dyn GraphicsState + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.gfx
    }
}

impl<'a> DerefMut for StateGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.gfx
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        self.gfx.pop_state();
    }
}

/// CPU-side transform stack implementing [`GraphicsState`]
///
/// Useful for headless rendering, tools and tests. The root transform can
/// never be popped.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Mat4>,
    bound_texture: Option<TextureHandle>,
}

impl MatrixStack {
    /// Stack holding only the identity transform
    pub fn new() -> Self {
        Self {
            stack: vec![Mat4::identity()],
            bound_texture: None,
        }
    }

    /// Current transform
    pub fn current(&self) -> &Mat4 {
        // The root entry is never popped
        &self.stack[self.stack.len() - 1]
    }

    /// Number of saved states above the root
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Last texture bound
    pub fn bound_texture(&self) -> Option<TextureHandle> {
        self.bound_texture
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsState for MatrixStack {
    fn push_state(&mut self) {
        let top = *self.current();
        self.stack.push(top);
    }

    fn pop_state(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            log::warn!("MatrixStack: pop_state with no saved state");
        }
    }

    fn translate(&mut self, offset: Vec3) {
        let top = self.top_mut();
        *top *= math::translation(&offset);
    }

    fn scale(&mut self, factors: Vec3) {
        let top = self.top_mut();
        *top *= math::scaling(&factors);
    }

    fn transform(&mut self, matrix: &Mat4) {
        let top = self.top_mut();
        *top *= matrix;
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        self.bound_texture = Some(texture);
    }
}
