//! Per-character state for one equipped part

use crate::render::texture::{TextureHandle, TextureResources};

use super::PartId;

/// Runtime state of one part equipped by one character
///
/// Holds the selected subtype, per-slot tints and the compiled texture. Any
/// change that affects appearance sets the dirty flag; the texture cache
/// clears it after a successful compile.
///
/// A clone copies the configuration only. It starts without a texture and
/// dirty, so each copy owns the handle it later compiles.
#[derive(Debug, PartialEq, Eq)]
pub struct PartInfo {
    part: PartId,
    subid: u32,
    tints: Vec<Option<u32>>,
    texture: Option<TextureHandle>,
    needs_texture_compile: bool,
}

impl Clone for PartInfo {
    fn clone(&self) -> Self {
        Self {
            part: self.part,
            subid: self.subid,
            tints: self.tints.clone(),
            texture: None,
            needs_texture_compile: true,
        }
    }
}

impl PartInfo {
    /// New state for `part` showing `subid`; starts dirty with no texture
    pub fn new(part: PartId, subid: u32) -> Self {
        Self {
            part,
            subid,
            tints: Vec::new(),
            texture: None,
            needs_texture_compile: true,
        }
    }

    /// Builder-style tint assignment, slot by slot
    pub fn with_tints(mut self, tints: impl IntoIterator<Item = u32>) -> Self {
        self.set_tints(tints);
        self
    }

    /// Part this state belongs to
    pub fn part(&self) -> PartId {
        self.part
    }

    /// Selected subtype
    pub fn subid(&self) -> u32 {
        self.subid
    }

    /// Select another subtype
    pub fn set_subid(&mut self, subid: u32) {
        if self.subid != subid {
            self.subid = subid;
            self.mark_dirty();
        }
    }

    /// Tint (`0xRRGGBB`) for a texture slot, if one was set
    pub fn tint(&self, slot: usize) -> Option<u32> {
        self.tints.get(slot).copied().flatten()
    }

    /// Set the tint of one texture slot
    pub fn set_tint(&mut self, slot: usize, tint: u32) {
        if self.tint(slot) == Some(tint) {
            return;
        }
        if slot >= self.tints.len() {
            self.tints.resize(slot + 1, None);
        }
        self.tints[slot] = Some(tint);
        self.mark_dirty();
    }

    /// Replace all tints, slot 0 first
    pub fn set_tints(&mut self, tints: impl IntoIterator<Item = u32>) {
        let tints: Vec<Option<u32>> = tints.into_iter().map(Some).collect();
        if self.tints != tints {
            self.tints = tints;
            self.mark_dirty();
        }
    }

    /// Compiled texture currently bound to this part
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    /// Whether the texture must be recompiled before the next draw
    pub fn needs_texture_compile(&self) -> bool {
        self.needs_texture_compile
    }

    /// Request a recompile on the next frame
    pub fn mark_dirty(&mut self) {
        self.needs_texture_compile = true;
    }

    /// Release the compiled texture, if any, and mark the state dirty
    ///
    /// Returns whether a handle was released.
    pub fn release_texture(&mut self, resources: &mut dyn TextureResources) -> bool {
        self.needs_texture_compile = true;
        match self.texture.take() {
            Some(handle) => resources.release(handle),
            None => false,
        }
    }

    /// Detach the current texture without releasing it
    pub(crate) fn take_texture(&mut self) -> Option<TextureHandle> {
        self.texture.take()
    }

    /// Publish a freshly compiled texture and clear the dirty flag
    ///
    /// The previous handle must already have been taken and released.
    pub(crate) fn publish_texture(&mut self, handle: TextureHandle) {
        debug_assert!(self.texture.is_none(), "texture published over a live handle");
        self.texture = Some(handle);
        self.needs_texture_compile = false;
    }
}
