//! Part rendering
//!
//! Per frame, per equipped part:
//! [`PartRenderer`] -> [`TextureCache::ensure_compiled`] ->
//! [`RenderHookRegistry::resolve`] -> hook -> pose placement -> model draw.
//! Outfit slots take the same path through [`PartRenderer::render_outfit`],
//! placed by their mount point instead of the pose placement.
//!
//! The graphics state, texture resources and part models are supplied by the
//! host through the traits in this module.

pub mod graphics;
pub mod hooks;
pub mod texture;
mod renderer;


pub use graphics::{GraphicsState, MatrixStack, StateGuard};
pub use hooks::{HookError, PreRenderHook, RenderHookRegistry};
pub use renderer::PartRenderer;
pub use texture::{
    CacheStats, LayerCompositor, TextureCache, TextureCompiler, TextureError, TextureHandle,
    TexturePool, TextureResources, TextureSource,
};

use thiserror::Error;

use crate::parts::{OutfitError, PartError};

/// Failure reported by a part model while drawing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Draw failed: {0}")]
pub struct DrawError(pub String);

/// Reasons a part was not drawn this frame
///
/// The graphics state is always restored before one of these is returned.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Unknown part or bad subtype
    #[error("Part error: {0}")]
    Part(#[from] PartError),

    /// Texture could not be compiled; retried next frame
    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    /// Outfit slot has unusable placement values
    #[error("Outfit error: {0}")]
    Outfit(#[from] OutfitError),

    /// Pre-render hook failed
    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    /// Model draw failed
    #[error("Draw error: {0}")]
    Draw(#[from] DrawError),
}
