//! Composited part textures
//!
//! - [`TextureSource`]: host asset pipeline supplying raw slot layers
//! - [`TextureCompiler`] / [`LayerCompositor`]: tint and blend layers into one image
//! - [`TextureResources`] / [`TexturePool`]: allocation and release of texture resources
//! - [`TextureCache`]: lazy per-`PartInfo` compilation with release-before-replace

mod cache;
mod compositor;
mod pool;

pub use cache::{CacheStats, TextureCache};
pub use compositor::LayerCompositor;
pub use pool::TexturePool;

use image::RgbaImage;
use thiserror::Error;

use crate::character::CharacterId;
use crate::foundation::collections::TextureKey;
use crate::parts::{Part, PartError, PartInfo};

/// Handle to an allocated texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub TextureKey);

/// Texture compilation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextureError {
    /// The part or subtype could not be resolved
    #[error("Part error: {0}")]
    Part(#[from] PartError),

    /// The asset pipeline has no layer for a slot
    #[error("Missing texture layer '{slot}' for part '{part}' subtype {subid}")]
    MissingLayer {
        /// Part name
        part: String,
        /// Subtype
        subid: u32,
        /// Slot name
        slot: String,
    },

    /// A layer does not match the canvas size
    #[error("Layer '{slot}' is {actual:?}, expected {expected:?}")]
    SizeMismatch {
        /// Slot name
        slot: String,
        /// Canvas size
        expected: (u32, u32),
        /// Layer size
        actual: (u32, u32),
    },

    /// The resource manager refused the allocation
    #[error("Texture allocation failed: {0}")]
    Allocation(String),

    /// Compilation failed for another reason
    #[error("Texture compile failed: {0}")]
    CompileFailed(String),
}

/// Host asset pipeline supplying raw texture layers
pub trait TextureSource {
    /// RGBA layer for one slot of one subtype
    fn layer(&self, part: &Part, subid: u32, slot: &str) -> Result<RgbaImage, TextureError>;
}

/// Builds the composited image for one equipped part
pub trait TextureCompiler {
    /// Composite the texture for `info` as worn by `character`
    fn compile(&self, character: CharacterId, part: &Part, info: &PartInfo) -> Result<RgbaImage, TextureError>;
}

/// Host texture resource manager
pub trait TextureResources {
    /// Upload an image and return its handle
    fn allocate(&mut self, image: RgbaImage) -> Result<TextureHandle, TextureError>;

    /// Free a previously allocated texture; returns whether the handle was live
    fn release(&mut self, handle: TextureHandle) -> bool;
}
