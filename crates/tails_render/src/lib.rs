//! # Tails Render
//!
//! Render-time compositing of cosmetic parts (tails, ears, wings) attached to
//! humanoid characters.
//!
//! ## Features
//!
//! - **Part Registry**: Named parts with subtype variants, texture slots and author credits
//! - **Texture Cache**: Lazy per-character compositing with release-before-replace
//! - **Pre-render Hooks**: Per character-kind placement adjustments, with alternate
//!   player implementations dispatched to the player hook
//! - **Pose Placement**: Distinct placement for standing and crouching characters
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tails_render::prelude::*;
//!
//! # fn demo(model: Arc<dyn PartModel>, source: impl TextureSource + 'static,
//! #         player: &dyn Character) -> Result<(), Box<dyn std::error::Error>> {
//! let mut parts = PartRegistry::new();
//! let mut fox = Part::new("fox", 0, model, Some("Kihira"), ["base", "tip"]);
//! fox.set_all_authors("Kihira")?;
//! let fox = parts.register(fox)?;
//!
//! let compositor = LayerCompositor::new(source, CompositorConfig::default());
//! let mut renderer = PartRenderer::new(
//!     Arc::new(parts),
//!     Arc::new(RenderHookRegistry::new()),
//!     TextureCache::new(compositor),
//! );
//!
//! let mut gfx = MatrixStack::new();
//! let mut textures = TexturePool::new();
//! let mut info = PartInfo::new(fox, 0).with_tints([0xD0601F, 0xFFFFFF]);
//! renderer.render(&mut gfx, &mut textures, player, &mut info, Vec3::zeros(), 0.0)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod character;
pub mod parts;
pub mod render;

#[cfg(test)]
mod testing;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        character::{canonicalize, Character, CharacterId, CharacterKind, Pose},
        config::{CompositorConfig, Config, ConfigError, TailsConfig},
        foundation::math::{Mat4, Vec3},
        parts::{
            CharacterCosmetics, MountPoint, OutfitPart, Part, PartError, PartId, PartInfo,
            PartModel, PartRegistry, Placement, PosePlacement,
        },
        render::{
            DrawError, GraphicsState, HookError, LayerCompositor, MatrixStack, PartRenderer,
            PreRenderHook, RenderError, RenderHookRegistry, StateGuard, TextureCache,
            TextureCompiler, TextureError, TextureHandle, TexturePool, TextureResources,
            TextureSource,
        },
    };
}
