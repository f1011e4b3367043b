//! Orchestrates texture compilation, hook dispatch and drawing for parts

use std::sync::Arc;

use super::graphics::{GraphicsState, StateGuard};
use super::hooks::RenderHookRegistry;
use super::texture::{CacheStats, TextureCache, TextureResources};
use super::RenderError;
use crate::character::Character;
use crate::foundation::math::Vec3;
use crate::parts::{CharacterCosmetics, OutfitPart, PartInfo, PartRegistry};

/// Draws equipped parts onto characters
///
/// Holds the frozen part and hook registries by shared reference and owns
/// the texture cache.
pub struct PartRenderer {
    parts: Arc<PartRegistry>,
    hooks: Arc<RenderHookRegistry>,
    cache: TextureCache,
}

impl PartRenderer {
    /// Create a renderer over registries whose registration phase is complete
    pub fn new(parts: Arc<PartRegistry>, hooks: Arc<RenderHookRegistry>, cache: TextureCache) -> Self {
        Self { parts, hooks, cache }
    }

    /// Registered parts
    pub fn parts(&self) -> &PartRegistry {
        &self.parts
    }

    /// Registered pre-render hooks
    pub fn hooks(&self) -> &RenderHookRegistry {
        &self.hooks
    }

    /// Texture cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Draw one equipped part
    ///
    /// Ensures the texture is current, then within a saved graphics state runs
    /// the pre-render hook for the character's kind, applies the pose
    /// placement, binds the texture and draws the model. Any error means the
    /// part is not drawn this frame; the graphics state is restored on every
    /// path and a failed compile is retried on the next call.
    pub fn render(
        &mut self,
        gfx: &mut dyn GraphicsState,
        resources: &mut dyn TextureResources,
        character: &dyn Character,
        info: &mut PartInfo,
        position: Vec3,
        partial_tick: f32,
    ) -> Result<(), RenderError> {
        let part = self.parts.require(info.part())?;
        part.check_subtype(info.subid())?;

        let texture = self
            .cache
            .ensure_compiled(character.id(), part, info, resources)?;

        let mut state = StateGuard::push(gfx);

        if let Some(hook) = self.hooks.resolve(&character.kind()) {
            hook.on_pre_render(&mut *state, character, part, info, position, partial_tick)?;
        }

        let placement = part.placement().for_pose(character.pose());
        state.translate(placement.translation);
        state.scale(placement.scale);
        state.bind_texture(texture);
        part.model()
            .render(&mut *state, character, info.subid(), partial_tick)?;

        Ok(())
    }

    /// Draw every part a character has equipped
    ///
    /// Failures are logged and skip only the failing part. Returns the number
    /// of parts drawn.
    pub fn render_character(
        &mut self,
        gfx: &mut dyn GraphicsState,
        resources: &mut dyn TextureResources,
        character: &dyn Character,
        cosmetics: &mut CharacterCosmetics,
        position: Vec3,
        partial_tick: f32,
    ) -> usize {
        let mut drawn = 0;
        for info in cosmetics.iter_mut() {
            match self.render(gfx, resources, character, info, position, partial_tick) {
                Ok(()) => drawn += 1,
                Err(err) => log::warn!(
                    "Skipped {} on {} this frame: {}",
                    info.part(),
                    character.id(),
                    err
                ),
            }
        }
        drawn
    }

    /// Draw one user-configured outfit slot
    ///
    /// Follows the same steps as [`Self::render`], but places the part at the
    /// outfit's mount point using its offset, rotation and scale instead of
    /// the part's pose placement. The outfit's texture is rebuilt whenever
    /// its tints change.
    pub fn render_outfit(
        &mut self,
        gfx: &mut dyn GraphicsState,
        resources: &mut dyn TextureResources,
        character: &dyn Character,
        outfit: &mut OutfitPart,
        position: Vec3,
        partial_tick: f32,
    ) -> Result<(), RenderError> {
        let part = self.parts.require(outfit.base_part)?;
        outfit.validate()?;

        let texture = self
            .cache
            .ensure_outfit_compiled(character.id(), part, outfit, resources)?;
        let info = outfit.compile_info();

        let mut state = StateGuard::push(gfx);

        if let Some(hook) = self.hooks.resolve(&character.kind()) {
            hook.on_pre_render(&mut *state, character, part, &info, position, partial_tick)?;
        }

        state.translate(character.mount_anchor(outfit.mount_point));
        state.transform(&outfit.placement_matrix());
        state.bind_texture(texture);
        part.model()
            .render(&mut *state, character, info.subid(), partial_tick)?;

        Ok(())
    }

    /// Release the texture compiled for an outfit slot that is being cleared
    pub fn release_outfit(&mut self, outfit: &mut OutfitPart, resources: &mut dyn TextureResources) -> bool {
        self.cache.evict_outfit(outfit, resources)
    }

    /// Release every texture held for a character that is being removed
    pub fn unload_character(&mut self, cosmetics: CharacterCosmetics, resources: &mut dyn TextureResources) -> usize {
        let released = cosmetics.unload(resources);
        self.cache.record_releases(released);
        released
    }
}
