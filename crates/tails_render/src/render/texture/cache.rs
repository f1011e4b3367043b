//! Lazy texture compilation for equipped parts

use super::{TextureCompiler, TextureError, TextureHandle, TextureResources};
use crate::character::CharacterId;
use crate::parts::{OutfitPart, Part, PartInfo};

/// Counters describing cache activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Successful compilations
    pub compiles: u64,
    /// Failed compilations or allocations
    pub failures: u64,
    /// Textures released because they were replaced or evicted
    pub releases: u64,
}

/// Compiles part textures on demand
///
/// The cache entry itself lives in each [`PartInfo`]: its texture handle and
/// dirty flag. Each character's combination is compiled independently.
pub struct TextureCache {
    compiler: Box<dyn TextureCompiler>,
    stats: CacheStats,
}

impl TextureCache {
    /// Create a cache that compiles with `compiler`
    pub fn new(compiler: impl TextureCompiler + 'static) -> Self {
        Self {
            compiler: Box::new(compiler),
            stats: CacheStats::default(),
        }
    }

    /// Return the current texture for `info`, compiling it first if needed
    ///
    /// Compiles only when the info is dirty or has no texture. A new texture
    /// is published only once it is fully built and allocated; the previous
    /// one is released before the new handle is assigned. On failure the
    /// previous texture stays bound and the info stays dirty so the next
    /// frame retries.
    pub fn ensure_compiled(
        &mut self,
        character: CharacterId,
        part: &Part,
        info: &mut PartInfo,
        resources: &mut dyn TextureResources,
    ) -> Result<TextureHandle, TextureError> {
        if !info.needs_texture_compile() {
            if let Some(handle) = info.texture() {
                return Ok(handle);
            }
        }

        let handle = self.build(character, part, info, resources).map_err(|err| {
            info.mark_dirty();
            err
        })?;

        if let Some(previous) = info.take_texture() {
            if resources.release(previous) {
                self.stats.releases += 1;
            }
        }
        info.publish_texture(handle);

        log::debug!(
            "Compiled texture {:?} for '{}' subtype {} on {}",
            handle,
            part.name(),
            info.subid(),
            character
        );
        Ok(handle)
    }

    /// Return the current texture for an outfit slot, compiling it if stale
    ///
    /// Same contract as [`Self::ensure_compiled`]: the slot is rebuilt only
    /// when its tints changed or it has no texture, and the old handle is
    /// released once the new one is allocated.
    pub fn ensure_outfit_compiled(
        &mut self,
        character: CharacterId,
        part: &Part,
        outfit: &mut OutfitPart,
        resources: &mut dyn TextureResources,
    ) -> Result<TextureHandle, TextureError> {
        if !outfit.needs_texture_compile() {
            if let Some(handle) = outfit.compiled_texture() {
                return Ok(handle);
            }
        }

        let handle = self.build(character, part, &outfit.compile_info(), resources)?;
        if outfit.set_compiled_texture(handle, resources) {
            self.stats.releases += 1;
        }

        log::debug!(
            "Compiled outfit texture {:?} for '{}' at {:?} on {}",
            handle,
            part.name(),
            outfit.mount_point,
            character
        );
        Ok(handle)
    }

    fn build(
        &mut self,
        character: CharacterId,
        part: &Part,
        info: &PartInfo,
        resources: &mut dyn TextureResources,
    ) -> Result<TextureHandle, TextureError> {
        match self
            .compiler
            .compile(character, part, info)
            .and_then(|image| resources.allocate(image))
        {
            Ok(handle) => {
                self.stats.compiles += 1;
                Ok(handle)
            }
            Err(err) => {
                self.stats.failures += 1;
                Err(err)
            }
        }
    }

    /// Drop the texture held by `info`; it will be rebuilt on next use
    pub fn evict(&mut self, info: &mut PartInfo, resources: &mut dyn TextureResources) -> bool {
        let released = info.release_texture(resources);
        if released {
            self.stats.releases += 1;
        }
        released
    }

    /// Drop the texture compiled for an outfit slot
    pub fn evict_outfit(&mut self, outfit: &mut OutfitPart, resources: &mut dyn TextureResources) -> bool {
        let released = outfit.clear_compiled_texture(resources);
        if released {
            self.stats.releases += 1;
        }
        released
    }

    /// Count textures released outside the cache on its behalf
    pub(crate) fn record_releases(&mut self, count: usize) {
        self.stats.releases += count as u64;
    }

    /// Activity counters
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
