//! In-memory texture resource manager

use image::RgbaImage;

use super::{TextureError, TextureHandle, TextureResources};
use crate::foundation::collections::HandleMap;

/// Texture resources kept in CPU memory
///
/// Handles are generation-checked: once released, a handle never resolves
/// again, even after its slot is reused.
#[derive(Debug, Default)]
pub struct TexturePool {
    textures: HandleMap<RgbaImage>,
    /// Maximum number of live textures (0 = unlimited)
    capacity: usize,
    allocated_total: u64,
}

impl TexturePool {
    /// Unlimited pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool that refuses allocations beyond `capacity` live textures
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            textures: HandleMap::with_capacity_and_key(capacity),
            capacity,
            allocated_total: 0,
        }
    }

    /// Image behind a live handle
    pub fn get(&self, handle: TextureHandle) -> Option<&RgbaImage> {
        self.textures.get(handle.0)
    }

    /// Number of textures currently allocated
    pub fn live_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of allocations over the pool's lifetime
    pub fn allocated_total(&self) -> u64 {
        self.allocated_total
    }
}

impl TextureResources for TexturePool {
    fn allocate(&mut self, image: RgbaImage) -> Result<TextureHandle, TextureError> {
        if self.capacity != 0 && self.textures.len() >= self.capacity {
            return Err(TextureError::Allocation(format!(
                "pool full ({} textures)",
                self.capacity
            )));
        }
        let (width, height) = image.dimensions();
        let handle = TextureHandle(self.textures.insert(image));
        self.allocated_total += 1;
        log::trace!("Allocated {:?} ({}x{})", handle, width, height);
        Ok(handle)
    }

    fn release(&mut self, handle: TextureHandle) -> bool {
        let released = self.textures.remove(handle.0).is_some();
        if !released {
            log::warn!("Release of unknown texture {:?}", handle);
        }
        released
    }
}
