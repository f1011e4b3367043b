//! Every part equipped by one character

use super::{PartError, PartId, PartInfo};
use crate::character::CharacterId;
use crate::render::texture::TextureResources;

/// Owns the [`PartInfo`] of each part a character has equipped
///
/// Exactly one entry exists per equipped part. Unloading the character
/// releases every compiled texture it holds.
#[derive(Debug)]
pub struct CharacterCosmetics {
    character: CharacterId,
    parts: Vec<PartInfo>,
}

impl CharacterCosmetics {
    /// Empty set for `character`
    pub fn new(character: CharacterId) -> Self {
        Self {
            character,
            parts: Vec::new(),
        }
    }

    /// Owning character
    pub fn character(&self) -> CharacterId {
        self.character
    }

    /// Equip a part; fails if that part is already equipped
    pub fn equip(&mut self, info: PartInfo) -> Result<(), PartError> {
        if self.get(info.part()).is_some() {
            return Err(PartError::AlreadyEquipped(info.part()));
        }
        self.parts.push(info);
        Ok(())
    }

    /// Unequip a part, releasing its texture
    pub fn unequip(&mut self, part: PartId, resources: &mut dyn TextureResources) -> Option<PartInfo> {
        let index = self.parts.iter().position(|info| info.part() == part)?;
        let mut info = self.parts.remove(index);
        info.release_texture(resources);
        Some(info)
    }

    /// State of an equipped part
    pub fn get(&self, part: PartId) -> Option<&PartInfo> {
        self.parts.iter().find(|info| info.part() == part)
    }

    /// Mutable state of an equipped part
    pub fn get_mut(&mut self, part: PartId) -> Option<&mut PartInfo> {
        self.parts.iter_mut().find(|info| info.part() == part)
    }

    /// Iterate over equipped parts
    pub fn iter(&self) -> impl Iterator<Item = &PartInfo> {
        self.parts.iter()
    }

    /// Iterate mutably over equipped parts
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PartInfo> {
        self.parts.iter_mut()
    }

    /// Number of equipped parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether nothing is equipped
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Tear down on character removal; returns how many textures were released
    pub fn unload(mut self, resources: &mut dyn TextureResources) -> usize {
        let released = self
            .parts
            .iter_mut()
            .map(|info| info.release_texture(resources))
            .filter(|released| *released)
            .count();
        log::debug!("Unloaded {}: released {} texture(s)", self.character, released);
        released
    }
}
