//! Outfit slot configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{PartId, PartInfo};
use crate::foundation::math::{self, Mat4, Vec3};
use crate::render::texture::{TextureHandle, TextureResources};

/// Anchor on the character's body that a part hangs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MountPoint {
    /// Top of the head (ears, horns)
    Head,
    /// Front of the torso
    Chest,
    /// Between the shoulder blades (wings)
    Back,
    /// Small of the back (tails)
    Waist,
    /// Left arm
    LeftArm,
    /// Right arm
    RightArm,
    /// Left leg
    LeftLeg,
    /// Right leg
    RightLeg,
}

/// Outfit validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutfitError {
    /// A placement component is NaN or infinite
    #[error("Non-finite value in outfit field '{0}'")]
    NonFinite(&'static str),
}

/// One user-configured slot of an outfit
///
/// References its base part by id and never owns it. The compiled texture is
/// render-side state only; it is skipped by serde and rebuilt on demand
/// whenever the tints differ from the ones it was built from. Clones start
/// without a texture.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct OutfitPart {
    /// Part this slot shows
    pub base_part: PartId,
    /// Where on the body it is attached
    pub mount_point: MountPoint,
    /// Offset from the mount point
    pub mount_offset: [f32; 3],
    /// Euler rotation in degrees (X, Y, Z)
    pub rotation: [f32; 3],
    /// Per-axis scale
    pub scale: [f32; 3],
    /// Per-texture-slot tint, `0xRRGGBB`
    pub tints: Vec<u32>,

    #[serde(skip)]
    compiled_texture: Option<TextureHandle>,
    #[serde(skip)]
    compiled_tints: Vec<u32>,
}

impl Clone for OutfitPart {
    fn clone(&self) -> Self {
        Self {
            base_part: self.base_part,
            mount_point: self.mount_point,
            mount_offset: self.mount_offset,
            rotation: self.rotation,
            scale: self.scale,
            tints: self.tints.clone(),
            compiled_texture: None,
            compiled_tints: Vec::new(),
        }
    }
}

impl OutfitPart {
    /// New slot at `mount_point` with identity placement and no tints
    pub fn new(base_part: PartId, mount_point: MountPoint) -> Self {
        Self {
            base_part,
            mount_point,
            mount_offset: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            tints: Vec::new(),
            compiled_texture: None,
            compiled_tints: Vec::new(),
        }
    }

    /// Builder-style tint assignment, slot 0 first
    pub fn with_tints(mut self, tints: impl IntoIterator<Item = u32>) -> Self {
        self.tints = tints.into_iter().collect();
        self
    }

    /// Check that every placement value is a finite number
    pub fn validate(&self) -> Result<(), OutfitError> {
        let fields = [
            ("mount_offset", &self.mount_offset),
            ("rotation", &self.rotation),
            ("scale", &self.scale),
        ];
        for (name, values) in fields {
            if !math::is_finite(&Vec3::from(*values)) {
                return Err(OutfitError::NonFinite(name));
            }
        }
        Ok(())
    }

    /// Mount transform: translation * rotation * scale
    pub fn placement_matrix(&self) -> Mat4 {
        let rotation = math::rotation_from_degrees(self.rotation).to_homogeneous();
        math::translation(&Vec3::from(self.mount_offset))
            * rotation
            * math::scaling(&Vec3::from(self.scale))
    }

    /// Compiled texture, if one has been built
    pub fn compiled_texture(&self) -> Option<TextureHandle> {
        self.compiled_texture
    }

    /// Whether the compiled texture is missing or built from stale tints
    pub fn needs_texture_compile(&self) -> bool {
        self.compiled_texture.is_none() || self.compiled_tints != self.tints
    }

    /// Part state the texture compiler builds this slot's texture from
    ///
    /// Outfit slots always show the base subtype.
    pub fn compile_info(&self) -> PartInfo {
        PartInfo::new(self.base_part, 0).with_tints(self.tints.iter().copied())
    }

    /// Store a texture compiled from the current tints
    ///
    /// The previously held handle is released first; returns whether one was.
    /// Setting the handle that is already held releases nothing.
    pub fn set_compiled_texture(&mut self, texture: TextureHandle, resources: &mut dyn TextureResources) -> bool {
        self.compiled_tints.clone_from(&self.tints);
        if self.compiled_texture == Some(texture) {
            return false;
        }
        let released = self
            .compiled_texture
            .take()
            .is_some_and(|previous| resources.release(previous));
        self.compiled_texture = Some(texture);
        released
    }

    /// Release the compiled texture, if any
    pub fn clear_compiled_texture(&mut self, resources: &mut dyn TextureResources) -> bool {
        self.compiled_texture
            .take()
            .is_some_and(|previous| resources.release(previous))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TrackingResources;
    use approx::assert_relative_eq;

    #[test]
    fn test_replacing_texture_releases_previous() {
        let mut resources = TrackingResources::default();
        let first = resources.mint();
        let second = resources.mint();

        let mut outfit = OutfitPart::new(PartId(0), MountPoint::Waist);
        outfit.set_compiled_texture(first, &mut resources);
        assert!(resources.released().is_empty());

        assert!(outfit.set_compiled_texture(second, &mut resources));
        assert_eq!(resources.released(), &[first]);
        assert_eq!(outfit.compiled_texture(), Some(second));

        // Same handle again: nothing released
        assert!(!outfit.set_compiled_texture(second, &mut resources));
        assert_eq!(resources.released(), &[first]);

        assert!(outfit.clear_compiled_texture(&mut resources));
        assert_eq!(resources.released(), &[first, second]);
        assert_eq!(resources.double_releases(), 0);
        assert!(!outfit.clear_compiled_texture(&mut resources));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut outfit = OutfitPart::new(PartId(1), MountPoint::Head);
        assert!(outfit.validate().is_ok());

        outfit.scale[1] = f32::NAN;
        assert_eq!(outfit.validate(), Err(OutfitError::NonFinite("scale")));

        outfit.scale[1] = 1.0;
        outfit.rotation[0] = f32::INFINITY;
        assert_eq!(outfit.validate(), Err(OutfitError::NonFinite("rotation")));
    }

    #[test]
    fn test_placement_matrix() {
        let mut outfit = OutfitPart::new(PartId(0), MountPoint::Back);
        outfit.mount_offset = [1.0, 2.0, 3.0];
        outfit.scale = [2.0, 2.0, 2.0];

        let p = outfit
            .placement_matrix()
            .transform_point(&nalgebra::Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 3.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 3.0);
    }

    #[test]
    fn test_compiled_texture_not_persisted() {
        let mut resources = TrackingResources::default();
        let mut outfit = OutfitPart::new(PartId(2), MountPoint::Waist);
        outfit.tints = vec![0xFF8800, 0xFFFFFF];
        outfit.set_compiled_texture(resources.mint(), &mut resources);

        let text = ron::to_string(&outfit).unwrap();
        let restored: OutfitPart = ron::from_str(&text).unwrap();
        assert_eq!(restored.tints, outfit.tints);
        assert_eq!(restored.base_part, PartId(2));
        assert!(restored.compiled_texture().is_none());
        assert!(restored.needs_texture_compile());
    }

    #[test]
    fn test_tint_edit_makes_texture_stale() {
        let mut resources = TrackingResources::default();
        let mut outfit = OutfitPart::new(PartId(0), MountPoint::Waist).with_tints([0xFF0000]);
        assert!(outfit.needs_texture_compile());

        outfit.set_compiled_texture(resources.mint(), &mut resources);
        assert!(!outfit.needs_texture_compile());

        outfit.tints[0] = 0x00FF00;
        assert!(outfit.needs_texture_compile());
        let info = outfit.compile_info();
        assert_eq!(info.part(), PartId(0));
        assert_eq!(info.tint(0), Some(0x00FF00));
    }

    #[test]
    fn test_clone_drops_compiled_texture() {
        let mut resources = TrackingResources::default();
        let mut outfit = OutfitPart::new(PartId(1), MountPoint::Back).with_tints([0x112233]);
        let handle = resources.mint();
        outfit.set_compiled_texture(handle, &mut resources);

        let mut copy = outfit.clone();
        assert!(copy.compiled_texture().is_none());
        assert!(copy.needs_texture_compile());
        assert_eq!(copy.tints, outfit.tints);

        assert!(!copy.clear_compiled_texture(&mut resources));
        assert!(outfit.clear_compiled_texture(&mut resources));
        assert_eq!(resources.released(), &[handle]);
        assert_eq!(resources.double_releases(), 0);
    }
}
