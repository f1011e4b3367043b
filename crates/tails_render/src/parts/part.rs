//! Part definition: variant tables, authorship and pose placement

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::PartError;
use crate::character::{Character, Pose};
use crate::foundation::math::Vec3;
use crate::render::{DrawError, GraphicsState};

/// Geometry renderer for one kind of part
///
/// Implemented by the host's model system. Called with the transform,
/// texture and hook adjustments already applied to `gfx`.
pub trait PartModel: Send + Sync {
    /// Issue the draw commands for `subtype`
    fn render(
        &self,
        gfx: &mut dyn GraphicsState,
        character: &dyn Character,
        subtype: u32,
        partial_tick: f32,
    ) -> Result<(), DrawError>;
}

/// Translation and scale applied before drawing a part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Offset from the mount origin
    pub translation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Placement {
    /// Placement with a uniform scale
    pub fn new(translation: Vec3, scale: f32) -> Self {
        Self {
            translation,
            scale: Vec3::new(scale, scale, scale),
        }
    }
}

/// Placement for each pose a character can be in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosePlacement {
    /// Used while upright
    pub standing: Placement,
    /// Used while crouched
    pub crouching: Placement,
}

impl PosePlacement {
    /// Select the placement for `pose`
    pub fn for_pose(&self, pose: Pose) -> &Placement {
        match pose {
            Pose::Standing => &self.standing,
            Pose::Crouching => &self.crouching,
        }
    }
}

impl Default for PosePlacement {
    // Sits the part at the small of the back; crouching pulls it down and back.
    fn default() -> Self {
        Self {
            standing: Placement::new(Vec3::new(0.0, 0.65, 0.1), 0.8),
            crouching: Placement::new(Vec3::new(0.0, 0.55, 0.4), 0.8),
        }
    }
}

/// A named, registered kind of cosmetic attachment
///
/// A part has `subtypes + 1` body-plan variants (`0..=subtypes`). Each
/// variant exposes an ordered list of texture slots; by default every
/// variant shares the part-wide list, but a variant may override it with
/// [`Part::with_subtype_textures`]. Authorship is tracked per
/// (subtype, slot) cell.
pub struct Part {
    name: String,
    subtypes: u32,
    texture_names: Vec<String>,
    subtype_texture_names: BTreeMap<u32, Vec<String>>,
    authors: Vec<Vec<Option<String>>>,
    model_author: Option<String>,
    placement: PosePlacement,
    model: Arc<dyn PartModel>,
}

impl Part {
    /// Create a part with `subtypes + 1` variants sharing `texture_names`
    pub fn new<I, S>(
        name: impl Into<String>,
        subtypes: u32,
        model: Arc<dyn PartModel>,
        model_author: Option<&str>,
        texture_names: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texture_names: Vec<String> = texture_names.into_iter().map(Into::into).collect();
        let authors = (0..=subtypes)
            .map(|_| vec![None; texture_names.len()])
            .collect();

        Self {
            name: name.into(),
            subtypes,
            texture_names,
            subtype_texture_names: BTreeMap::new(),
            authors,
            model_author: model_author.map(str::to_string),
            placement: PosePlacement::default(),
            model,
        }
    }

    /// Give one subtype its own texture slot list
    ///
    /// Resets the authorship row of that subtype to match the new slot count.
    pub fn with_subtype_textures<I, S>(mut self, subid: u32, texture_names: I) -> Result<Self, PartError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_subtype(subid)?;
        let names: Vec<String> = texture_names.into_iter().map(Into::into).collect();
        self.authors[subid as usize] = vec![None; names.len()];
        self.subtype_texture_names.insert(subid, names);
        Ok(self)
    }

    /// Replace the pose placement table
    pub fn with_placement(mut self, placement: PosePlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Unique name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inclusive upper bound of valid subtype indices (0 means one variant)
    pub fn available_subtypes(&self) -> u32 {
        self.subtypes
    }

    /// Texture slot names available for `subid`
    pub fn texture_names(&self, subid: u32) -> Result<&[String], PartError> {
        self.check_subtype(subid)?;
        Ok(self
            .subtype_texture_names
            .get(&subid)
            .unwrap_or(&self.texture_names))
    }

    /// Number of texture slots for `subid`
    pub fn slot_count(&self, subid: u32) -> Result<usize, PartError> {
        self.texture_names(subid).map(<[String]>::len)
    }

    /// Translation key for the display name of a subtype
    pub fn unlocalised_name(&self, subid: u32) -> Result<String, PartError> {
        self.check_subtype(subid)?;
        Ok(format!("{}.{}.name", self.name, subid))
    }

    /// Attribution for the 3D geometry
    pub fn model_author(&self) -> Option<&str> {
        self.model_author.as_deref()
    }

    /// Credit `author` for one texture slot of one subtype
    pub fn set_author(&mut self, author: &str, subid: u32, slot: usize) -> Result<&mut Self, PartError> {
        self.check_slot(subid, slot)?;
        self.authors[subid as usize][slot] = Some(author.to_string());
        Ok(self)
    }

    /// Credit `author` for every texture slot of `subid`
    pub fn set_subtype_author(&mut self, author: &str, subid: u32) -> Result<&mut Self, PartError> {
        for slot in 0..self.slot_count(subid)? {
            self.set_author(author, subid, slot)?;
        }
        Ok(self)
    }

    /// Credit `author` for every slot of every subtype
    pub fn set_all_authors(&mut self, author: &str) -> Result<&mut Self, PartError> {
        for subid in 0..=self.subtypes {
            self.set_subtype_author(author, subid)?;
        }
        Ok(self)
    }

    /// Author credited for a texture slot, if any
    pub fn author(&self, subid: u32, slot: usize) -> Result<Option<&str>, PartError> {
        self.check_slot(subid, slot)?;
        Ok(self.authors[subid as usize][slot].as_deref())
    }

    /// Whether an author is credited for a texture slot
    pub fn has_author(&self, subid: u32, slot: usize) -> Result<bool, PartError> {
        self.author(subid, slot).map(|author| author.is_some())
    }

    /// Pose placement table
    pub fn placement(&self) -> &PosePlacement {
        &self.placement
    }

    /// Geometry renderer
    pub fn model(&self) -> &dyn PartModel {
        self.model.as_ref()
    }

    /// Fail with [`PartError::SubtypeOutOfRange`] unless `subid` is valid
    pub fn check_subtype(&self, subid: u32) -> Result<(), PartError> {
        if subid > self.subtypes {
            return Err(PartError::SubtypeOutOfRange {
                part: self.name.clone(),
                subid,
                max: self.subtypes,
            });
        }
        Ok(())
    }

    fn check_slot(&self, subid: u32, slot: usize) -> Result<(), PartError> {
        let count = self.slot_count(subid)?;
        if slot >= count {
            return Err(PartError::SlotOutOfRange {
                part: self.name.clone(),
                subid,
                slot,
                count,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Part")
            .field("name", &self.name)
            .field("subtypes", &self.subtypes)
            .field("texture_names", &self.texture_names)
            .field("model_author", &self.model_author)
            .finish_non_exhaustive()
    }
}
