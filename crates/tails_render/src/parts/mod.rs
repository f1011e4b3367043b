//! Part definitions and per-character part state
//!
//! - [`Part`]: a registered kind of cosmetic attachment and its variant tables
//! - [`PartRegistry`]: append-only table of all known parts
//! - [`PartInfo`]: per-character state of one equipped part
//! - [`OutfitPart`]: user-configured outfit slot referencing a part
//! - [`CharacterCosmetics`]: every part equipped by one character

mod cosmetics;
mod info;
mod outfit;
mod part;
mod registry;

pub use cosmetics::CharacterCosmetics;
pub use info::PartInfo;
pub use outfit::{MountPoint, OutfitError, OutfitPart};
pub use part::{Part, PartModel, Placement, PosePlacement};
pub use registry::PartRegistry;

use std::fmt;
use thiserror::Error;

/// Identity of a registered part, assigned by [`PartRegistry`] in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct PartId(pub u32);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "part#{}", self.0)
    }
}

/// Part registration and variant table errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PartError {
    /// A part with this name is already registered
    #[error("Part name already registered: {0}")]
    DuplicateName(String),

    /// No part is registered under this name
    #[error("Part not found: {0}")]
    NotFound(String),

    /// No part is registered under this id
    #[error("Unknown part id: {0}")]
    UnknownId(PartId),

    /// Subtype index beyond the part's inclusive upper bound
    #[error("Subtype {subid} out of range for part '{part}' (max {max})")]
    SubtypeOutOfRange {
        /// Part name
        part: String,
        /// Requested subtype
        subid: u32,
        /// Highest valid subtype
        max: u32,
    },

    /// Texture slot index beyond the subtype's slot count
    #[error("Texture slot {slot} out of range for part '{part}' subtype {subid} ({count} slots)")]
    SlotOutOfRange {
        /// Part name
        part: String,
        /// Subtype the slot was looked up in
        subid: u32,
        /// Requested slot
        slot: usize,
        /// Number of slots in that subtype
        count: usize,
    },

    /// The character already has this part equipped
    #[error("Part {0} is already equipped")]
    AlreadyEquipped(PartId),
}
