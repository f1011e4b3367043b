//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Generation-checked key for a texture resource slot
    ///
    /// A key whose slot has been released never compares equal to the key of
    /// a resource allocated later in the same slot.
    pub struct TextureKey;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<TextureKey, T>;
