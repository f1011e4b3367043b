//! Append-only table of every renderable part
//!
//! Parts are registered during startup and never removed. Once registration
//! is complete the registry is moved behind an `Arc` and shared read-only
//! with the renderer.

use std::collections::HashMap;

use super::{Part, PartError, PartId};

/// Table of all known parts, keyed by name
#[derive(Debug, Default)]
pub struct PartRegistry {
    /// Parts in registration order; `PartId` indexes this
    parts: Vec<Part>,
    /// Name -> id lookup
    by_name: HashMap<String, PartId>,
}

impl PartRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a part
    ///
    /// Fails with [`PartError::DuplicateName`] if the name is taken; the
    /// existing entry is left untouched.
    pub fn register(&mut self, part: Part) -> Result<PartId, PartError> {
        if self.by_name.contains_key(part.name()) {
            return Err(PartError::DuplicateName(part.name().to_string()));
        }

        let id = PartId(self.parts.len() as u32);
        log::info!(
            "Registered part '{}' as {} ({} subtypes)",
            part.name(),
            id,
            part.available_subtypes() + 1
        );
        self.by_name.insert(part.name().to_string(), id);
        self.parts.push(part);
        Ok(id)
    }

    /// Find a part by name
    pub fn lookup(&self, name: &str) -> Option<&Part> {
        self.lookup_id(name).and_then(|id| self.get(id))
    }

    /// Find the id of a part by name
    pub fn lookup_id(&self, name: &str) -> Option<PartId> {
        self.by_name.get(name).copied()
    }

    /// Find a part by id
    pub fn get(&self, id: PartId) -> Option<&Part> {
        self.parts.get(id.0 as usize)
    }

    /// Find a part by id, failing with [`PartError::UnknownId`]
    pub fn require(&self, id: PartId) -> Result<&Part, PartError> {
        self.get(id).ok_or(PartError::UnknownId(id))
    }

    /// Number of registered parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether no parts are registered
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterate over parts in registration order
    pub fn iter(&self) -> impl Iterator<Item = (PartId, &Part)> {
        self.parts
            .iter()
            .enumerate()
            .map(|(index, part)| (PartId(index as u32), part))
    }
}
