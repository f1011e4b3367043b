//! Pre-render hooks keyed by character kind
//!
//! Other systems register a hook for a character kind to adjust placement
//! before a part is drawn (for example to compensate for a different body
//! model). Dispatch canonicalizes the kind first, so alternate player
//! implementations receive the hook registered for [`CharacterKind::Player`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::GraphicsState;
use crate::character::{canonicalize, Character, CharacterKind};
use crate::foundation::math::Vec3;
use crate::parts::{Part, PartInfo};

/// Hook registration and invocation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HookError {
    /// A hook is already registered for this kind
    #[error("A pre-render hook is already registered for '{0}'")]
    DuplicateRegistration(CharacterKind),

    /// The hook itself reported a failure
    #[error("Pre-render hook failed: {0}")]
    Failed(String),
}

/// Placement adjustment run before a part is drawn
pub trait PreRenderHook: Send + Sync {
    /// Adjust `gfx` for `character` before `part` is drawn at `position`
    ///
    /// `partial_tick` is the interpolation fraction between simulation ticks.
    fn on_pre_render(
        &self,
        gfx: &mut dyn GraphicsState,
        character: &dyn Character,
        part: &Part,
        info: &PartInfo,
        position: Vec3,
        partial_tick: f32,
    ) -> Result<(), HookError>;
}

/// Hooks keyed by character kind; write-once per kind
///
/// Populated during startup, then shared read-only behind an `Arc`.
#[derive(Default)]
pub struct RenderHookRegistry {
    hooks: HashMap<CharacterKind, Arc<dyn PreRenderHook>>,
}

impl RenderHookRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the hook for `kind`
    ///
    /// Fails with [`HookError::DuplicateRegistration`] if `kind` already has
    /// one; the existing hook is kept.
    pub fn register(&mut self, kind: CharacterKind, hook: Arc<dyn PreRenderHook>) -> Result<(), HookError> {
        if self.hooks.contains_key(&kind) {
            return Err(HookError::DuplicateRegistration(kind));
        }
        if let CharacterKind::PlayerVariant(_) = kind {
            log::warn!(
                "Pre-render hook registered for '{}' is shadowed by the '{}' hook during dispatch",
                kind,
                CharacterKind::Player
            );
        } else {
            log::info!("Registered pre-render hook for '{}'", kind);
        }
        self.hooks.insert(kind, hook);
        Ok(())
    }

    /// Hook registered for exactly `kind`
    pub fn lookup(&self, kind: &CharacterKind) -> Option<&Arc<dyn PreRenderHook>> {
        self.hooks.get(kind)
    }

    /// Hook to run for a character of runtime kind `kind`
    pub fn resolve(&self, kind: &CharacterKind) -> Option<&Arc<dyn PreRenderHook>> {
        self.lookup(&canonicalize(kind))
    }

    /// Number of registered hooks
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for RenderHookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderHookRegistry")
            .field("kinds", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}
