//! Character abstraction consumed by the part renderer
//!
//! The host game owns its characters; the renderer only needs a stable
//! identity, a type tag for hook dispatch and the current pose.

use std::fmt;

use crate::foundation::math::Vec3;
use crate::parts::MountPoint;

/// Stable identity of a character for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacterId(pub u64);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "character#{}", self.0)
    }
}

/// Type tag of a character, used as the key for pre-render hooks
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CharacterKind {
    /// The canonical player type
    Player,
    /// An alternate player implementation supplied by another system
    PlayerVariant(String),
    /// Any other kind of character
    Entity(String),
}

impl CharacterKind {
    /// Whether this kind is the player or one of its alternate implementations
    pub fn is_player_like(&self) -> bool {
        matches!(self, Self::Player | Self::PlayerVariant(_))
    }
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::PlayerVariant(name) => write!(f, "player:{name}"),
            Self::Entity(name) => write!(f, "{name}"),
        }
    }
}

/// Map a character kind to the key its hooks are registered under
///
/// Every player-like kind resolves to [`CharacterKind::Player`]; all other
/// kinds resolve to themselves.
pub fn canonicalize(kind: &CharacterKind) -> CharacterKind {
    if kind.is_player_like() {
        CharacterKind::Player
    } else {
        kind.clone()
    }
}

/// Discrete stance of a character that affects part placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pose {
    /// Upright
    #[default]
    Standing,
    /// Sneaking / crouched
    Crouching,
}

/// A renderable character instance
pub trait Character {
    /// Stable identity
    fn id(&self) -> CharacterId;

    /// Concrete runtime type tag
    fn kind(&self) -> CharacterKind;

    /// Current pose
    fn pose(&self) -> Pose;

    /// Convenience for `pose() == Pose::Crouching`
    fn is_crouching(&self) -> bool {
        self.pose() == Pose::Crouching
    }

    /// Offset of a body mount point from the character's render origin
    ///
    /// Characters without a skeleton mount everything at the origin.
    fn mount_anchor(&self, _mount: MountPoint) -> Vec3 {
        Vec3::zeros()
    }
}
