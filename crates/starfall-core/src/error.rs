//! Error types for the combat simulation.
//!
//! Every variant is locally recoverable: the engine reports it through the
//! notification sink and keeps ticking.

use thiserror::Error;

use crate::enums::AmmoTier;
use crate::types::EntityId;

/// Result type alias using [`CombatError`].
pub type Result<T> = std::result::Result<T, CombatError>;

/// Why a combat action was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CombatError {
    /// No laser cannon equipped.
    #[error("No weapon equipped")]
    NoWeaponEquipped,

    /// Selected ammunition class is empty.
    #[error("Out of {0:?} ammunition")]
    OutOfAmmo(AmmoTier),

    /// Action needs a selected target.
    #[error("No target selected")]
    NoTarget,

    /// Target was destroyed or removed.
    #[error("Target is no longer active")]
    TargetInactive,

    /// Target is beyond the attacker's weapon range.
    #[error("Target out of range")]
    OutOfRange,

    /// Rocket launcher still reloading.
    #[error("Rocket launcher reloading: {remaining} ticks left")]
    MissileCooldown {
        /// Ticks until the next launch is allowed.
        remaining: u32,
    },

    /// No rockets left.
    #[error("Out of rockets")]
    NoMissiles,

    /// Handle does not refer to a live entity.
    #[error("Entity not found: {0:?}")]
    UnknownEntity(EntityId),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Document is not valid JSON for the expected shape.
    #[error("Failed to parse combat configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds an unusable value.
    #[error("Invalid configuration value for {field}: {message}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}
