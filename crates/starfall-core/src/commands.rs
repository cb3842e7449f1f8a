//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::AmmoTier;
use crate::types::EntityId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Fly straight to a point.
    MoveTo { x: f64, y: f64 },
    /// Select an enemy as the current target.
    SelectTarget { target: EntityId },
    /// Drop the current target and flush in-flight munitions.
    ClearTarget,
    /// Start firing lasers at the selected target.
    StartCombat,
    /// Stop firing; munitions in flight are flushed.
    StopCombat,
    /// Switch ammunition class.
    SelectAmmo { tier: AmmoTier },
    /// Launch a rocket at the selected target.
    LaunchMissile,
}
