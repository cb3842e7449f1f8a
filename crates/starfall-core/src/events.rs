//! Events emitted by the simulation for audio, UI and persistence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::error::CombatError;
use crate::types::EntityId;

/// Per-tick combat log, included in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A laser volley (or a single NPC shot) left the barrel.
    VolleyFired {
        attacker: EntityId,
        target: EntityId,
        damage: f64,
        kind: DamageKind,
    },
    /// A rocket was launched.
    MissileLaunched { attacker: EntityId, target: EntityId },
    /// Summed damage of one attacker landed on one target in a resolution pass.
    Hit {
        attacker: EntityId,
        target: EntityId,
        kind: DamageKind,
        shield_damage: f64,
        hull_damage: f64,
    },
    /// A combatant reached zero hull.
    Destroyed { target: EntityId, attacker: EntityId },
    /// An NPC changed behavior state.
    AiTransition {
        npc: EntityId,
        from: AiState,
        to: AiState,
    },
    /// An attacker's combat session changed state.
    SessionChanged {
        attacker: EntityId,
        from: SessionState,
        to: SessionState,
    },
    /// The player reached a new level.
    LevelUp { level: u32 },
}

/// Fire-and-forget sound triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    LaserFire,
    MissileLaunch,
    Hit,
    Explosion,
}

/// User-facing message for the notification sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A player action was refused.
    Refused(CombatError),
    /// An enemy was destroyed by the player.
    EnemyDestroyed { kind: EnemyKind },
    /// The player reached a new level.
    LevelUp { level: u32 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Refused(err) => write!(f, "{err}"),
            Notice::EnemyDestroyed { kind } => write!(f, "{kind} destroyed"),
            Notice::LevelUp { level } => write!(f, "Level up! You reached level {level}"),
        }
    }
}

impl From<CombatError> for Notice {
    fn from(err: CombatError) -> Self {
        Notice::Refused(err)
    }
}
