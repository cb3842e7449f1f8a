//! Per-tick snapshot of combat state exposed to rendering and UI.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::CombatEvent;
use crate::rewards::{KillRecord, Progression, RewardRecord};
use crate::types::{EntityId, Position, SimTime};

/// Everything collaborators need after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub time: SimTime,
    pub player: Option<PlayerView>,
    pub npcs: Vec<NpcView>,
    /// Active projectiles and missiles, lasers first.
    pub munitions: Vec<MunitionView>,
    pub kills: Vec<KillRecord>,
    pub rewards: Vec<RewardRecord>,
    pub events: Vec<CombatEvent>,
}

/// Hull and shield readout of a combatant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HullView {
    pub hp: f64,
    pub max_hp: f64,
    pub shield: f64,
    pub max_shield: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: EntityId,
    pub position: Position,
    pub rotation: f64,
    pub hull: HullView,
    pub active: bool,
    pub session: SessionView,
    pub ammo_tier: AmmoTier,
    pub progression: Progression,
}

/// Combat session readout for skill bars and countdowns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionView {
    pub state: SessionState,
    pub target: Option<EntityId>,
    /// Ticks until the next volley may fire.
    pub fire_ready_in: u32,
    /// Ticks until the next rocket may launch.
    pub missile_ready_in: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcView {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Position,
    pub rotation: f64,
    pub hull: HullView,
    pub state: AiState,
    pub selected: bool,
}

/// One renderable munition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MunitionView {
    pub id: u64,
    pub kind: MunitionKind,
    pub position: Position,
    pub rotation: f64,
    pub visible: bool,
}
