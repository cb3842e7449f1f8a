//! ECS systems that operate on the combat world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` when
//! read-only). They hold no state of their own.

pub mod ai;
pub mod cleanup;
pub mod flight;
pub mod movement;
pub mod regeneration;
pub mod resolution;
pub mod snapshot;
pub mod target_loss;
pub mod weapons;

use starfall_core::events::CombatEvent;
use starfall_core::rewards::{KillRecord, RewardRecord};

/// Records produced during one tick, drained into the snapshot.
#[derive(Debug, Default)]
pub struct TickLog {
    pub events: Vec<CombatEvent>,
    pub kills: Vec<KillRecord>,
    pub rewards: Vec<RewardRecord>,
}

impl TickLog {
    pub fn take(&mut self) -> TickLog {
        std::mem::take(self)
    }
}
