//! Kill rewards and pilot progression.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::LEVEL_THRESHOLDS;
use crate::enums::{EnemyKind, ResourceKind};
use crate::types::EntityId;

/// Static payout of one enemy type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTable {
    pub credits: u64,
    pub uridium: u64,
    pub honor: u64,
    pub experience: u64,
}

/// Payout for types missing from the table.
pub const DEFAULT_REWARD: RewardTable = RewardTable {
    credits: 100,
    uridium: 1,
    honor: 1,
    experience: 100,
};

/// Look up the payout for an enemy type.
pub fn reward_for(kind: EnemyKind) -> RewardTable {
    let (credits, uridium, honor, experience) = match kind {
        EnemyKind::Streuner => (400, 1, 2, 400),
        EnemyKind::Lordakia => (800, 2, 4, 800),
        EnemyKind::Saimon => (1_600, 4, 8, 1_600),
        EnemyKind::Mordon => (3_200, 8, 16, 3_200),
        EnemyKind::Devolarium => (6_400, 16, 32, 6_400),
        EnemyKind::Sibelon => (12_800, 32, 64, 12_800),
        EnemyKind::Kristallin => (25_600, 64, 128, 25_600),
        EnemyKind::Unknown => return DEFAULT_REWARD,
    };
    RewardTable {
        credits,
        uridium,
        honor,
        experience,
    }
}

/// Immutable result of a kill, consumed by the resource ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardRecord {
    pub target: EntityId,
    pub enemy: EnemyKind,
    pub credits: u64,
    pub uridium: u64,
    pub honor: u64,
    pub experience: u64,
    pub tick: u64,
}

impl RewardRecord {
    pub fn new(target: EntityId, enemy: EnemyKind, tick: u64) -> Self {
        let table = reward_for(enemy);
        Self {
            target,
            enemy,
            credits: table.credits,
            uridium: table.uridium,
            honor: table.honor,
            experience: table.experience,
            tick,
        }
    }

    /// Ledger entries in a fixed order.
    pub fn resources(&self) -> [(ResourceKind, u64); 4] {
        [
            (ResourceKind::Credits, self.credits),
            (ResourceKind::Uridium, self.uridium),
            (ResourceKind::Honor, self.honor),
            (ResourceKind::Experience, self.experience),
        ]
    }
}

/// A combatant destroyed by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillRecord {
    pub target: EntityId,
    pub attacker: EntityId,
    /// `None` when the player ship was destroyed.
    pub enemy: Option<EnemyKind>,
    pub tick: u64,
}

/// Highest level whose threshold `experience` meets.
pub fn level_for_experience(experience: u64) -> u32 {
    LEVEL_THRESHOLDS
        .iter()
        .take_while(|&&threshold| experience >= threshold)
        .count()
        .max(1) as u32
}

/// Accumulated experience and current level of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub experience: u64,
    pub level: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            experience: 0,
            level: 1,
        }
    }
}

impl Progression {
    /// Add experience. Returns the new level when a threshold was crossed;
    /// a level is reported once and never again.
    pub fn add_experience(&mut self, amount: u64) -> Option<u32> {
        self.experience = self.experience.saturating_add(amount);
        let level = level_for_experience(self.experience);
        if level > self.level {
            info!(level, experience = self.experience, "Level up");
            self.level = level;
            Some(level)
        } else {
            None
        }
    }
}
