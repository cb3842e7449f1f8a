//! ECS components for hecs entities.
//!
//! Components are plain data. Behavior lives in the damage pipeline, the
//! AI FSM and the simulation systems.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::constants::*;
use crate::enums::*;
use crate::types::{Position, Velocity};

/// Any ship able to deal and receive damage.
///
/// `0 <= hp <= max_hp` and `0 <= shield <= max_shield` hold at all times.
/// An inactive combatant is never a valid target or attacker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub position: Position,
    pub velocity: Velocity,
    /// Facing in radians.
    pub rotation: f64,
    /// Cruise speed (units/tick).
    pub speed: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub shield: f64,
    pub max_shield: f64,
    pub active: bool,
    /// Hit circle radius.
    pub radius: f64,
    pub attack_range: f64,
    /// Whether some attacker currently has this ship selected.
    pub selected: bool,
    /// Ticks since the last damage taken, drives regeneration.
    pub ticks_since_damage: u32,
}

impl Combatant {
    pub fn new(position: Position, max_hp: f64, max_shield: f64, speed: f64) -> Self {
        let max_hp = max_hp.max(1.0);
        let max_shield = max_shield.max(0.0);
        Self {
            position,
            velocity: Velocity::default(),
            rotation: 0.0,
            speed,
            hp: max_hp,
            max_hp,
            shield: max_shield,
            max_shield,
            active: true,
            radius: COMBATANT_RADIUS,
            attack_range: PLAYER_ATTACK_RANGE,
            selected: false,
            ticks_since_damage: 0,
        }
    }

    /// Hull fraction in `[0, 1]`.
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp <= 0.0 {
            return 0.0;
        }
        (self.hp / self.max_hp).clamp(0.0, 1.0)
    }
}

/// Remaining rounds of one ammunition class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmmoCount {
    Unlimited,
    Limited(u32),
}

impl AmmoCount {
    /// Whether `amount` rounds can be drawn.
    pub fn has(self, amount: u32) -> bool {
        match self {
            AmmoCount::Unlimited => true,
            AmmoCount::Limited(n) => n >= amount && n > 0,
        }
    }

    /// Draw `amount` rounds. Nothing is drawn unless all of them are there.
    pub fn consume(&mut self, amount: u32) -> bool {
        match self {
            AmmoCount::Unlimited => true,
            AmmoCount::Limited(n) => {
                if *n >= amount && *n > 0 {
                    *n -= amount;
                    true
                } else {
                    false
                }
            }
        }
    }
}

impl Default for AmmoCount {
    fn default() -> Self {
        AmmoCount::Limited(0)
    }
}

/// Equipped weapons and ammunition of a combatant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponLoadout {
    /// Equipped laser cannons by model.
    pub lasers: BTreeMap<LaserTier, u32>,
    /// Built-in weapon damage. NPCs always have one, player ships never do.
    pub innate_damage: Option<f64>,
    /// Selected ammunition class.
    pub ammo_tier: AmmoTier,
    /// Remaining rounds per ammunition class.
    pub ammo: BTreeMap<AmmoTier, AmmoCount>,
    /// Remaining rockets.
    pub rockets: AmmoCount,
    /// Ticks between volleys; independent of ammo class.
    pub fire_rate_ticks: u32,
    /// Projectile speed; independent of ammo class.
    pub projectile_speed: f64,
    /// Ticks between NPC rocket launches, if this loadout carries rockets
    /// fired by the AI.
    pub missile_rate_ticks: Option<u32>,
}

impl WeaponLoadout {
    /// Player loadout with no lasers and no ammunition.
    pub fn empty() -> Self {
        Self {
            lasers: BTreeMap::new(),
            innate_damage: None,
            ammo_tier: AmmoTier::X1,
            ammo: BTreeMap::new(),
            rockets: AmmoCount::Limited(0),
            fire_rate_ticks: LASER_FIRE_RATE_TICKS,
            projectile_speed: LASER_PROJECTILE_SPEED,
            missile_rate_ticks: None,
        }
    }

    /// Always-available NPC weapon built from an AI configuration.
    pub fn for_npc(config: &AiConfig) -> Self {
        let mut ammo = BTreeMap::new();
        ammo.insert(AmmoTier::X1, AmmoCount::Unlimited);
        Self {
            lasers: BTreeMap::new(),
            innate_damage: Some(config.damage),
            ammo_tier: AmmoTier::X1,
            ammo,
            rockets: if config.missile_rate_ticks.is_some() {
                AmmoCount::Unlimited
            } else {
                AmmoCount::Limited(0)
            },
            fire_rate_ticks: config.fire_rate_ticks.max(1),
            projectile_speed: config.projectile_speed,
            missile_rate_ticks: config.missile_rate_ticks,
        }
    }

    pub fn with_lasers(mut self, tier: LaserTier, count: u32) -> Self {
        self.lasers.insert(tier, count);
        self
    }

    pub fn with_ammo(mut self, tier: AmmoTier, count: AmmoCount) -> Self {
        self.ammo.insert(tier, count);
        self
    }

    pub fn with_rockets(mut self, count: AmmoCount) -> Self {
        self.rockets = count;
        self
    }

    /// Total number of equipped laser cannons.
    pub fn equipped_count(&self) -> u32 {
        self.lasers.values().sum()
    }

    /// Whether a volley can be fired at all, ammunition aside.
    pub fn has_weapon(&self) -> bool {
        self.innate_damage.is_some() || self.equipped_count() > 0
    }

    /// Remaining rounds of a class. Classes never stocked count as empty.
    pub fn ammo_for(&self, tier: AmmoTier) -> AmmoCount {
        self.ammo.get(&tier).copied().unwrap_or_default()
    }
}

/// Short-term memory and countdowns of an NPC brain. Timers are tick counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiBrain {
    pub state: AiState,
    /// Last known target coordinates, kept after sight is lost.
    pub last_seen: Option<Position>,
    pub alert_timer: u32,
    /// Lost-contact countdown while attacking without sight.
    pub attack_cooldown: u32,
    pub flee_timer: u32,
    pub strafe_timer: u32,
    /// +1.0 or -1.0.
    pub strafe_sign: f64,
    pub jitter_timer: u32,
    pub jitter: f64,
    /// Angle along the patrol orbit.
    pub patrol_phase: f64,
    /// Anchor of the patrol routine.
    pub home: Position,
}

impl AiBrain {
    pub fn new(home: Position) -> Self {
        Self {
            state: AiState::Patrol,
            last_seen: None,
            alert_timer: 0,
            attack_cooldown: 0,
            flee_timer: 0,
            strafe_timer: 0,
            strafe_sign: 1.0,
            jitter_timer: 0,
            jitter: 0.0,
            patrol_phase: 0.0,
            home,
        }
    }
}

/// NPC behavior controller. The sole mutator of its own combatant's motion,
/// rotation and target.
#[derive(Debug, Clone)]
pub struct AiController {
    pub config: AiConfig,
    pub brain: AiBrain,
    /// Weak reference, validated against the target's `active` flag on use.
    pub target: Option<hecs::Entity>,
    /// Attacker that damaged this NPC since the last evaluation.
    pub provoked_by: Option<hecs::Entity>,
}

impl AiController {
    pub fn new(config: AiConfig, home: Position) -> Self {
        Self {
            config,
            brain: AiBrain::new(home),
            target: None,
            provoked_by: None,
        }
    }
}

/// Per-attacker engagement state, shared by player and AI attackers.
#[derive(Debug, Clone, Default)]
pub struct CombatSession {
    pub state: SessionState,
    pub target: Option<hecs::Entity>,
    /// Ticks spent firing since the last volley or since entering Firing.
    pub fire_timer: u32,
    /// Ticks until the next rocket may launch.
    pub missile_timer: u32,
    /// Out-of-ammo notice already sent for the current shortage.
    pub ammo_warning_sent: bool,
}

/// Marks the player-controlled ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerShip {
    /// Pending MoveTo order.
    pub destination: Option<Position>,
}

/// Marks a non-player combatant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Npc {
    pub kind: EnemyKind,
}
