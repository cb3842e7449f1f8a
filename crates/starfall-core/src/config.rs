//! Tunable configuration for NPC behavior and combat resolution.
//!
//! Every field has a default, so a missing or partial document always
//! yields a complete configuration object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::*;
use crate::enums::EnemyKind;
use crate::error::ConfigError;

/// Behavior parameters of one NPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Circular sight radius around the NPC (no occlusion).
    pub detection_range: f64,
    /// Maximum distance at which the NPC fires.
    pub attack_range: f64,
    /// Preferred stand-off distance from the target.
    pub min_distance: f64,
    /// Attack the player on sight.
    pub aggressive: bool,
    /// Attack whoever damages this NPC.
    pub retaliate: bool,
    /// Hull ratio at or below which the NPC flees.
    pub flee_threshold: f64,
    pub flee_duration_ticks: u32,
    pub alert_duration_ticks: u32,
    /// Partial-detection radius beyond `detection_range` that puts an
    /// aggressive NPC on alert. `None` disables the transition.
    pub alert_range: Option<f64>,
    /// Ticks an attacking NPC pursues the last seen position before giving up.
    pub lost_contact_ticks: u32,
    pub fire_rate_ticks: u32,
    pub damage: f64,
    pub projectile_speed: f64,
    pub strafe_interval_ticks: u32,
    pub strafe_speed_factor: f64,
    pub jitter_interval_ticks: u32,
    pub jitter_magnitude: f64,
    /// Ticks between rocket launches. `None` for NPCs without rockets.
    pub missile_rate_ticks: Option<u32>,
    pub speed: f64,
    pub max_hp: f64,
    pub max_shield: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            detection_range: NPC_DETECTION_RANGE,
            attack_range: NPC_ATTACK_RANGE,
            min_distance: NPC_MIN_DISTANCE,
            aggressive: false,
            retaliate: true,
            flee_threshold: NPC_FLEE_THRESHOLD,
            flee_duration_ticks: NPC_FLEE_DURATION_TICKS,
            alert_duration_ticks: NPC_ALERT_DURATION_TICKS,
            alert_range: None,
            lost_contact_ticks: NPC_LOST_CONTACT_TICKS,
            fire_rate_ticks: NPC_FIRE_RATE_TICKS,
            damage: 20.0,
            projectile_speed: NPC_PROJECTILE_SPEED,
            strafe_interval_ticks: NPC_STRAFE_INTERVAL_TICKS,
            strafe_speed_factor: NPC_STRAFE_SPEED_FACTOR,
            jitter_interval_ticks: NPC_JITTER_INTERVAL_TICKS,
            jitter_magnitude: NPC_JITTER_MAGNITUDE,
            missile_rate_ticks: None,
            speed: 3.0,
            max_hp: 800.0,
            max_shield: 400.0,
        }
    }
}

impl AiConfig {
    /// Parse a (possibly partial) JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fire_rate_ticks == 0 {
            return Err(ConfigError::Invalid {
                field: "fire_rate_ticks",
                message: "must be at least 1".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.flee_threshold) {
            return Err(ConfigError::Invalid {
                field: "flee_threshold",
                message: format!("{} is outside [0, 1]", self.flee_threshold),
            });
        }
        Ok(())
    }
}

/// Simulation-wide combat tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub tick_rate: u32,
    pub laser_fire_rate_ticks: u32,
    pub laser_projectile_speed: f64,
    pub projectile_lifetime_ticks: u32,
    pub projectile_radius: f64,
    pub volley_spread: f64,
    pub ammo_per_volley: u32,
    pub missile_speed: f64,
    pub missile_max_speed: f64,
    pub missile_homing_blend: f64,
    pub missile_lifetime_ticks: u32,
    pub missile_damage: f64,
    pub missile_radius: f64,
    pub missile_cooldown_ticks: u32,
    pub shield_regen_delay_ticks: u32,
    pub shield_regen_fraction_per_tick: f64,
    pub repair_delay_ticks: u32,
    pub repair_fraction_per_tick: f64,
    pub npc_patrol_regen_fraction_per_tick: f64,
    /// Credit the attacker's shield with what shield-drain rounds remove.
    pub shield_drain_transfer: bool,
    /// Per-type behavior overrides. Types without an entry use their
    /// built-in profile.
    pub ai_overrides: BTreeMap<EnemyKind, AiConfig>,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            laser_fire_rate_ticks: LASER_FIRE_RATE_TICKS,
            laser_projectile_speed: LASER_PROJECTILE_SPEED,
            projectile_lifetime_ticks: PROJECTILE_LIFETIME_TICKS,
            projectile_radius: PROJECTILE_RADIUS,
            volley_spread: VOLLEY_SPREAD,
            ammo_per_volley: AMMO_PER_VOLLEY,
            missile_speed: MISSILE_SPEED,
            missile_max_speed: MISSILE_MAX_SPEED,
            missile_homing_blend: MISSILE_HOMING_BLEND,
            missile_lifetime_ticks: MISSILE_LIFETIME_TICKS,
            missile_damage: MISSILE_DAMAGE,
            missile_radius: MISSILE_RADIUS,
            missile_cooldown_ticks: MISSILE_COOLDOWN_TICKS,
            shield_regen_delay_ticks: SHIELD_REGEN_DELAY_TICKS,
            shield_regen_fraction_per_tick: SHIELD_REGEN_FRACTION_PER_TICK,
            repair_delay_ticks: REPAIR_DELAY_TICKS,
            repair_fraction_per_tick: REPAIR_FRACTION_PER_TICK,
            npc_patrol_regen_fraction_per_tick: NPC_PATROL_REGEN_FRACTION_PER_TICK,
            shield_drain_transfer: true,
            ai_overrides: BTreeMap::new(),
        }
    }
}

impl CombatConfig {
    /// Parse a (possibly partial) JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CombatConfig = serde_json::from_str(json)?;
        config.validate()?;
        debug!(
            overrides = config.ai_overrides.len(),
            tick_rate = config.tick_rate,
            "Loaded combat configuration"
        );
        Ok(config)
    }

    /// Convert a wall-clock duration to whole ticks at this tick rate.
    pub fn ticks_from_secs(&self, secs: f64) -> u32 {
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        (secs * self.tick_rate as f64).round() as u32
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_rate",
                message: "must be at least 1".into(),
            });
        }
        if self.laser_fire_rate_ticks == 0 {
            return Err(ConfigError::Invalid {
                field: "laser_fire_rate_ticks",
                message: "must be at least 1".into(),
            });
        }
        if self.missile_max_speed < self.missile_speed {
            return Err(ConfigError::Invalid {
                field: "missile_max_speed",
                message: format!(
                    "{} is below missile_speed {}",
                    self.missile_max_speed, self.missile_speed
                ),
            });
        }
        for ai in self.ai_overrides.values() {
            ai.validate()?;
        }
        Ok(())
    }
}
