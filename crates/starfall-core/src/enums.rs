//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// NPC behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiState {
    /// Following the patrol routine.
    #[default]
    Patrol,
    /// Suspicious: heading for the last seen position.
    Alert,
    /// Engaging a target.
    Attack,
    /// Disengaging at full speed.
    Flee,
}

/// Per-attacker combat session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// No target selected.
    #[default]
    Idle,
    /// Target selected, weapons cold.
    Engaged,
    /// Weapons hot, fire timers running.
    Firing,
}

/// Laser ammunition class. Acts as a damage multiplier, except `Sab`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AmmoTier {
    #[default]
    X1,
    X2,
    X3,
    X4,
    /// Shield-absorber rounds: drain shield, never touch hull.
    Sab,
}

impl AmmoTier {
    /// Damage multiplier. `None` for the shield-drain tier, which bypasses
    /// the multiplier path entirely.
    pub fn multiplier(self) -> Option<f64> {
        match self {
            AmmoTier::X1 => Some(1.0),
            AmmoTier::X2 => Some(2.0),
            AmmoTier::X3 => Some(3.0),
            AmmoTier::X4 => Some(4.0),
            AmmoTier::Sab => None,
        }
    }
}

/// Laser cannon model. Each equipped unit adds its base damage to a volley.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LaserTier {
    Lf1,
    Mp1,
    Lf2,
    Lf3,
}

impl LaserTier {
    pub fn base_damage(self) -> f64 {
        match self {
            LaserTier::Lf1 => 40.0,
            LaserTier::Mp1 => 60.0,
            LaserTier::Lf2 => 100.0,
            LaserTier::Lf3 => 150.0,
        }
    }
}

/// NPC type. Unrecognized names deserialize to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    Streuner,
    Lordakia,
    Saimon,
    Mordon,
    Devolarium,
    Sibelon,
    Kristallin,
    #[serde(other)]
    Unknown,
}

impl EnemyKind {
    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "streuner" => EnemyKind::Streuner,
            "lordakia" => EnemyKind::Lordakia,
            "saimon" => EnemyKind::Saimon,
            "mordon" => EnemyKind::Mordon,
            "devolarium" => EnemyKind::Devolarium,
            "sibelon" => EnemyKind::Sibelon,
            "kristallin" => EnemyKind::Kristallin,
            _ => EnemyKind::Unknown,
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnemyKind::Streuner => "Streuner",
            EnemyKind::Lordakia => "Lordakia",
            EnemyKind::Saimon => "Saimon",
            EnemyKind::Mordon => "Mordon",
            EnemyKind::Devolarium => "Devolarium",
            EnemyKind::Sibelon => "Sibelon",
            EnemyKind::Kristallin => "Kristallin",
            EnemyKind::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// How incoming damage is applied.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum DamageKind {
    /// Shield first, remainder to hull.
    #[default]
    Normal,
    /// Shield only. Hull is never touched.
    ShieldDrain,
}

/// Munition family, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MunitionKind {
    Laser,
    Missile,
}

/// Resource credited to the reward ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    Credits,
    Uridium,
    Honor,
    Experience,
}
