//! Damage pipeline and weapon damage computation.
//!
//! Pipeline for an incoming amount `D`:
//! ```text
//! ShieldDrain: shield -= min(D, shield); hull untouched; stop.
//! Normal:      s = min(D, shield); shield -= s; D -= s;
//!              if D > 0 { hp = max(0, hp - D) }
//! ```
//! A combatant whose hull reaches zero is deactivated in the same call.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::components::{Combatant, WeaponLoadout};
use crate::enums::DamageKind;
use crate::types::{Position, Velocity};

/// Capability the combat core needs from anything it can shoot at.
pub trait Target {
    fn position(&self) -> Position;
    fn is_active(&self) -> bool;
    fn hp(&self) -> f64;
    /// Run the damage pipeline once for `amount`.
    fn take_damage(&mut self, amount: f64, kind: DamageKind) -> DamageOutcome;
    fn select(&mut self);
    fn deselect(&mut self);
}

/// What one pipeline invocation did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageOutcome {
    /// Shield points removed.
    pub shield_damage: f64,
    /// Hull points removed.
    pub hull_damage: f64,
    /// This invocation took the target from active to destroyed.
    pub destroyed: bool,
}

impl DamageOutcome {
    pub fn total(&self) -> f64 {
        self.shield_damage + self.hull_damage
    }
}

impl Target for Combatant {
    fn position(&self) -> Position {
        self.position
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn hp(&self) -> f64 {
        self.hp
    }

    fn take_damage(&mut self, amount: f64, kind: DamageKind) -> DamageOutcome {
        if !self.active || !amount.is_finite() || amount <= 0.0 {
            return DamageOutcome::default();
        }
        self.ticks_since_damage = 0;

        let shield_damage = amount.min(self.shield).max(0.0);
        self.shield -= shield_damage;

        if kind == DamageKind::ShieldDrain {
            trace!(drained = shield_damage, shield = self.shield, "Shield drained");
            return DamageOutcome {
                shield_damage,
                hull_damage: 0.0,
                destroyed: false,
            };
        }

        let remaining = amount - shield_damage;
        let mut hull_damage = 0.0;
        if remaining > 0.0 {
            let before = self.hp;
            self.hp = (self.hp - remaining).max(0.0);
            hull_damage = before - self.hp;
        }

        let destroyed = self.hp <= 0.0;
        if destroyed {
            self.active = false;
            self.selected = false;
            self.velocity = Velocity::default();
        }

        DamageOutcome {
            shield_damage,
            hull_damage,
            destroyed,
        }
    }

    fn select(&mut self) {
        if self.active {
            self.selected = true;
        }
    }

    fn deselect(&mut self) {
        self.selected = false;
    }
}

/// Damage carried by one trigger pull.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VolleyDamage {
    Normal(f64),
    ShieldDrain(f64),
}

impl VolleyDamage {
    pub fn amount(&self) -> f64 {
        match self {
            VolleyDamage::Normal(d) | VolleyDamage::ShieldDrain(d) => *d,
        }
    }

    pub fn kind(&self) -> DamageKind {
        match self {
            VolleyDamage::Normal(_) => DamageKind::Normal,
            VolleyDamage::ShieldDrain(_) => DamageKind::ShieldDrain,
        }
    }
}

/// Sum of `count × base damage` over equipped lasers (or the innate weapon),
/// scaled by the ammo multiplier. Shield-drain ammo skips the multiplier.
pub fn volley_damage(loadout: &WeaponLoadout) -> VolleyDamage {
    let base = loadout.innate_damage.unwrap_or_else(|| {
        loadout
            .lasers
            .iter()
            .map(|(tier, count)| *count as f64 * tier.base_damage())
            .sum()
    });
    match loadout.ammo_tier.multiplier() {
        Some(multiplier) => VolleyDamage::Normal(base * multiplier),
        None => VolleyDamage::ShieldDrain(base),
    }
}
