//! Enemy-type behavior profiles.
//!
//! Each enemy kind starts from [`AiConfig::default`] and adjusts hull,
//! weaponry and temperament. [`resolve`] layers user overrides on top.

use starfall_core::config::{AiConfig, CombatConfig};
use starfall_core::enums::EnemyKind;

/// Built-in behavior profile for an enemy kind.
pub fn profile_for(kind: EnemyKind) -> AiConfig {
    let base = AiConfig::default();
    match kind {
        EnemyKind::Streuner => AiConfig {
            max_hp: 800.0,
            max_shield: 400.0,
            damage: 20.0,
            speed: 3.2,
            aggressive: false,
            ..base
        },
        EnemyKind::Lordakia => AiConfig {
            max_hp: 2_000.0,
            max_shield: 2_000.0,
            damage: 80.0,
            aggressive: true,
            ..base
        },
        EnemyKind::Saimon => AiConfig {
            max_hp: 6_000.0,
            max_shield: 3_000.0,
            damage: 200.0,
            aggressive: true,
            alert_range: Some(600.0),
            ..base
        },
        EnemyKind::Mordon => AiConfig {
            max_hp: 20_000.0,
            max_shield: 10_000.0,
            damage: 500.0,
            speed: 2.0,
            aggressive: false,
            ..base
        },
        EnemyKind::Devolarium => AiConfig {
            max_hp: 100_000.0,
            max_shield: 100_000.0,
            damage: 1_200.0,
            aggressive: true,
            missile_rate_ticks: Some(300),
            ..base
        },
        EnemyKind::Sibelon => AiConfig {
            max_hp: 200_000.0,
            max_shield: 200_000.0,
            damage: 3_000.0,
            speed: 1.0,
            aggressive: false,
            missile_rate_ticks: Some(240),
            ..base
        },
        EnemyKind::Kristallin => AiConfig {
            max_hp: 50_000.0,
            max_shield: 40_000.0,
            damage: 1_000.0,
            aggressive: true,
            alert_range: Some(650.0),
            ..base
        },
        EnemyKind::Unknown => base,
    }
}

/// Effective configuration for `kind`: the configured override when one
/// exists, otherwise the built-in profile.
pub fn resolve(kind: EnemyKind, config: &CombatConfig) -> AiConfig {
    config
        .ai_overrides
        .get(&kind)
        .cloned()
        .unwrap_or_else(|| profile_for(kind))
}
