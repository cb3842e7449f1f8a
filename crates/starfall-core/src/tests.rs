use proptest::prelude::*;

use crate::commands::PlayerCommand;
use crate::components::{AmmoCount, Combatant, WeaponLoadout};
use crate::config::{AiConfig, CombatConfig};
use crate::damage::{volley_damage, Target, VolleyDamage};
use crate::enums::*;
use crate::error::{CombatError, ConfigError};
use crate::events::Notice;
use crate::rewards::*;
use crate::types::{EntityId, Position, Velocity};

fn combatant(hp: f64, shield: f64) -> Combatant {
    let mut c = Combatant::new(Position::default(), hp, shield, 3.0);
    c.hp = hp;
    c.shield = shield;
    c
}

// ---- Damage pipeline ----

#[test]
fn test_shield_absorbs_before_hull() {
    let mut c = Combatant::new(Position::default(), 50.0, 30.0, 3.0);
    let outcome = c.take_damage(40.0, DamageKind::Normal);
    assert_eq!(c.shield, 0.0);
    assert_eq!(c.hp, 40.0);
    assert_eq!(outcome.shield_damage, 30.0);
    assert_eq!(outcome.hull_damage, 10.0);
    assert!(!outcome.destroyed);
}

#[test]
fn test_shield_drain_never_touches_hull() {
    let mut c = Combatant::new(Position::default(), 50.0, 30.0, 3.0);
    let outcome = c.take_damage(40.0, DamageKind::ShieldDrain);
    assert_eq!(c.shield, 0.0);
    assert_eq!(c.hp, 50.0);
    assert_eq!(outcome.hull_damage, 0.0);

    // Shield already gone: still no hull damage
    let outcome = c.take_damage(40.0, DamageKind::ShieldDrain);
    assert_eq!(c.hp, 50.0);
    assert_eq!(outcome.total(), 0.0);
}

#[test]
fn test_lethal_damage_deactivates_once() {
    let mut c = combatant(10.0, 0.0);
    c.select();
    let first = c.take_damage(25.0, DamageKind::Normal);
    assert!(first.destroyed);
    assert_eq!(c.hp, 0.0);
    assert!(!c.is_active());
    assert!(!c.selected, "destroyed ship should be deselected");

    let second = c.take_damage(25.0, DamageKind::Normal);
    assert!(!second.destroyed, "inactive target cannot be destroyed twice");
    assert_eq!(second.total(), 0.0);
}

#[test]
fn test_damage_resets_regen_counter() {
    let mut c = combatant(100.0, 100.0);
    c.ticks_since_damage = 500;
    c.take_damage(1.0, DamageKind::Normal);
    assert_eq!(c.ticks_since_damage, 0);
}

#[test]
fn test_non_positive_damage_is_ignored() {
    let mut c = combatant(100.0, 50.0);
    c.ticks_since_damage = 7;
    assert_eq!(c.take_damage(0.0, DamageKind::Normal).total(), 0.0);
    assert_eq!(c.take_damage(-5.0, DamageKind::Normal).total(), 0.0);
    assert_eq!(c.take_damage(f64::NAN, DamageKind::Normal).total(), 0.0);
    assert_eq!(c.ticks_since_damage, 7);
}

proptest! {
    #[test]
    fn prop_normal_damage_is_conserved(
        hp in 1.0f64..10_000.0,
        shield in 0.0f64..10_000.0,
        damage in 0.0f64..30_000.0,
    ) {
        let mut c = combatant(hp, shield);
        let outcome = c.take_damage(damage, DamageKind::Normal);
        let expected = damage.min(hp + shield);
        prop_assert!((outcome.total() - expected).abs() < 1e-6);
        prop_assert!(c.hp >= 0.0 && c.hp <= c.max_hp);
        prop_assert!(c.shield >= 0.0 && c.shield <= c.max_shield);
    }

    #[test]
    fn prop_shield_drain_never_reduces_hp(
        hp in 1.0f64..10_000.0,
        shield in 0.0f64..10_000.0,
        damage in 0.0f64..30_000.0,
    ) {
        let mut c = combatant(hp, shield);
        c.take_damage(damage, DamageKind::ShieldDrain);
        prop_assert_eq!(c.hp, hp);
        prop_assert!(c.is_active());
    }
}

// ---- Volley damage ----

#[test]
fn test_volley_damage_sums_equipped_lasers() {
    let loadout = WeaponLoadout::empty()
        .with_lasers(LaserTier::Lf1, 2)
        .with_lasers(LaserTier::Lf3, 1);
    assert_eq!(volley_damage(&loadout), VolleyDamage::Normal(230.0));
}

#[test]
fn test_volley_damage_applies_ammo_multiplier() {
    let mut loadout = WeaponLoadout::empty().with_lasers(LaserTier::Mp1, 3);
    loadout.ammo_tier = AmmoTier::X3;
    assert_eq!(volley_damage(&loadout), VolleyDamage::Normal(540.0));
}

#[test]
fn test_shield_drain_bypasses_multiplier() {
    let mut loadout = WeaponLoadout::empty().with_lasers(LaserTier::Lf1, 2);
    loadout.ammo_tier = AmmoTier::Sab;
    let damage = volley_damage(&loadout);
    assert_eq!(damage, VolleyDamage::ShieldDrain(80.0));
    assert_eq!(damage.kind(), DamageKind::ShieldDrain);
}

#[test]
fn test_npc_loadout_always_armed() {
    let config = AiConfig::default();
    let loadout = WeaponLoadout::for_npc(&config);
    assert!(loadout.has_weapon());
    assert!(loadout.ammo_for(AmmoTier::X1).has(1));
    assert_eq!(volley_damage(&loadout).amount(), config.damage);
}

// ---- Ammunition ----

#[test]
fn test_ammo_consume_is_all_or_nothing() {
    let mut count = AmmoCount::Limited(1);
    assert!(!count.consume(2));
    assert_eq!(count, AmmoCount::Limited(1));
    assert!(count.consume(1));
    assert_eq!(count, AmmoCount::Limited(0));
    assert!(!count.has(1));

    let mut unlimited = AmmoCount::Unlimited;
    assert!(unlimited.consume(1000));
    assert_eq!(unlimited, AmmoCount::Unlimited);
}

#[test]
fn test_unstocked_tier_is_empty() {
    let loadout = WeaponLoadout::empty();
    assert_eq!(loadout.ammo_for(AmmoTier::X4), AmmoCount::Limited(0));
    assert!(!loadout.has_weapon());
}

// ---- Rewards and levels ----

#[test]
fn test_unknown_enemy_gets_default_reward() {
    assert_eq!(reward_for(EnemyKind::Unknown), DEFAULT_REWARD);
    assert_eq!(EnemyKind::from_name("Cubikon"), EnemyKind::Unknown);
    assert_eq!(EnemyKind::from_name(" lordakia "), EnemyKind::Lordakia);
}

#[test]
fn test_reward_record_matches_table() {
    let record = RewardRecord::new(EntityId(7), EnemyKind::Saimon, 12);
    let table = reward_for(EnemyKind::Saimon);
    assert_eq!(record.credits, table.credits);
    assert_eq!(record.experience, table.experience);
    let resources = record.resources();
    assert_eq!(resources[0], (ResourceKind::Credits, table.credits));
    assert_eq!(resources[3], (ResourceKind::Experience, table.experience));
}

#[test]
fn test_level_for_experience() {
    assert_eq!(level_for_experience(0), 1);
    assert_eq!(level_for_experience(9_999), 1);
    assert_eq!(level_for_experience(10_000), 2);
    assert_eq!(level_for_experience(39_999), 3);
    assert_eq!(level_for_experience(u64::MAX), 16);
}

#[test]
fn test_level_up_reported_once_per_crossing() {
    let mut progression = Progression::default();
    assert_eq!(progression.add_experience(5_000), None);
    assert_eq!(progression.add_experience(5_000), Some(2));
    assert_eq!(progression.add_experience(1), None);
    // Jumping two thresholds reports the highest level reached
    assert_eq!(progression.add_experience(40_000), Some(4));
    assert_eq!(progression.level, 4);
}

// ---- Configuration ----

#[test]
fn test_partial_ai_config_falls_back_to_defaults() {
    let config = AiConfig::from_json(r#"{ "aggressive": true, "detection_range": 550.0 }"#)
        .expect("partial config should parse");
    assert!(config.aggressive);
    assert_eq!(config.detection_range, 550.0);
    assert_eq!(config.min_distance, AiConfig::default().min_distance);
    assert_eq!(AiConfig::from_json("{}").unwrap(), AiConfig::default());
}

#[test]
fn test_invalid_ai_config_is_rejected() {
    let err = AiConfig::from_json(r#"{ "fire_rate_ticks": 0 }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "fire_rate_ticks",
            ..
        }
    ));
    assert!(matches!(
        AiConfig::from_json("not json").unwrap_err(),
        ConfigError::Parse(_)
    ));
}

#[test]
fn test_combat_config_overrides_by_enemy_kind() {
    let json = r#"{
        "missile_damage": 1500.0,
        "ai_overrides": { "Mordon": { "aggressive": true } }
    }"#;
    let config = CombatConfig::from_json(json).unwrap();
    assert_eq!(config.missile_damage, 1500.0);
    assert!(config.ai_overrides[&EnemyKind::Mordon].aggressive);
    assert_eq!(config.tick_rate, 60);
}

#[test]
fn test_ticks_from_secs() {
    let config = CombatConfig::default();
    assert_eq!(config.ticks_from_secs(1.0), 60);
    assert_eq!(config.ticks_from_secs(2.5), 150);
    assert_eq!(config.ticks_from_secs(-1.0), 0);
    assert_eq!(config.ticks_from_secs(f64::NAN), 0);
}

// ---- Geometry ----

#[test]
fn test_direction_to_same_point_is_zero() {
    let p = Position::new(5.0, 5.0);
    assert_eq!(p.direction_to(&p), Velocity::default());
    assert_eq!(Velocity::default().with_speed(10.0), Velocity::default());
}

#[test]
fn test_direction_is_unit_length() {
    let a = Position::new(0.0, 0.0);
    let b = Position::new(3.0, 4.0);
    let dir = a.direction_to(&b);
    assert!((dir.speed() - 1.0).abs() < 1e-12);
    assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
}

// ---- Serde ----

#[test]
fn test_command_serde() {
    let commands = vec![
        PlayerCommand::MoveTo { x: 1.0, y: 2.0 },
        PlayerCommand::SelectTarget {
            target: EntityId(42),
        },
        PlayerCommand::SelectAmmo {
            tier: AmmoTier::Sab,
        },
        PlayerCommand::LaunchMissile,
    ];
    for command in commands {
        let json = serde_json::to_string(&command).unwrap();
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(command, back);
    }
}

#[test]
fn test_unknown_enemy_name_deserializes() {
    let kind: EnemyKind = serde_json::from_str("\"Boss Cubikon\"").unwrap();
    assert_eq!(kind, EnemyKind::Unknown);
}

#[test]
fn test_notice_messages() {
    assert_eq!(
        Notice::from(CombatError::NoWeaponEquipped).to_string(),
        "No weapon equipped"
    );
    assert_eq!(
        Notice::Refused(CombatError::OutOfAmmo(AmmoTier::X2)).to_string(),
        "Out of X2 ammunition"
    );
    assert_eq!(
        Notice::from(CombatError::OutOfRange).to_string(),
        "Target out of range"
    );
    assert_eq!(
        Notice::EnemyDestroyed {
            kind: EnemyKind::Streuner
        }
        .to_string(),
        "Streuner destroyed"
    );
}
