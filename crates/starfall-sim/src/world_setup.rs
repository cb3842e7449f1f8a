//! Entity spawn factories for the combat world.
//!
//! Creates the player ship and NPCs with their component bundles.

use hecs::World;

use starfall_core::components::*;
use starfall_core::config::CombatConfig;
use starfall_core::constants::*;
use starfall_core::enums::EnemyKind;
use starfall_core::rewards::Progression;
use starfall_core::types::Position;

use starfall_ai::profiles;

/// Spawn the player ship. Laser cadence and projectile speed come from
/// `config`; everything else from `loadout`.
pub fn spawn_player(
    world: &mut World,
    position: Position,
    mut loadout: WeaponLoadout,
    config: &CombatConfig,
) -> hecs::Entity {
    loadout.fire_rate_ticks = config.laser_fire_rate_ticks.max(1);
    loadout.projectile_speed = config.laser_projectile_speed;
    let combatant = Combatant::new(position, PLAYER_MAX_HP, PLAYER_MAX_SHIELD, PLAYER_SPEED);
    world.spawn((
        PlayerShip::default(),
        combatant,
        loadout,
        CombatSession::default(),
        Progression::default(),
    ))
}

/// Spawn an NPC of `kind`, configured from its profile or the override in
/// `config`. The spawn point anchors its patrol.
pub fn spawn_npc(
    world: &mut World,
    kind: EnemyKind,
    position: Position,
    config: &CombatConfig,
) -> hecs::Entity {
    let ai = profiles::resolve(kind, config);
    let mut combatant = Combatant::new(position, ai.max_hp, ai.max_shield, ai.speed);
    combatant.attack_range = ai.attack_range;
    let loadout = WeaponLoadout::for_npc(&ai);

    world.spawn((
        Npc { kind },
        combatant,
        loadout,
        CombatSession::default(),
        AiController::new(ai, position),
    ))
}
