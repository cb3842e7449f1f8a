//! Weapon system: fire timers, ammunition bookkeeping, volley and rocket
//! spawning.
//!
//! A player volley is two cosmetic lasers offset to either side of the
//! ship plus one invisible shot from the ship itself that carries the
//! whole damage. NPCs fire a single direct laser.

use hecs::{Entity, World};
use tracing::debug;

use starfall_core::components::{Combatant, CombatSession, PlayerShip, WeaponLoadout};
use starfall_core::config::CombatConfig;
use starfall_core::damage::{volley_damage, VolleyDamage};
use starfall_core::enums::{DamageKind, MunitionKind, SessionState};
use starfall_core::error::{CombatError, Result};
use starfall_core::events::{AudioCue, CombatEvent, Notice};
use starfall_core::types::{EntityId, Position, Velocity};

use crate::munitions::{NewMunition, MunitionStore};
use crate::sinks::{AudioCueSink, NotificationSink};

/// An attacker whose fire timer has run out this tick.
struct ReadyWeapon {
    attacker: Entity,
    target: Entity,
    player: bool,
}

/// Where and what a trigger pull fires.
struct Volley {
    attacker: Entity,
    target: Entity,
    origin: Position,
    aim: Position,
    speed: f64,
    damage: VolleyDamage,
}

fn live_position(world: &World, entity: Entity) -> Option<Position> {
    world
        .get::<&Combatant>(entity)
        .ok()
        .filter(|c| c.active)
        .map(|c| c.position)
}

/// Run the weapon system for one tick.
pub fn run(
    world: &mut World,
    munitions: &mut MunitionStore,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
    notifications: &mut dyn NotificationSink,
    audio: &mut dyn AudioCueSink,
) {
    let mut ready: Vec<ReadyWeapon> = Vec::new();
    let mut rockets: Vec<Entity> = Vec::new();

    for (entity, (combatant, loadout, session, player)) in world.query_mut::<(
        &Combatant,
        &WeaponLoadout,
        &mut CombatSession,
        Option<&PlayerShip>,
    )>() {
        session.missile_timer = session.missile_timer.saturating_sub(1);
        if !combatant.active || session.state != SessionState::Firing {
            continue;
        }
        let Some(target) = session.target else {
            continue;
        };

        session.fire_timer = session.fire_timer.saturating_add(1);
        if session.fire_timer >= loadout.fire_rate_ticks.max(1) {
            ready.push(ReadyWeapon {
                attacker: entity,
                target,
                player: player.is_some(),
            });
        }
        if player.is_none() && loadout.missile_rate_ticks.is_some() && session.missile_timer == 0
        {
            rockets.push(entity);
        }
    }

    for weapon in ready {
        fire_lasers(world, munitions, config, events, notifications, audio, weapon);
    }

    for attacker in rockets {
        if let Err(err) = launch_missile(world, munitions, config, events, audio, attacker) {
            debug!(attacker = ?EntityId::from(attacker), %err, "NPC rocket withheld");
        }
    }
}

fn fire_lasers(
    world: &mut World,
    munitions: &mut MunitionStore,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
    notifications: &mut dyn NotificationSink,
    audio: &mut dyn AudioCueSink,
    weapon: ReadyWeapon,
) {
    let Some(aim) = live_position(world, weapon.target) else {
        return;
    };
    let Some((origin, range)) = world
        .get::<&Combatant>(weapon.attacker)
        .ok()
        .map(|c| (c.position, c.attack_range))
    else {
        return;
    };
    if origin.distance_to(&aim) > range {
        return;
    }

    let drawn = draw_ammunition(world, config, weapon.attacker);
    let Ok(mut session) = world.get::<&mut CombatSession>(weapon.attacker) else {
        return;
    };
    let (damage, speed) = match drawn {
        Ok(drawn) => drawn,
        Err(err) => {
            // One notice per shortage; cleared when a volley goes out.
            if weapon.player && !session.ammo_warning_sent {
                session.ammo_warning_sent = true;
                notifications.notify(&Notice::from(err));
            }
            return;
        }
    };
    session.fire_timer = 0;
    session.ammo_warning_sent = false;
    drop(session);

    let volley = Volley {
        attacker: weapon.attacker,
        target: weapon.target,
        origin,
        aim,
        speed,
        damage,
    };
    if weapon.player {
        spawn_twin_volley(munitions, config, &volley);
    } else {
        spawn_direct_shot(munitions, config, &volley);
    }

    events.push(CombatEvent::VolleyFired {
        attacker: weapon.attacker.into(),
        target: weapon.target.into(),
        damage: damage.amount(),
        kind: damage.kind(),
    });
    audio.play(AudioCue::LaserFire);
}

/// Draw one trigger pull's worth of ammunition. Nothing is drawn on
/// failure.
fn draw_ammunition(
    world: &World,
    config: &CombatConfig,
    attacker: Entity,
) -> Result<(VolleyDamage, f64)> {
    let mut loadout = world
        .get::<&mut WeaponLoadout>(attacker)
        .map_err(|_| CombatError::UnknownEntity(attacker.into()))?;
    if !loadout.has_weapon() {
        return Err(CombatError::NoWeaponEquipped);
    }
    let tier = loadout.ammo_tier;
    let drawn = loadout
        .ammo
        .get_mut(&tier)
        .is_some_and(|count| count.consume(config.ammo_per_volley));
    if !drawn {
        return Err(CombatError::OutOfAmmo(tier));
    }
    Ok((volley_damage(&loadout), loadout.projectile_speed))
}

fn laser(config: &CombatConfig, volley: &Volley, origin: Position) -> NewMunition {
    NewMunition {
        kind: MunitionKind::Laser,
        owner: volley.attacker,
        target: volley.target,
        position: origin,
        velocity: origin.direction_to(&volley.aim).scaled(volley.speed),
        damage: 0.0,
        damage_kind: DamageKind::Normal,
        damage_carrier: false,
        visible: true,
        ttl: config.projectile_lifetime_ticks,
        radius: config.projectile_radius,
    }
}

fn spawn_twin_volley(munitions: &mut MunitionStore, config: &CombatConfig, volley: &Volley) {
    let lateral: Velocity = volley
        .origin
        .direction_to(&volley.aim)
        .perpendicular()
        .scaled(config.volley_spread);

    for side in [1.0, -1.0] {
        let origin = volley.origin.offset(lateral, side);
        munitions.spawn(laser(config, volley, origin));
    }

    munitions.spawn(NewMunition {
        damage: volley.damage.amount(),
        damage_kind: volley.damage.kind(),
        damage_carrier: true,
        visible: false,
        ..laser(config, volley, volley.origin)
    });
}

fn spawn_direct_shot(munitions: &mut MunitionStore, config: &CombatConfig, volley: &Volley) {
    munitions.spawn(NewMunition {
        damage: volley.damage.amount(),
        damage_kind: volley.damage.kind(),
        damage_carrier: true,
        ..laser(config, volley, volley.origin)
    });
}

/// Launch a rocket at the attacker's selected target. The target must be
/// live and within the attacker's attack range.
///
/// The launcher reloads for `missile_rate_ticks` when the loadout defines
/// one (NPC cadence), otherwise for the configured player cooldown.
pub fn launch_missile(
    world: &mut World,
    munitions: &mut MunitionStore,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
    audio: &mut dyn AudioCueSink,
    attacker: Entity,
) -> Result<()> {
    let (origin, range) = world
        .get::<&Combatant>(attacker)
        .ok()
        .filter(|c| c.active)
        .map(|c| (c.position, c.attack_range))
        .ok_or_else(|| CombatError::UnknownEntity(attacker.into()))?;
    let (target, remaining) = world
        .get::<&CombatSession>(attacker)
        .map(|s| (s.target, s.missile_timer))
        .map_err(|_| CombatError::UnknownEntity(attacker.into()))?;
    let target = target.ok_or(CombatError::NoTarget)?;
    if remaining > 0 {
        return Err(CombatError::MissileCooldown { remaining });
    }
    let aim = live_position(world, target).ok_or(CombatError::TargetInactive)?;
    if origin.distance_to(&aim) > range {
        return Err(CombatError::OutOfRange);
    }

    let cooldown = {
        let mut loadout = world
            .get::<&mut WeaponLoadout>(attacker)
            .map_err(|_| CombatError::UnknownEntity(attacker.into()))?;
        if !loadout.rockets.consume(1) {
            return Err(CombatError::NoMissiles);
        }
        loadout
            .missile_rate_ticks
            .unwrap_or(config.missile_cooldown_ticks)
    };
    if let Ok(mut session) = world.get::<&mut CombatSession>(attacker) {
        session.missile_timer = cooldown.max(1);
    }

    munitions.spawn(NewMunition {
        kind: MunitionKind::Missile,
        owner: attacker,
        target,
        position: origin,
        velocity: origin.direction_to(&aim).scaled(config.missile_speed),
        damage: config.missile_damage,
        damage_kind: DamageKind::Normal,
        damage_carrier: true,
        visible: true,
        ttl: config.missile_lifetime_ticks,
        radius: config.missile_radius,
    });

    events.push(CombatEvent::MissileLaunched {
        attacker: attacker.into(),
        target: target.into(),
    });
    audio.play(AudioCue::MissileLaunch);
    Ok(())
}
