//! Snapshot system: queries the ECS world and builds a complete
//! `CombatSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use starfall_core::components::*;
use starfall_core::enums::SessionState;
use starfall_core::rewards::Progression;
use starfall_core::state::*;
use starfall_core::types::{EntityId, SimTime};

use crate::munitions::MunitionStore;
use crate::systems::TickLog;

/// Build the snapshot for the tick that just ran.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    munitions: &MunitionStore,
    log: TickLog,
) -> CombatSnapshot {
    CombatSnapshot {
        time: *time,
        player: build_player(world),
        npcs: build_npcs(world),
        munitions: munitions.views(),
        kills: log.kills,
        rewards: log.rewards,
        events: log.events,
    }
}

fn hull(combatant: &Combatant) -> HullView {
    HullView {
        hp: combatant.hp,
        max_hp: combatant.max_hp,
        shield: combatant.shield,
        max_shield: combatant.max_shield,
    }
}

fn build_session(session: &CombatSession, loadout: &WeaponLoadout) -> SessionView {
    let rate = loadout.fire_rate_ticks.max(1);
    let fire_ready_in = match session.state {
        SessionState::Firing => rate.saturating_sub(session.fire_timer),
        _ => rate,
    };
    SessionView {
        state: session.state,
        target: session.target.map(EntityId::from),
        fire_ready_in,
        missile_ready_in: session.missile_timer,
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    let mut query = world.query::<(
        &PlayerShip,
        &Combatant,
        &CombatSession,
        &WeaponLoadout,
        &Progression,
    )>();
    query
        .iter()
        .next()
        .map(|(entity, (_, combatant, session, loadout, progression))| PlayerView {
            id: entity.into(),
            position: combatant.position,
            rotation: combatant.rotation,
            hull: hull(combatant),
            active: combatant.active,
            session: build_session(session, loadout),
            ammo_tier: loadout.ammo_tier,
            progression: *progression,
        })
}

fn build_npcs(world: &World) -> Vec<NpcView> {
    let mut npcs: Vec<NpcView> = world
        .query::<(&Npc, &Combatant, &AiController)>()
        .iter()
        .filter(|(_, (_, combatant, _))| combatant.active)
        .map(|(entity, (npc, combatant, controller))| NpcView {
            id: entity.into(),
            kind: npc.kind,
            position: combatant.position,
            rotation: combatant.rotation,
            hull: hull(combatant),
            state: controller.brain.state,
            selected: combatant.selected,
        })
        .collect();
    npcs.sort_by_key(|npc| npc.id);
    npcs
}
