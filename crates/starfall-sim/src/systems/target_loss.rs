//! Session watch: drops targets that are no longer valid.
//!
//! A destroyed or despawned target is treated as "no target". The session
//! degrades to Idle and the engagement's munitions are flushed.

use hecs::{Entity, World};

use starfall_core::components::{Combatant, CombatSession};
use starfall_core::events::CombatEvent;

use crate::munitions::MunitionStore;
use crate::session;

/// Run the session watch for every attacker.
pub fn run(world: &mut World, munitions: &mut MunitionStore, events: &mut Vec<CombatEvent>) {
    let mut lost: Vec<Entity> = Vec::new();

    {
        let mut query = world.query::<(&CombatSession, &Combatant)>();
        for (entity, (session, attacker)) in query.iter() {
            let Some(target) = session.target else {
                continue;
            };
            if !attacker.active || !session::is_live(world, target) {
                lost.push(entity);
            }
        }
    }

    for entity in lost {
        session::clear_target(world, munitions, events, entity);
    }
}
