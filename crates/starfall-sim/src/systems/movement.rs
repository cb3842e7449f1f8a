//! Kinematic integration system.
//!
//! Steers the player toward its MoveTo destination, then updates every
//! live combatant's position from its velocity.

use hecs::World;

use starfall_core::components::{Combatant, CombatSession, PlayerShip};
use starfall_core::constants::ARRIVAL_RADIUS;
use starfall_core::enums::SessionState;
use starfall_core::types::Velocity;

/// Steer the player ship. Faces its target while firing, otherwise its
/// direction of travel.
pub fn steer_player(world: &mut World) {
    let mut facing = Vec::new();

    for (entity, (ship, combatant, session)) in
        world.query_mut::<(&mut PlayerShip, &mut Combatant, &CombatSession)>()
    {
        if !combatant.active {
            ship.destination = None;
            continue;
        }
        match ship.destination {
            Some(destination) => {
                let distance = combatant.position.distance_to(&destination);
                if distance <= ARRIVAL_RADIUS.max(combatant.speed) {
                    combatant.position = destination;
                    combatant.velocity = Velocity::default();
                    ship.destination = None;
                } else {
                    combatant.velocity = combatant
                        .position
                        .direction_to(&destination)
                        .scaled(combatant.speed);
                    combatant.rotation = combatant.velocity.heading();
                }
            }
            None => combatant.velocity = Velocity::default(),
        }
        if session.state == SessionState::Firing {
            if let Some(target) = session.target {
                facing.push((entity, target));
            }
        }
    }

    for (entity, target) in facing {
        let target_position = match world.get::<&Combatant>(target) {
            Ok(t) if t.active => t.position,
            _ => continue,
        };
        if let Ok(mut combatant) = world.get::<&mut Combatant>(entity) {
            combatant.rotation = combatant.position.angle_to(&target_position);
        }
    }
}

/// Integrate positions for all live combatants: position += velocity.
pub fn run(world: &mut World) {
    for (_entity, combatant) in world.query_mut::<&mut Combatant>() {
        if combatant.active {
            combatant.position = combatant.position.offset(combatant.velocity, 1.0);
        }
    }
}
