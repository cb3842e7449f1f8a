//! NPC AI system: evaluates the behavior FSM for every live NPC and
//! applies the resulting motion, targeting and session changes.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use starfall_core::components::{AiController, Combatant, Npc, PlayerShip};
use starfall_core::enums::AiState;
use starfall_core::events::CombatEvent;
use starfall_core::types::Position;

use starfall_ai::fsm::{evaluate, AiContext, AiDecision, TargetAction, TargetSource};
use starfall_ai::patrol::PatrolMotion;

use crate::munitions::MunitionStore;
use crate::session;

/// Position of a live combatant.
fn live_position(world: &World, entity: Entity) -> Option<Position> {
    world
        .get::<&Combatant>(entity)
        .ok()
        .filter(|c| c.active)
        .map(|c| c.position)
}

/// Run the AI system: one FSM evaluation per live NPC.
pub fn run(
    world: &mut World,
    munitions: &mut MunitionStore,
    patrol: &dyn PatrolMotion,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
) {
    let player = world
        .query::<(&PlayerShip, &Combatant)>()
        .iter()
        .find(|(_, (_, c))| c.active)
        .map(|(entity, (_, c))| (entity, c.position));

    // Snapshot the controllers first, hecs borrows forbid looking up
    // other combatants while a query is open.
    let npcs: Vec<(Entity, AiController, Position, f64, f64)> = world
        .query::<(&Npc, &Combatant, &AiController)>()
        .iter()
        .filter(|(_, (_, c, _))| c.active)
        .map(|(entity, (_, c, ctrl))| (entity, ctrl.clone(), c.position, c.speed, c.hp_ratio()))
        .collect();

    for (entity, mut controller, position, speed, hp_ratio) in npcs {
        let ctx = AiContext {
            config: &controller.config,
            position,
            speed,
            hp_ratio,
            player: player.map(|(_, p)| p),
            has_target: controller.target.is_some(),
            target: controller.target.and_then(|t| live_position(world, t)),
            provoked_by: controller.provoked_by.and_then(|a| live_position(world, a)),
        };
        let decision = evaluate(&mut controller.brain, &ctx, patrol, rng);

        match decision.target {
            TargetAction::Keep => {}
            TargetAction::Acquire(TargetSource::Player) => {
                controller.target = player.map(|(p, _)| p);
            }
            TargetAction::Acquire(TargetSource::Attacker) => {
                controller.target = controller.provoked_by;
            }
            TargetAction::Drop => controller.target = None,
        }
        controller.provoked_by = None;

        if let Some((from, to)) = decision.transition {
            events.push(CombatEvent::AiTransition {
                npc: entity.into(),
                from,
                to,
            });
        }

        sync_session(world, munitions, events, entity, &controller, &decision);
        apply(world, entity, controller, &decision);
    }
}

/// Mirror the FSM outcome onto the NPC's combat session.
fn sync_session(
    world: &mut World,
    munitions: &mut MunitionStore,
    events: &mut Vec<CombatEvent>,
    npc: Entity,
    controller: &AiController,
    decision: &AiDecision,
) {
    match (controller.brain.state, controller.target) {
        (AiState::Attack, Some(target)) => {
            session::engage(world, munitions, events, npc, target, decision.fire);
        }
        (AiState::Flee, Some(_)) => session::hold_fire(world, events, npc),
        _ => {
            session::clear_target(world, munitions, events, npc);
        }
    }
}

fn apply(world: &mut World, npc: Entity, controller: AiController, decision: &AiDecision) {
    if let Ok(mut combatant) = world.get::<&mut Combatant>(npc) {
        combatant.velocity = decision.velocity;
        if let Some(rotation) = decision.rotation {
            combatant.rotation = rotation;
        }
    }
    if let Ok(mut slot) = world.get::<&mut AiController>(npc) {
        *slot = controller;
    }
}
