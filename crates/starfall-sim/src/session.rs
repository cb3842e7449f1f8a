//! Combat session coordinator.
//!
//! A session is per attacker and shared by the player and AI attackers:
//! Idle (no target) → Engaged (target selected) → Firing (weapon timers
//! running). Clearing the target is the cancellation primitive and always
//! flushes the munitions of that engagement.

use hecs::{Entity, World};
use tracing::debug;

use starfall_core::components::{Combatant, CombatSession, PlayerShip, WeaponLoadout};
use starfall_core::damage::Target;
use starfall_core::enums::SessionState;
use starfall_core::error::{CombatError, Result};
use starfall_core::events::CombatEvent;
use starfall_core::types::EntityId;

use crate::munitions::MunitionStore;

/// Move a session to `to`, logging and recording the change. Entering
/// Firing restarts the fire timer.
pub(crate) fn transition(
    session: &mut CombatSession,
    attacker: Entity,
    to: SessionState,
    events: &mut Vec<CombatEvent>,
) {
    let from = session.state;
    if from == to {
        return;
    }
    debug!(attacker = ?EntityId::from(attacker), ?from, ?to, "Session transition");
    if to == SessionState::Firing {
        session.fire_timer = 0;
    }
    session.state = to;
    events.push(CombatEvent::SessionChanged {
        attacker: attacker.into(),
        from,
        to,
    });
}

/// Whether `entity` is a live combatant.
pub fn is_live(world: &World, entity: Entity) -> bool {
    world
        .get::<&Combatant>(entity)
        .map(|c| c.is_active())
        .unwrap_or(false)
}

fn session_target(world: &World, attacker: Entity) -> Result<Option<Entity>> {
    world
        .get::<&CombatSession>(attacker)
        .map(|s| s.target)
        .map_err(|_| CombatError::UnknownEntity(attacker.into()))
}

/// Only the player's selection is shown on the target.
fn marks_selection(world: &World, attacker: Entity) -> bool {
    world.get::<&PlayerShip>(attacker).is_ok()
}

/// Deselect `target` and flush what `attacker` has in flight toward it.
fn release(world: &mut World, munitions: &mut MunitionStore, attacker: Entity, target: Entity) {
    if marks_selection(world, attacker) {
        if let Ok(mut combatant) = world.get::<&mut Combatant>(target) {
            combatant.deselect();
        }
    }
    let flushed = munitions.flush_engagement(attacker, target);
    if flushed > 0 {
        debug!(
            attacker = ?EntityId::from(attacker),
            target = ?EntityId::from(target),
            flushed,
            "Flushed munitions"
        );
    }
}

/// Select `target` as the attacker's current target. Switching targets
/// stops firing and flushes the previous engagement.
pub fn select_target(
    world: &mut World,
    munitions: &mut MunitionStore,
    events: &mut Vec<CombatEvent>,
    attacker: Entity,
    target: Entity,
) -> Result<()> {
    if attacker == target {
        return Err(CombatError::NoTarget);
    }
    let target_active = world
        .get::<&Combatant>(target)
        .map(|c| c.is_active())
        .map_err(|_| CombatError::UnknownEntity(target.into()))?;
    if !target_active {
        return Err(CombatError::TargetInactive);
    }

    let previous = session_target(world, attacker)?;
    if previous == Some(target) {
        return Ok(());
    }
    if let Some(previous) = previous {
        release(world, munitions, attacker, previous);
    }

    if let Ok(mut session) = world.get::<&mut CombatSession>(attacker) {
        session.target = Some(target);
        session.ammo_warning_sent = false;
        transition(&mut session, attacker, SessionState::Engaged, events);
    }
    if marks_selection(world, attacker) {
        if let Ok(mut combatant) = world.get::<&mut Combatant>(target) {
            combatant.select();
        }
    }
    Ok(())
}

/// Start firing at the selected target. Refused without a usable weapon
/// or a live target; the session is left untouched in that case.
pub fn start_combat(
    world: &mut World,
    events: &mut Vec<CombatEvent>,
    attacker: Entity,
) -> Result<()> {
    let has_weapon = world
        .get::<&WeaponLoadout>(attacker)
        .map(|l| l.has_weapon())
        .map_err(|_| CombatError::UnknownEntity(attacker.into()))?;
    if !has_weapon {
        return Err(CombatError::NoWeaponEquipped);
    }

    let target = session_target(world, attacker)?.ok_or(CombatError::NoTarget)?;
    if !is_live(world, target) {
        return Err(CombatError::TargetInactive);
    }

    if let Ok(mut session) = world.get::<&mut CombatSession>(attacker) {
        transition(&mut session, attacker, SessionState::Firing, events);
    }
    Ok(())
}

/// Stop firing and flush the engagement's munitions. Returns whether
/// the attacker was firing.
pub fn stop_combat(
    world: &mut World,
    munitions: &mut MunitionStore,
    events: &mut Vec<CombatEvent>,
    attacker: Entity,
) -> bool {
    let target = {
        let Ok(mut session) = world.get::<&mut CombatSession>(attacker) else {
            return false;
        };
        if session.state != SessionState::Firing {
            return false;
        }
        transition(&mut session, attacker, SessionState::Engaged, events);
        session.target
    };
    if let Some(target) = target {
        munitions.flush_engagement(attacker, target);
    }
    true
}

/// Stop firing but leave munitions in flight to resolve.
pub fn hold_fire(world: &mut World, events: &mut Vec<CombatEvent>, attacker: Entity) {
    if let Ok(mut session) = world.get::<&mut CombatSession>(attacker) {
        if session.state == SessionState::Firing {
            transition(&mut session, attacker, SessionState::Engaged, events);
        }
    }
}

/// Drop the current target from any state. Idempotent: returns `false`
/// and does nothing when there was no target to drop.
pub fn clear_target(
    world: &mut World,
    munitions: &mut MunitionStore,
    events: &mut Vec<CombatEvent>,
    attacker: Entity,
) -> bool {
    let target = {
        let Ok(mut session) = world.get::<&mut CombatSession>(attacker) else {
            return false;
        };
        if session.target.is_none() && session.state == SessionState::Idle {
            return false;
        }
        transition(&mut session, attacker, SessionState::Idle, events);
        session.ammo_warning_sent = false;
        session.target.take()
    };
    if let Some(target) = target {
        release(world, munitions, attacker, target);
    }
    true
}

/// Point an AI attacker's session at `target`, firing or merely engaged.
pub fn engage(
    world: &mut World,
    munitions: &mut MunitionStore,
    events: &mut Vec<CombatEvent>,
    attacker: Entity,
    target: Entity,
    fire: bool,
) {
    let previous = match session_target(world, attacker) {
        Ok(previous) => previous,
        Err(_) => return,
    };
    if let Some(previous) = previous.filter(|p| *p != target) {
        munitions.flush_engagement(attacker, previous);
    }
    if let Ok(mut session) = world.get::<&mut CombatSession>(attacker) {
        session.target = Some(target);
        let to = if fire {
            SessionState::Firing
        } else {
            SessionState::Engaged
        };
        transition(&mut session, attacker, to, events);
    }
}
