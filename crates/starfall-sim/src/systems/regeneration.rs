//! Regeneration system: shield recharge, player auto-repair and passive
//! NPC recovery while patrolling. All rates are per tick and only kick in
//! after a quiet period without damage.

use hecs::World;

use starfall_core::components::{AiController, Combatant, CombatSession, PlayerShip};
use starfall_core::config::CombatConfig;
use starfall_core::enums::{AiState, SessionState};

/// Run regeneration for every live combatant.
pub fn run(world: &mut World, config: &CombatConfig) {
    for (_entity, (combatant, player, controller, session)) in world.query_mut::<(
        &mut Combatant,
        Option<&PlayerShip>,
        Option<&AiController>,
        Option<&CombatSession>,
    )>() {
        if !combatant.active {
            continue;
        }
        combatant.ticks_since_damage = combatant.ticks_since_damage.saturating_add(1);
        let idle_for = combatant.ticks_since_damage;

        if idle_for >= config.shield_regen_delay_ticks {
            let amount = combatant.max_shield * config.shield_regen_fraction_per_tick;
            restore_shield(combatant, amount);
        }

        let firing = session.is_some_and(|s| s.state == SessionState::Firing);
        if player.is_some() && !firing && idle_for >= config.repair_delay_ticks {
            let amount = combatant.max_hp * config.repair_fraction_per_tick;
            restore_hull(combatant, amount);
        }

        let patrolling = controller.is_some_and(|c| c.brain.state == AiState::Patrol);
        if patrolling && idle_for >= config.shield_regen_delay_ticks {
            let fraction = config.npc_patrol_regen_fraction_per_tick;
            let (hull, shield) = (combatant.max_hp * fraction, combatant.max_shield * fraction);
            restore_hull(combatant, hull);
            restore_shield(combatant, shield);
        }
    }
}

fn restore_shield(combatant: &mut Combatant, amount: f64) {
    if amount > 0.0 {
        combatant.shield = (combatant.shield + amount).min(combatant.max_shield);
    }
}

fn restore_hull(combatant: &mut Combatant, amount: f64) {
    if amount > 0.0 {
        combatant.hp = (combatant.hp + amount).min(combatant.max_hp);
    }
}
