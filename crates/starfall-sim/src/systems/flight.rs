//! Munition flight system: re-aim lasers, home rockets, integrate,
//! expire.

use hecs::World;

use starfall_core::components::Combatant;
use starfall_core::config::CombatConfig;
use starfall_core::enums::MunitionKind;

use crate::guidance;
use crate::munitions::MunitionStore;

/// Advance every active munition by one tick.
///
/// While its target is live a laser re-derives its heading toward the
/// target's current position and a rocket blends toward it. Without a
/// live target both keep their last velocity.
pub fn run(world: &World, munitions: &mut MunitionStore, config: &CombatConfig) {
    for munition in munitions.iter_mut().filter(|m| m.is_active()) {
        let target = world
            .get::<&Combatant>(munition.target)
            .ok()
            .filter(|c| c.active)
            .map(|c| c.position);

        if let Some(target) = target {
            munition.velocity = match munition.kind {
                MunitionKind::Laser => {
                    guidance::reaim(&munition.position, &target, &munition.velocity)
                }
                MunitionKind::Missile => guidance::homing_velocity(
                    &munition.position,
                    &target,
                    &munition.velocity,
                    config.missile_speed,
                    config.missile_max_speed,
                    config.missile_homing_blend,
                ),
            };
        }

        munition.advance();
    }
}
