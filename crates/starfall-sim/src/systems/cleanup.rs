//! Cleanup system: stable removal of spent munitions and despawn of
//! destroyed NPCs.

use hecs::{Entity, World};

use starfall_core::components::{Combatant, Npc};

use crate::munitions::MunitionStore;

/// Sweep inactive munitions and despawn destroyed NPCs. The player ship is
/// kept so its final state stays visible.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, munitions: &mut MunitionStore, despawn_buffer: &mut Vec<Entity>) {
    munitions.sweep();

    despawn_buffer.clear();
    for (entity, (combatant, _npc)) in world.query_mut::<(&Combatant, &Npc)>() {
        if !combatant.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
