//! Resolution system: collisions, summed damage, kills and rewards.
//!
//! A hit deactivates its munition in the same check, so a munition lands
//! at most once. All damage of one kind that lands on one target in a pass
//! is summed and fed to the damage pipeline once, whoever fired it. The
//! attacker with the largest share is credited with the hit and any kill.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use tracing::info;

use starfall_core::components::{AiController, Combatant, CombatSession, Npc, PlayerShip};
use starfall_core::config::CombatConfig;
use starfall_core::damage::Target;
use starfall_core::enums::{DamageKind, EnemyKind};
use starfall_core::events::{AudioCue, CombatEvent, Notice};
use starfall_core::rewards::{KillRecord, Progression, RewardRecord};
use starfall_core::types::EntityId;

use crate::munitions::MunitionStore;
use crate::session;
use crate::sinks::Collaborators;
use crate::systems::TickLog;

/// Damage of one kind landing on one target this pass.
struct PendingHit {
    target: Entity,
    total: f64,
    shares: BTreeMap<EntityId, (Entity, f64)>,
}

impl PendingHit {
    fn new(target: Entity) -> Self {
        Self {
            target,
            total: 0.0,
            shares: BTreeMap::new(),
        }
    }

    fn add(&mut self, attacker: Entity, amount: f64) {
        self.total += amount;
        self.shares.entry(attacker.into()).or_insert((attacker, 0.0)).1 += amount;
    }

    /// Largest contributor; the lowest id wins a tie.
    fn lead(&self) -> Option<Entity> {
        let mut lead: Option<(Entity, f64)> = None;
        for &(attacker, amount) in self.shares.values() {
            if lead.map_or(true, |(_, best)| amount > best) {
                lead = Some((attacker, amount));
            }
        }
        lead.map(|(attacker, _)| attacker)
    }
}

/// Keyed for a stable application order.
type PendingDamage = BTreeMap<(EntityId, DamageKind), PendingHit>;

/// Run the resolution pass for this tick.
pub fn run(
    world: &mut World,
    munitions: &mut MunitionStore,
    config: &CombatConfig,
    collaborators: &mut Collaborators,
    tick: u64,
    log: &mut TickLog,
) {
    let pending = detect_hits(world, munitions);

    for ((_, kind), hit) in pending {
        let Some(attacker) = hit.lead() else {
            continue;
        };
        let target = hit.target;
        let outcome = {
            let Ok(mut combatant) = world.get::<&mut Combatant>(target) else {
                continue;
            };
            if !combatant.is_active() {
                continue;
            }
            combatant.take_damage(hit.total, kind)
        };

        if outcome.total() > 0.0 {
            log.events.push(CombatEvent::Hit {
                attacker: attacker.into(),
                target: target.into(),
                kind,
                shield_damage: outcome.shield_damage,
                hull_damage: outcome.hull_damage,
            });
            collaborators.audio.play(AudioCue::Hit);
        }

        if kind == DamageKind::ShieldDrain && config.shield_drain_transfer {
            for &(drainer, amount) in hit.shares.values() {
                transfer_shield(world, drainer, outcome.shield_damage * amount / hit.total);
            }
        }

        if outcome.destroyed {
            on_kill(world, munitions, collaborators, tick, log, target, attacker);
        } else if let Ok(mut controller) = world.get::<&mut AiController>(target) {
            controller.provoked_by = Some(attacker);
        }
    }
}

/// Collision pass. Munitions aimed at a combatant that is gone are
/// switched off without effect.
fn detect_hits(world: &World, munitions: &mut MunitionStore) -> PendingDamage {
    let mut pending = PendingDamage::new();

    for munition in munitions.iter_mut().filter(|m| m.is_active()) {
        let target = world
            .get::<&Combatant>(munition.target)
            .ok()
            .filter(|c| c.active)
            .map(|c| (c.position, c.radius));
        let Some((position, radius)) = target else {
            munition.deactivate();
            continue;
        };
        if !munition.collides_with(&position, radius) || !munition.deactivate() {
            continue;
        }
        if munition.damage_carrier && munition.damage > 0.0 {
            pending
                .entry((munition.target.into(), munition.damage_kind))
                .or_insert_with(|| PendingHit::new(munition.target))
                .add(munition.owner, munition.damage);
        }
    }

    pending
}

fn transfer_shield(world: &mut World, attacker: Entity, drained: f64) {
    if drained <= 0.0 {
        return;
    }
    if let Ok(mut combatant) = world.get::<&mut Combatant>(attacker) {
        if combatant.active {
            combatant.shield = (combatant.shield + drained).min(combatant.max_shield);
        }
    }
}

fn on_kill(
    world: &mut World,
    munitions: &mut MunitionStore,
    collaborators: &mut Collaborators,
    tick: u64,
    log: &mut TickLog,
    target: Entity,
    attacker: Entity,
) {
    let enemy = world.get::<&Npc>(target).ok().map(|npc| npc.kind);
    info!(
        target = ?EntityId::from(target),
        attacker = ?EntityId::from(attacker),
        ?enemy,
        "Combatant destroyed"
    );

    log.events.push(CombatEvent::Destroyed {
        target: target.into(),
        attacker: attacker.into(),
    });
    log.kills.push(KillRecord {
        target: target.into(),
        attacker: attacker.into(),
        enemy,
        tick,
    });
    collaborators.audio.play(AudioCue::Explosion);

    // Nothing may land on the dead ship, and a dead ship fires nothing.
    munitions.flush_target(target);
    munitions.flush_owner(target);

    let stale: Vec<Entity> = world
        .query_mut::<&CombatSession>()
        .into_iter()
        .filter(|(entity, s)| *entity == target || s.target == Some(target))
        .map(|(entity, _)| entity)
        .collect();
    for entity in stale {
        session::clear_target(world, munitions, &mut log.events, entity);
    }

    let player_kill = world.get::<&PlayerShip>(attacker).is_ok();
    if let Some(kind) = enemy.filter(|_| player_kill) {
        pay_reward(world, collaborators, tick, log, target, attacker, kind);
    }
}

fn pay_reward(
    world: &mut World,
    collaborators: &mut Collaborators,
    tick: u64,
    log: &mut TickLog,
    target: Entity,
    attacker: Entity,
    kind: EnemyKind,
) {
    let record = RewardRecord::new(target.into(), kind, tick);
    for (resource, amount) in record.resources() {
        if amount > 0 {
            collaborators.ledger.add_resource(resource, amount);
        }
    }
    collaborators
        .notifications
        .notify(&Notice::EnemyDestroyed { kind });

    let level_up = world
        .get::<&mut Progression>(attacker)
        .ok()
        .and_then(|mut progression| progression.add_experience(record.experience));
    if let Some(level) = level_up {
        log.events.push(CombatEvent::LevelUp { level });
        collaborators.notifications.notify(&Notice::LevelUp { level });
    }

    log.rewards.push(record);
}
