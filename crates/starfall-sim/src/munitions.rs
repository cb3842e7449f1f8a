//! Projectile and missile model.
//!
//! Munitions are not ECS entities. Like engagements, they live in a
//! store owned by the engine and refer to combatants by weak handle,
//! validated against the combatant's `active` flag on every use.

use hecs::Entity;

use starfall_core::enums::{DamageKind, MunitionKind};
use starfall_core::state::MunitionView;
use starfall_core::types::{Position, Velocity};

/// One laser shot or rocket in flight.
#[derive(Debug, Clone)]
pub struct Munition {
    pub id: u64,
    pub kind: MunitionKind,
    pub owner: Entity,
    pub target: Entity,
    pub position: Position,
    pub velocity: Velocity,
    pub rotation: f64,
    /// Damage delivered on hit. Zero for cosmetic shots.
    pub damage: f64,
    pub damage_kind: DamageKind,
    /// Whether a hit feeds the damage pipeline. Cosmetic twin-laser shots
    /// do not.
    pub damage_carrier: bool,
    /// Rendered by the frontend. The volley damage carrier is not.
    pub visible: bool,
    /// Remaining lifetime in ticks.
    pub ttl: u32,
    pub radius: f64,
    active: bool,
}

/// Parameters for spawning a munition.
#[derive(Debug, Clone)]
pub struct NewMunition {
    pub kind: MunitionKind,
    pub owner: Entity,
    pub target: Entity,
    pub position: Position,
    pub velocity: Velocity,
    pub damage: f64,
    pub damage_kind: DamageKind,
    pub damage_carrier: bool,
    pub visible: bool,
    pub ttl: u32,
    pub radius: f64,
}

impl Munition {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Deactivate. Returns `true` only for the call that actually switched
    /// the munition off.
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    /// Circle-circle overlap with a combatant.
    pub fn collides_with(&self, position: &Position, radius: f64) -> bool {
        self.position.distance_to(position) <= self.radius + radius
    }

    /// Integrate one tick of flight and burn one tick of lifetime.
    pub fn advance(&mut self) {
        self.position = self.position.offset(self.velocity, 1.0);
        if self.velocity.speed() > 0.0 {
            self.rotation = self.velocity.heading();
        }
        self.ttl = self.ttl.saturating_sub(1);
        if self.ttl == 0 {
            self.active = false;
        }
    }

    pub fn view(&self) -> MunitionView {
        MunitionView {
            id: self.id,
            kind: self.kind,
            position: self.position,
            rotation: self.rotation,
            visible: self.visible,
        }
    }
}

/// All munitions in flight, in spawn order.
#[derive(Debug, Default)]
pub struct MunitionStore {
    items: Vec<Munition>,
    next_id: u64,
}

impl MunitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, new: NewMunition) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Munition {
            id,
            kind: new.kind,
            owner: new.owner,
            target: new.target,
            position: new.position,
            velocity: new.velocity,
            rotation: new.velocity.heading(),
            damage: new.damage,
            damage_kind: new.damage_kind,
            damage_carrier: new.damage_carrier,
            visible: new.visible,
            ttl: new.ttl.max(1),
            radius: new.radius,
            active: true,
        });
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Munition> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Munition> {
        self.items.iter_mut()
    }

    pub fn active(&self) -> impl Iterator<Item = &Munition> {
        self.items.iter().filter(|m| m.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Deactivate every munition aimed at `target`. Returns how many were
    /// switched off.
    pub fn flush_target(&mut self, target: Entity) -> usize {
        self.flush_where(|m| m.target == target)
    }

    /// Deactivate the munitions `owner` fired at `target`.
    pub fn flush_engagement(&mut self, owner: Entity, target: Entity) -> usize {
        self.flush_where(|m| m.owner == owner && m.target == target)
    }

    /// Deactivate everything `owner` has in flight.
    pub fn flush_owner(&mut self, owner: Entity) -> usize {
        self.flush_where(|m| m.owner == owner)
    }

    fn flush_where(&mut self, mut pred: impl FnMut(&Munition) -> bool) -> usize {
        let mut flushed = 0;
        for munition in self.items.iter_mut() {
            if pred(munition) && munition.deactivate() {
                flushed += 1;
            }
        }
        flushed
    }

    /// Drop inactive munitions, keeping survivors in spawn order.
    pub fn sweep(&mut self) {
        self.items.retain(|m| m.active);
    }

    /// Render list: active lasers first, then rockets.
    pub fn views(&self) -> Vec<MunitionView> {
        let lasers = self.active().filter(|m| m.kind == MunitionKind::Laser);
        let rockets = self.active().filter(|m| m.kind == MunitionKind::Missile);
        lasers.chain(rockets).map(Munition::view).collect()
    }
}
