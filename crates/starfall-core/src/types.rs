//! Fundamental geometric and simulation types.
//!
//! Space is a flat top-down plane measured in world units. Speeds are
//! expressed in units per tick, rotations in radians (`atan2(dy, dx)`).

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Below this length a direction vector is treated as degenerate.
const DEGENERATE_LENGTH: f64 = 1e-9;

/// 2D position in world units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in world units per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Stable, serializable handle for an entity living in the simulation world.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_vec().distance(other.as_vec())
    }

    /// Unit vector pointing at `other`. Zero when the two points coincide.
    pub fn direction_to(&self, other: &Position) -> Velocity {
        let delta = other.as_vec() - self.as_vec();
        let len = delta.length();
        if len <= DEGENERATE_LENGTH {
            return Velocity::default();
        }
        Velocity::from_vec(delta / len)
    }

    /// Rotation (radians) of the line from this position to `other`.
    pub fn angle_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Position displaced by `velocity * scale`.
    pub fn offset(&self, velocity: Velocity, scale: f64) -> Position {
        Position::from_vec(self.as_vec() + velocity.as_vec() * scale)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Speed magnitude (units/tick).
    pub fn speed(&self) -> f64 {
        self.as_vec().length()
    }

    /// Heading in radians, `atan2(y, x)`.
    pub fn heading(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn scaled(&self, factor: f64) -> Velocity {
        Velocity::from_vec(self.as_vec() * factor)
    }

    /// Same direction at the requested speed. Zero velocity stays zero.
    pub fn with_speed(&self, speed: f64) -> Velocity {
        let len = self.speed();
        if len <= DEGENERATE_LENGTH {
            return Velocity::default();
        }
        Velocity::from_vec(self.as_vec() * (speed / len))
    }

    /// Rotated 90 degrees counter-clockwise.
    pub fn perpendicular(&self) -> Velocity {
        Velocity::from_vec(self.as_vec().perp())
    }

    pub fn plus(&self, other: Velocity) -> Velocity {
        Velocity::from_vec(self.as_vec() + other.as_vec())
    }
}

impl From<hecs::Entity> for EntityId {
    fn from(entity: hecs::Entity) -> Self {
        Self(entity.to_bits().get())
    }
}

impl EntityId {
    /// Recover the world handle. `None` for ids that never came from an entity.
    pub fn entity(self) -> Option<hecs::Entity> {
        hecs::Entity::from_bits(self.0)
    }
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
