//! Patrol and search motion routines.
//!
//! The FSM only decides *when* to patrol; *how* is delegated to a
//! [`PatrolMotion`] so games can plug in waypoint paths or scripted routes.

use std::f64::consts::TAU;

use starfall_core::components::AiBrain;
use starfall_core::constants::{PATROL_ANGULAR_STEP, PATROL_RADIUS};
use starfall_core::types::{Position, Velocity};

/// Motion routine used while patrolling or searching.
pub trait PatrolMotion {
    /// Velocity for one patrol tick. May advance `brain.patrol_phase`.
    fn patrol(&self, brain: &mut AiBrain, position: Position, speed: f64) -> Velocity;

    /// Velocity for one search tick after contact was lost.
    fn search(&self, brain: &mut AiBrain, position: Position, speed: f64) -> Velocity {
        self.patrol(brain, position, speed)
    }
}

/// Circles an anchor point: the home point while patrolling, the last
/// seen position while searching.
#[derive(Debug, Clone, Copy)]
pub struct OrbitPatrol {
    pub radius: f64,
    pub search_radius: f64,
    /// Radians advanced along the orbit each tick.
    pub angular_step: f64,
}

impl Default for OrbitPatrol {
    fn default() -> Self {
        Self {
            radius: PATROL_RADIUS,
            search_radius: PATROL_RADIUS / 3.0,
            angular_step: PATROL_ANGULAR_STEP,
        }
    }
}

impl OrbitPatrol {
    fn orbit(
        &self,
        brain: &mut AiBrain,
        anchor: Position,
        radius: f64,
        position: Position,
        speed: f64,
    ) -> Velocity {
        brain.patrol_phase = (brain.patrol_phase + self.angular_step).rem_euclid(TAU);
        let waypoint = Position::new(
            anchor.x + radius * brain.patrol_phase.cos(),
            anchor.y + radius * brain.patrol_phase.sin(),
        );
        let distance = position.distance_to(&waypoint);
        position
            .direction_to(&waypoint)
            .scaled(speed.min(distance))
    }
}

impl PatrolMotion for OrbitPatrol {
    fn patrol(&self, brain: &mut AiBrain, position: Position, speed: f64) -> Velocity {
        let home = brain.home;
        self.orbit(brain, home, self.radius, position, speed)
    }

    fn search(&self, brain: &mut AiBrain, position: Position, speed: f64) -> Velocity {
        let anchor = brain.last_seen.unwrap_or(brain.home);
        self.orbit(brain, anchor, self.search_radius, position, speed)
    }
}
