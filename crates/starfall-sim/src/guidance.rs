//! Guidance for munitions in flight.
//!
//! Lasers re-aim straight at the target's current position. Rockets blend
//! their velocity toward the target each tick, which yields curved pursuit.

use glam::DVec2;

use starfall_core::types::{Position, Velocity};

/// Below this length a vector is treated as degenerate.
const DEGENERATE_LENGTH: f64 = 1e-9;

/// Point `velocity` at `target`, keeping its speed. Zero when the
/// munition sits on the target.
pub fn reaim(position: &Position, target: &Position, velocity: &Velocity) -> Velocity {
    position.direction_to(target).scaled(velocity.speed())
}

/// One homing step: move the current velocity a fraction `blend` of the
/// way toward `speed` along the line of sight, then clamp to `max_speed`.
pub fn homing_velocity(
    position: &Position,
    target: &Position,
    velocity: &Velocity,
    speed: f64,
    max_speed: f64,
    blend: f64,
) -> Velocity {
    let desired = position.direction_to(target).as_vec() * speed;
    let current = velocity.as_vec();
    let blended = current.lerp(desired, blend.clamp(0.0, 1.0));
    Velocity::from_vec(clamp_length(blended, max_speed.max(0.0)))
}

fn clamp_length(v: DVec2, max: f64) -> DVec2 {
    let len = v.length();
    if !len.is_finite() || len <= DEGENERATE_LENGTH {
        return DVec2::ZERO;
    }
    if len > max {
        v * (max / len)
    } else {
        v
    }
}
