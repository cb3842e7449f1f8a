//! NPC behavior finite state machine.
//!
//! Pure functions over plain data: the caller gathers an [`AiContext`] from
//! the world, [`evaluate`] mutates the NPC's [`AiBrain`] and returns the
//! motion, facing, targeting and firing decision for this tick. No ECS
//! dependency.

use rand::Rng;
use tracing::debug;

use starfall_core::components::AiBrain;
use starfall_core::config::AiConfig;
use starfall_core::constants::{NPC_DISTANCE_BAND, NPC_RETREAT_SPEED_FACTOR};
use starfall_core::enums::AiState;
use starfall_core::types::{Position, Velocity};

use crate::patrol::PatrolMotion;

/// Input to the FSM for a single NPC.
#[derive(Debug, Clone)]
pub struct AiContext<'a> {
    pub config: &'a AiConfig,
    pub position: Position,
    /// Cruise speed of the NPC (units/tick).
    pub speed: f64,
    /// Hull fraction in `[0, 1]`.
    pub hp_ratio: f64,
    /// Position of the player while it is active.
    pub player: Option<Position>,
    /// Whether the controller holds a target reference at all.
    pub has_target: bool,
    /// Position of the held target while it is still active.
    pub target: Option<Position>,
    /// Position of whoever damaged this NPC since the last evaluation.
    pub provoked_by: Option<Position>,
}

/// Where a newly acquired target comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSource {
    Player,
    Attacker,
}

/// What the caller must do with the controller's target reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetAction {
    Keep,
    Acquire(TargetSource),
    Drop,
}

/// Output from the FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct AiDecision {
    pub velocity: Velocity,
    /// New facing, if the NPC should turn this tick.
    pub rotation: Option<f64>,
    pub target: TargetAction,
    /// Weapons may fire this tick: attacking with the target in sight.
    pub fire: bool,
    /// `(from, to)` when the state changed this tick.
    pub transition: Option<(AiState, AiState)>,
}

/// Circular line-of-sight test, no occlusion.
pub fn can_see(ctx: &AiContext, point: &Position) -> bool {
    ctx.position.distance_to(point) <= ctx.config.detection_range
}

/// Evaluate the FSM for one NPC and one tick.
pub fn evaluate<R: Rng + ?Sized>(
    brain: &mut AiBrain,
    ctx: &AiContext,
    patrol: &dyn PatrolMotion,
    rng: &mut R,
) -> AiDecision {
    let from = brain.state;
    let mut decision = AiDecision {
        velocity: Velocity::default(),
        rotation: None,
        target: TargetAction::Keep,
        fire: false,
        transition: None,
    };

    evaluate_triggers(brain, ctx, &mut decision);

    match brain.state {
        AiState::Patrol => {
            decision.velocity = patrol.patrol(brain, ctx.position, ctx.speed);
        }
        AiState::Alert => run_alert(brain, ctx, patrol, &mut decision),
        AiState::Attack => run_attack(brain, ctx, patrol, rng, &mut decision),
        AiState::Flee => run_flee(brain, ctx, patrol, &mut decision),
    }

    if decision.rotation.is_none() && decision.velocity.speed() > 0.0 {
        decision.rotation = Some(decision.velocity.heading());
    }
    if brain.state != from {
        debug!(?from, to = ?brain.state, "AI transition");
        decision.transition = Some((from, brain.state));
    }
    decision
}

/// Put the NPC on alert toward `position`. Usable by external callers
/// (e.g. an ally raising the alarm).
pub fn raise_alert(brain: &mut AiBrain, config: &AiConfig, position: Position) {
    if matches!(brain.state, AiState::Attack | AiState::Flee) {
        return;
    }
    brain.state = AiState::Alert;
    brain.last_seen = Some(position);
    brain.alert_timer = config.alert_duration_ticks.max(1);
}

/// Transitions out of Patrol and Alert driven by sight or provocation.
fn evaluate_triggers(brain: &mut AiBrain, ctx: &AiContext, decision: &mut AiDecision) {
    if !matches!(brain.state, AiState::Patrol | AiState::Alert) {
        return;
    }

    if ctx.config.retaliate {
        if let Some(attacker) = ctx.provoked_by {
            enter_attack(brain, ctx.config, attacker);
            decision.target = TargetAction::Acquire(TargetSource::Attacker);
            return;
        }
    }

    let Some(player) = ctx.player else {
        return;
    };
    let visible = can_see(ctx, &player);

    match brain.state {
        AiState::Patrol if ctx.config.aggressive => {
            if visible {
                enter_attack(brain, ctx.config, player);
                decision.target = TargetAction::Acquire(TargetSource::Player);
            } else if ctx
                .config
                .alert_range
                .is_some_and(|range| ctx.position.distance_to(&player) <= range)
            {
                raise_alert(brain, ctx.config, player);
            }
        }
        AiState::Alert if visible => {
            enter_attack(brain, ctx.config, player);
            decision.target = TargetAction::Acquire(TargetSource::Player);
        }
        _ => {}
    }
}

fn enter_attack(brain: &mut AiBrain, config: &AiConfig, seen_at: Position) {
    brain.state = AiState::Attack;
    brain.last_seen = Some(seen_at);
    brain.attack_cooldown = config.lost_contact_ticks.max(1);
    brain.strafe_timer = 0;
    brain.jitter_timer = 0;
    brain.jitter = 0.0;
}

fn enter_patrol(brain: &mut AiBrain, decision: &mut AiDecision) {
    brain.state = AiState::Patrol;
    brain.last_seen = None;
    brain.alert_timer = 0;
    brain.flee_timer = 0;
    decision.target = TargetAction::Drop;
    decision.fire = false;
}

fn run_alert(
    brain: &mut AiBrain,
    ctx: &AiContext,
    patrol: &dyn PatrolMotion,
    decision: &mut AiDecision,
) {
    brain.alert_timer = brain.alert_timer.saturating_sub(1);
    if brain.alert_timer == 0 {
        enter_patrol(brain, decision);
        decision.velocity = patrol.patrol(brain, ctx.position, ctx.speed);
        return;
    }

    match brain.last_seen {
        Some(last_seen) if ctx.position.distance_to(&last_seen) > ctx.speed => {
            decision.velocity = ctx.position.direction_to(&last_seen).scaled(ctx.speed);
            decision.rotation = Some(ctx.position.angle_to(&last_seen));
        }
        _ => {
            decision.velocity = patrol.search(brain, ctx.position, ctx.speed);
        }
    }
}

fn run_attack<R: Rng + ?Sized>(
    brain: &mut AiBrain,
    ctx: &AiContext,
    patrol: &dyn PatrolMotion,
    rng: &mut R,
    decision: &mut AiDecision,
) {
    let Some(target) = live_target(ctx, decision) else {
        enter_patrol(brain, decision);
        decision.velocity = patrol.patrol(brain, ctx.position, ctx.speed);
        return;
    };

    // Checked before any firing decision so a damaged NPC disengages mid-swing.
    if ctx.hp_ratio <= ctx.config.flee_threshold {
        brain.state = AiState::Flee;
        brain.flee_timer = ctx.config.flee_duration_ticks.max(1);
        flee_motion(ctx, Some(target), decision);
        return;
    }

    if can_see(ctx, &target) {
        brain.last_seen = Some(target);
        brain.attack_cooldown = ctx.config.lost_contact_ticks.max(1);
        decision.velocity = engage_velocity(brain, ctx, target, rng);
        decision.rotation = Some(ctx.position.angle_to(&target));
        decision.fire = true;
        return;
    }

    let Some(last_seen) = brain.last_seen else {
        enter_patrol(brain, decision);
        decision.velocity = patrol.patrol(brain, ctx.position, ctx.speed);
        return;
    };

    brain.attack_cooldown = brain.attack_cooldown.saturating_sub(1);
    if brain.attack_cooldown == 0 {
        enter_patrol(brain, decision);
        decision.velocity = patrol.patrol(brain, ctx.position, ctx.speed);
        return;
    }

    let distance = ctx.position.distance_to(&last_seen);
    decision.velocity = ctx
        .position
        .direction_to(&last_seen)
        .scaled(ctx.speed.min(distance));
    decision.rotation = Some(ctx.position.angle_to(&last_seen));
}

fn run_flee(
    brain: &mut AiBrain,
    ctx: &AiContext,
    patrol: &dyn PatrolMotion,
    decision: &mut AiDecision,
) {
    let threat = live_target(ctx, decision).or(brain.last_seen);
    flee_motion(ctx, threat, decision);

    brain.flee_timer = brain.flee_timer.saturating_sub(1);
    if brain.flee_timer > 0 {
        return;
    }

    match live_target(ctx, decision) {
        Some(target) if ctx.hp_ratio > ctx.config.flee_threshold => {
            enter_attack(brain, ctx.config, target);
        }
        _ => {
            enter_patrol(brain, decision);
            decision.velocity = patrol.patrol(brain, ctx.position, ctx.speed);
            decision.rotation = None;
        }
    }
}

/// Position of the target this tick, counting one acquired by a trigger.
fn live_target(ctx: &AiContext, decision: &AiDecision) -> Option<Position> {
    match decision.target {
        TargetAction::Acquire(TargetSource::Player) => ctx.player,
        TargetAction::Acquire(TargetSource::Attacker) => ctx.provoked_by,
        TargetAction::Drop => None,
        TargetAction::Keep => ctx.target.filter(|_| ctx.has_target),
    }
}

/// Full speed directly away from `threat`.
fn flee_motion(ctx: &AiContext, threat: Option<Position>, decision: &mut AiDecision) {
    decision.fire = false;
    if let Some(threat) = threat {
        decision.velocity = threat.direction_to(&ctx.position).scaled(ctx.speed);
    }
}

/// Hold a distance band `[min_distance - band, min_distance]` around the
/// target while strafing sideways. The strafe direction flips every
/// `strafe_interval_ticks`; a random lateral jitter is resampled every
/// `jitter_interval_ticks`.
fn engage_velocity<R: Rng + ?Sized>(
    brain: &mut AiBrain,
    ctx: &AiContext,
    target: Position,
    rng: &mut R,
) -> Velocity {
    let config = ctx.config;
    let distance = ctx.position.distance_to(&target);
    let toward = ctx.position.direction_to(&target);

    let radial = if distance > config.min_distance {
        toward.scaled(ctx.speed)
    } else if distance < config.min_distance - NPC_DISTANCE_BAND {
        toward.scaled(-ctx.speed * NPC_RETREAT_SPEED_FACTOR)
    } else {
        Velocity::default()
    };

    brain.strafe_timer += 1;
    if brain.strafe_timer >= config.strafe_interval_ticks.max(1) {
        brain.strafe_timer = 0;
        brain.strafe_sign = -brain.strafe_sign;
    }

    brain.jitter_timer += 1;
    if brain.jitter_timer >= config.jitter_interval_ticks.max(1) {
        brain.jitter_timer = 0;
        let magnitude = config.jitter_magnitude.abs();
        brain.jitter = if magnitude > 0.0 && magnitude.is_finite() {
            rng.gen_range(-magnitude..=magnitude)
        } else {
            0.0
        };
    }

    let lateral = brain.strafe_sign * config.strafe_speed_factor + brain.jitter;
    radial.plus(toward.perpendicular().scaled(ctx.speed * lateral))
}
