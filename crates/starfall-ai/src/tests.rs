use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starfall_core::components::AiBrain;
use starfall_core::config::{AiConfig, CombatConfig};
use starfall_core::enums::{AiState, EnemyKind};
use starfall_core::types::Position;

use crate::fsm::{evaluate, raise_alert, AiContext, AiDecision, TargetAction, TargetSource};
use crate::patrol::{OrbitPatrol, PatrolMotion};
use crate::profiles::{profile_for, resolve};

/// Configuration with strafing and jitter disabled so motion is purely radial.
fn steady_config() -> AiConfig {
    AiConfig {
        strafe_speed_factor: 0.0,
        jitter_magnitude: 0.0,
        ..AiConfig::default()
    }
}

fn context(config: &AiConfig) -> AiContext<'_> {
    AiContext {
        config,
        position: Position::new(0.0, 0.0),
        speed: 3.0,
        hp_ratio: 1.0,
        player: None,
        has_target: false,
        target: None,
        provoked_by: None,
    }
}

fn attacking_brain(target: Position, config: &AiConfig) -> AiBrain {
    let mut brain = AiBrain::new(Position::default());
    brain.state = AiState::Attack;
    brain.last_seen = Some(target);
    brain.attack_cooldown = config.lost_contact_ticks;
    brain
}

fn step(brain: &mut AiBrain, ctx: &AiContext) -> AiDecision {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    evaluate(brain, ctx, &OrbitPatrol::default(), &mut rng)
}

// ---- Patrol triggers ----

#[test]
fn test_aggressive_npc_attacks_visible_player() {
    let config = AiConfig {
        aggressive: true,
        ..steady_config()
    };
    let mut ctx = context(&config);
    ctx.player = Some(Position::new(300.0, 0.0));

    let mut brain = AiBrain::new(Position::default());
    let decision = step(&mut brain, &ctx);

    assert_eq!(brain.state, AiState::Attack);
    assert_eq!(decision.target, TargetAction::Acquire(TargetSource::Player));
    assert_eq!(decision.transition, Some((AiState::Patrol, AiState::Attack)));
    assert!(decision.fire, "in range on acquisition tick");
    assert!(decision.velocity.x > 0.0, "closes toward the stand-off band");
}

#[test]
fn test_passive_npc_ignores_player() {
    let config = steady_config();
    let mut ctx = context(&config);
    ctx.player = Some(Position::new(100.0, 0.0));

    let mut brain = AiBrain::new(Position::default());
    let decision = step(&mut brain, &ctx);

    assert_eq!(brain.state, AiState::Patrol);
    assert_eq!(decision.target, TargetAction::Keep);
    assert!(!decision.fire);
    assert!(decision.transition.is_none());
}

#[test]
fn test_passive_npc_retaliates_against_attacker() {
    let config = steady_config();
    let mut ctx = context(&config);
    ctx.provoked_by = Some(Position::new(800.0, 0.0));

    let mut brain = AiBrain::new(Position::default());
    let decision = step(&mut brain, &ctx);

    assert_eq!(brain.state, AiState::Attack);
    assert_eq!(decision.target, TargetAction::Acquire(TargetSource::Attacker));
    // Out of sight: pursues the last known position without firing.
    assert!(!decision.fire);
    assert!(decision.velocity.x > 0.0);
}

#[test]
fn test_non_retaliating_npc_stays_on_patrol() {
    let config = AiConfig {
        retaliate: false,
        ..steady_config()
    };
    let mut ctx = context(&config);
    ctx.provoked_by = Some(Position::new(100.0, 0.0));

    let mut brain = AiBrain::new(Position::default());
    step(&mut brain, &ctx);
    assert_eq!(brain.state, AiState::Patrol);
}

// ---- Alert ----

#[test]
fn test_alert_range_puts_aggressive_npc_on_alert() {
    let config = AiConfig {
        aggressive: true,
        alert_range: Some(600.0),
        ..steady_config()
    };
    let mut ctx = context(&config);
    ctx.player = Some(Position::new(500.0, 0.0));

    let mut brain = AiBrain::new(Position::default());
    let decision = step(&mut brain, &ctx);

    assert_eq!(brain.state, AiState::Alert);
    assert_eq!(brain.last_seen, Some(Position::new(500.0, 0.0)));
    assert_eq!(decision.transition, Some((AiState::Patrol, AiState::Alert)));
    assert!(!decision.fire);
}

#[test]
fn test_alert_expires_back_to_patrol() {
    let config = AiConfig {
        alert_duration_ticks: 3,
        ..steady_config()
    };
    let ctx = context(&config);
    let mut brain = AiBrain::new(Position::default());
    raise_alert(&mut brain, &config, Position::new(50.0, 50.0));
    assert_eq!(brain.state, AiState::Alert);

    assert_eq!(step(&mut brain, &ctx).transition, None);
    assert_eq!(step(&mut brain, &ctx).transition, None);
    let decision = step(&mut brain, &ctx);

    assert_eq!(brain.state, AiState::Patrol);
    assert_eq!(decision.transition, Some((AiState::Alert, AiState::Patrol)));
    assert_eq!(decision.target, TargetAction::Drop);
    assert!(brain.last_seen.is_none());
}

#[test]
fn test_alert_escalates_when_player_seen() {
    let config = steady_config();
    let mut ctx = context(&config);
    let mut brain = AiBrain::new(Position::default());
    raise_alert(&mut brain, &config, Position::new(600.0, 0.0));

    ctx.player = Some(Position::new(350.0, 0.0));
    let decision = step(&mut brain, &ctx);
    assert_eq!(brain.state, AiState::Attack);
    assert_eq!(decision.target, TargetAction::Acquire(TargetSource::Player));
}

#[test]
fn test_raise_alert_does_not_interrupt_attack() {
    let config = steady_config();
    let mut brain = attacking_brain(Position::new(100.0, 0.0), &config);
    raise_alert(&mut brain, &config, Position::new(-500.0, 0.0));
    assert_eq!(brain.state, AiState::Attack);
}

// ---- Attack ----

#[test]
fn test_attack_holds_above_flee_threshold() {
    let config = steady_config();
    let target = Position::new(300.0, 0.0);
    let mut ctx = context(&config);
    ctx.has_target = true;
    ctx.target = Some(target);
    ctx.hp_ratio = 0.51;

    let mut brain = attacking_brain(target, &config);
    let decision = step(&mut brain, &ctx);

    assert_eq!(brain.state, AiState::Attack);
    assert!(decision.fire);
}

#[test]
fn test_attack_flees_below_threshold_without_firing() {
    let config = steady_config();
    let target = Position::new(300.0, 0.0);
    let mut ctx = context(&config);
    ctx.has_target = true;
    ctx.target = Some(target);
    ctx.hp_ratio = 0.49;

    let mut brain = attacking_brain(target, &config);
    let decision = step(&mut brain, &ctx);

    assert_eq!(brain.state, AiState::Flee);
    assert_eq!(decision.transition, Some((AiState::Attack, AiState::Flee)));
    assert!(!decision.fire, "never fires on the tick it starts fleeing");
    assert!(decision.velocity.x < 0.0, "moves away from the target");
    assert!((decision.velocity.speed() - ctx.speed).abs() < 1e-9);
    assert_eq!(brain.flee_timer, config.flee_duration_ticks);
}

#[test]
fn test_attack_on_inactive_target_returns_to_patrol() {
    let config = steady_config();
    let mut ctx = context(&config);
    ctx.has_target = true;
    ctx.target = None;

    let mut brain = attacking_brain(Position::new(100.0, 0.0), &config);
    let decision = step(&mut brain, &ctx);

    assert_eq!(brain.state, AiState::Patrol);
    assert_eq!(decision.target, TargetAction::Drop);
    assert!(!decision.fire);
}

#[test]
fn test_attack_distance_band() {
    let config = steady_config();
    let mut ctx = context(&config);
    ctx.has_target = true;

    // Far: approach at full speed.
    ctx.target = Some(Position::new(350.0, 0.0));
    let mut brain = attacking_brain(Position::new(350.0, 0.0), &config);
    let far = step(&mut brain, &ctx);
    assert!((far.velocity.x - 3.0).abs() < 1e-9);

    // Too close: retreat at half speed.
    ctx.target = Some(Position::new(100.0, 0.0));
    let near = step(&mut brain, &ctx);
    assert!((near.velocity.x + 1.5).abs() < 1e-9);

    // Inside the band: hold.
    ctx.target = Some(Position::new(190.0, 0.0));
    let hold = step(&mut brain, &ctx);
    assert!(hold.velocity.x.abs() < 1e-9);
    assert!(hold.fire);
}

#[test]
fn test_attack_faces_target() {
    let config = steady_config();
    let mut ctx = context(&config);
    ctx.has_target = true;
    ctx.target = Some(Position::new(0.0, 190.0));

    let mut brain = attacking_brain(Position::new(0.0, 190.0), &config);
    let decision = step(&mut brain, &ctx);
    let rotation = decision.rotation.unwrap();
    assert!((rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
}

#[test]
fn test_attack_strafe_flips_direction() {
    let config = AiConfig {
        strafe_interval_ticks: 2,
        jitter_magnitude: 0.0,
        ..AiConfig::default()
    };
    let mut ctx = context(&config);
    ctx.has_target = true;
    ctx.target = Some(Position::new(190.0, 0.0));

    let mut brain = attacking_brain(Position::new(190.0, 0.0), &config);
    let first = step(&mut brain, &ctx);
    let second = step(&mut brain, &ctx);
    assert!(first.velocity.y > 0.0);
    assert!(second.velocity.y < 0.0);
}

#[test]
fn test_zero_distance_is_finite() {
    let config = AiConfig::default();
    let mut ctx = context(&config);
    ctx.has_target = true;
    ctx.target = Some(ctx.position);

    let mut brain = attacking_brain(ctx.position, &config);
    let decision = step(&mut brain, &ctx);
    assert!(decision.velocity.x.is_finite());
    assert!(decision.velocity.y.is_finite());
    assert!(decision.rotation.unwrap().is_finite());
}

#[test]
fn test_lost_contact_gives_up_after_timeout() {
    let config = AiConfig {
        lost_contact_ticks: 3,
        ..steady_config()
    };
    let mut ctx = context(&config);
    ctx.has_target = true;
    ctx.target = Some(Position::new(1_000.0, 0.0));

    let mut brain = attacking_brain(Position::new(300.0, 0.0), &config);
    for _ in 0..2 {
        let decision = step(&mut brain, &ctx);
        assert_eq!(brain.state, AiState::Attack);
        assert!(!decision.fire);
        assert!(decision.velocity.x > 0.0, "pursues the last seen position");
    }
    let decision = step(&mut brain, &ctx);
    assert_eq!(brain.state, AiState::Patrol);
    assert_eq!(decision.target, TargetAction::Drop);
}

// ---- Flee ----

fn fleeing_brain(ticks: u32) -> AiBrain {
    let mut brain = AiBrain::new(Position::default());
    brain.state = AiState::Flee;
    brain.flee_timer = ticks;
    brain.last_seen = Some(Position::new(100.0, 0.0));
    brain
}

#[test]
fn test_flee_expiry_resumes_attack_when_recovered() {
    let config = AiConfig {
        flee_duration_ticks: 2,
        ..steady_config()
    };
    let mut ctx = context(&config);
    ctx.has_target = true;
    ctx.target = Some(Position::new(100.0, 0.0));
    ctx.hp_ratio = 0.8;

    let mut brain = fleeing_brain(2);
    let first = step(&mut brain, &ctx);
    assert_eq!(brain.state, AiState::Flee);
    assert!(!first.fire);
    assert!(first.velocity.x < 0.0);

    let second = step(&mut brain, &ctx);
    assert_eq!(brain.state, AiState::Attack);
    assert_eq!(second.transition, Some((AiState::Flee, AiState::Attack)));
    assert_eq!(second.target, TargetAction::Keep);
}

#[test]
fn test_flee_expiry_patrols_when_still_damaged() {
    let config = steady_config();
    let mut ctx = context(&config);
    ctx.has_target = true;
    ctx.target = Some(Position::new(100.0, 0.0));
    ctx.hp_ratio = 0.3;

    let mut brain = fleeing_brain(1);
    let decision = step(&mut brain, &ctx);
    assert_eq!(brain.state, AiState::Patrol);
    assert_eq!(decision.target, TargetAction::Drop);
}

#[test]
fn test_flee_expiry_patrols_without_target() {
    let config = steady_config();
    let mut ctx = context(&config);
    ctx.hp_ratio = 1.0;

    let mut brain = fleeing_brain(1);
    step(&mut brain, &ctx);
    assert_eq!(brain.state, AiState::Patrol);
}

// ---- Patrol motion ----

#[test]
fn test_orbit_patrol_speed_bounded() {
    let patrol = OrbitPatrol::default();
    let mut brain = AiBrain::new(Position::new(500.0, 500.0));
    let velocity = patrol.patrol(&mut brain, Position::default(), 3.0);
    assert!(velocity.speed() <= 3.0 + 1e-9);
    assert!(brain.patrol_phase > 0.0);
}

#[test]
fn test_jitter_is_deterministic_for_seed() {
    let config = AiConfig {
        jitter_interval_ticks: 1,
        ..AiConfig::default()
    };
    let mut ctx = context(&config);
    ctx.has_target = true;
    ctx.target = Some(Position::new(190.0, 0.0));

    let run = || {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut brain = attacking_brain(Position::new(190.0, 0.0), &config);
        (0..10)
            .map(|_| evaluate(&mut brain, &ctx, &OrbitPatrol::default(), &mut rng).velocity)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

// ---- Profiles ----

#[test]
fn test_profiles_scale_with_kind() {
    let streuner = profile_for(EnemyKind::Streuner);
    let kristallin = profile_for(EnemyKind::Kristallin);
    assert!(!streuner.aggressive);
    assert!(kristallin.aggressive);
    assert!(kristallin.max_hp > streuner.max_hp);
    assert_eq!(profile_for(EnemyKind::Unknown), AiConfig::default());
    assert!(profile_for(EnemyKind::Devolarium).missile_rate_ticks.is_some());
}

#[test]
fn test_resolve_prefers_override() {
    let mut config = CombatConfig::default();
    let custom = AiConfig {
        damage: 1.0,
        ..AiConfig::default()
    };
    config.ai_overrides.insert(EnemyKind::Mordon, custom.clone());

    assert_eq!(resolve(EnemyKind::Mordon, &config), custom);
    assert_eq!(
        resolve(EnemyKind::Lordakia, &config),
        profile_for(EnemyKind::Lordakia)
    );
}
