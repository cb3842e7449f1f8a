//! Simulation constants and tuning parameters.
//!
//! Distances are world units, speeds are units per tick, durations are
//! tick counts unless the name says otherwise.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Lasers ---

/// Ticks between laser volleys.
pub const LASER_FIRE_RATE_TICKS: u32 = 60;

/// Laser projectile speed.
pub const LASER_PROJECTILE_SPEED: f64 = 15.0;

/// Laser projectile lifetime.
pub const PROJECTILE_LIFETIME_TICKS: u32 = 120;

/// Laser projectile collision radius.
pub const PROJECTILE_RADIUS: f64 = 4.0;

/// Lateral offset of the two cosmetic shots of a player volley.
pub const VOLLEY_SPREAD: f64 = 10.0;

/// Ammunition consumed by one trigger pull, independent of projectile count.
pub const AMMO_PER_VOLLEY: u32 = 1;

// --- Rockets ---

/// Initial rocket speed.
pub const MISSILE_SPEED: f64 = 8.0;

/// Hard cap on rocket speed after homing.
pub const MISSILE_MAX_SPEED: f64 = 10.0;

/// Fraction of the velocity error corrected per tick while homing.
pub const MISSILE_HOMING_BLEND: f64 = 0.15;

/// Rocket lifetime, independent of homing.
pub const MISSILE_LIFETIME_TICKS: u32 = 180;

/// Rocket damage payload.
pub const MISSILE_DAMAGE: f64 = 1000.0;

/// Rocket collision radius.
pub const MISSILE_RADIUS: f64 = 6.0;

/// Ticks between rocket launches.
pub const MISSILE_COOLDOWN_TICKS: u32 = 180;

// --- Combatants ---

/// Default hit circle radius of a ship.
pub const COMBATANT_RADIUS: f64 = 20.0;

/// Player ship defaults.
pub const PLAYER_MAX_HP: f64 = 4000.0;
pub const PLAYER_MAX_SHIELD: f64 = 2000.0;
pub const PLAYER_SPEED: f64 = 4.0;
pub const PLAYER_ATTACK_RANGE: f64 = 600.0;

/// Distance at which a MoveTo order counts as arrived.
pub const ARRIVAL_RADIUS: f64 = 2.0;

// --- NPC behavior ---

pub const NPC_DETECTION_RANGE: f64 = 400.0;
pub const NPC_ATTACK_RANGE: f64 = 350.0;
pub const NPC_MIN_DISTANCE: f64 = 200.0;

/// Width of the hold band below `min_distance`.
pub const NPC_DISTANCE_BAND: f64 = 20.0;

/// Speed factor when backing off a target that is too close.
pub const NPC_RETREAT_SPEED_FACTOR: f64 = 0.5;

/// Hull ratio at or below which an NPC flees.
pub const NPC_FLEE_THRESHOLD: f64 = 0.5;

pub const NPC_FLEE_DURATION_TICKS: u32 = 180;
pub const NPC_ALERT_DURATION_TICKS: u32 = 300;

/// Ticks an attacking NPC keeps pursuing a last seen position.
pub const NPC_LOST_CONTACT_TICKS: u32 = 600;

pub const NPC_FIRE_RATE_TICKS: u32 = 90;
pub const NPC_PROJECTILE_SPEED: f64 = 10.0;

pub const NPC_STRAFE_INTERVAL_TICKS: u32 = 120;
pub const NPC_STRAFE_SPEED_FACTOR: f64 = 0.5;
pub const NPC_JITTER_INTERVAL_TICKS: u32 = 20;
pub const NPC_JITTER_MAGNITUDE: f64 = 0.3;

/// Radius of the default patrol orbit around an NPC's home point.
pub const PATROL_RADIUS: f64 = 150.0;

/// Angular step of the patrol orbit (radians per tick).
pub const PATROL_ANGULAR_STEP: f64 = 0.01;

// --- Regeneration ---

/// Ticks without damage before shields regenerate.
pub const SHIELD_REGEN_DELAY_TICKS: u32 = 300;

/// Fraction of max shield restored per tick once regenerating.
pub const SHIELD_REGEN_FRACTION_PER_TICK: f64 = 0.001;

/// Ticks without damage before the player's auto-repair kicks in.
pub const REPAIR_DELAY_TICKS: u32 = 600;

/// Fraction of max hull restored per tick while repairing.
pub const REPAIR_FRACTION_PER_TICK: f64 = 0.0005;

/// Fraction of max hull an NPC recovers per tick while patrolling.
pub const NPC_PATROL_REGEN_FRACTION_PER_TICK: f64 = 0.001;

// --- Progression ---

/// Experience needed for each level, ascending. Index 0 is level 1.
pub const LEVEL_THRESHOLDS: [u64; 16] = [
    0,
    10_000,
    20_000,
    40_000,
    80_000,
    160_000,
    320_000,
    640_000,
    1_280_000,
    2_560_000,
    5_120_000,
    10_240_000,
    20_480_000,
    40_960_000,
    81_920_000,
    163_840_000,
];
