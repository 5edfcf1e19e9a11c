//! Simulation constants and tuning parameters.

/// Nominal tick rate of the runtime shell (Hz). The engine itself accepts
/// a measured delta-time per tick.
pub const TICK_RATE: u32 = 60;

/// Upper bound on a single tick's delta-time (seconds). Frame hitches are
/// clamped to this to bound integration error.
pub const MAX_FRAME_DT: f64 = 0.1;

// --- Player ---

/// Player hull radius.
pub const PLAYER_RADIUS: f64 = 20.0;

/// Vertical offset of the player spawn point from the bottom edge.
pub const PLAYER_SPAWN_BOTTOM_OFFSET: f64 = 100.0;

/// Starting shield pool before any shield generator is crafted.
pub const STARTING_SHIELD: f64 = 50.0;

// --- Bullets ---

pub const BULLET_SPEED: f64 = 500.0;
pub const BULLET_RADIUS: f64 = 5.0;
pub const BULLET_LIFETIME_SECS: f64 = 2.0;

/// Angular step between bullets of a spread-weapon fan (radians).
pub const SPREAD_FAN_STEP: f64 = 0.2;

/// Half-width of the uniform aim perturbation in ensemble mode (radians).
pub const ENSEMBLE_JITTER: f64 = 0.15;

// --- Targets and pairs ---

pub const TARGET_RADIUS: f64 = 15.0;

/// Maximum drift speed per axis for freshly spawned targets (+/- half of this).
pub const TARGET_DRIFT_SPEED: f64 = 50.0;

/// Maximum allowed separation between entangled pair members.
pub const PAIR_MAX_SEPARATION: f64 = 200.0;

/// Spawn scatter of pair member b around member a (+/- half of this per axis).
pub const PAIR_SPAWN_SCATTER: f64 = 150.0;

// --- Obstacles ---

pub const OBSTACLE_BASE_RADIUS: f64 = 20.0;
pub const OBSTACLE_RADIUS_PER_LEVEL: f64 = 2.0;
pub const OBSTACLE_BASE_DAMAGE: f64 = 10.0;
pub const OBSTACLE_DAMAGE_PER_LEVEL: f64 = 2.0;
pub const OBSTACLE_BASE_SPEED: f64 = 100.0;
pub const OBSTACLE_SPEED_PER_LEVEL: f64 = 20.0;

/// Perpendicular spawn jitter (+/- half of this).
pub const OBSTACLE_JITTER_SPEED: f64 = 100.0;

/// Distance outside the chosen edge at which obstacles appear.
pub const OBSTACLE_SPAWN_INSET: f64 = 20.0;

/// Obstacles beyond this margin outside the viewport are removed.
pub const OFFSCREEN_MARGIN: f64 = 50.0;

// --- Pickups ---

pub const PICKUP_RADIUS: f64 = 10.0;
pub const PICKUP_LIFETIME_SECS: f64 = 5.0;

/// Per-tick velocity damping factor.
pub const PICKUP_DRAG: f64 = 0.95;

/// Radius within which pickups home toward the player.
pub const PICKUP_ATTRACT_RADIUS: f64 = 100.0;

/// Homing acceleration magnitude (units/s^2).
pub const PICKUP_ATTRACT_ACCEL: f64 = 200.0;

/// Spawn scatter speed (+/- half of this per axis).
pub const PICKUP_SCATTER_SPEED: f64 = 50.0;

/// Chance that a kill drops a material pickup.
pub const DROP_CHANCE: f64 = 0.3;

// --- Particles ---

pub const EXPLOSION_PARTICLE_COUNT: u32 = 10;
pub const PARTICLE_LIFETIME_SECS: f64 = 0.5;

/// Maximum particle ejection speed per axis (+/- half of this).
pub const PARTICLE_SPEED: f64 = 200.0;

/// Particle radius range: MIN + rand * SPAN.
pub const PARTICLE_MIN_RADIUS: f64 = 2.0;
pub const PARTICLE_RADIUS_SPAN: f64 = 5.0;

/// Explosion hue range (degrees): red through yellow.
pub const PARTICLE_HUE_SPAN: f64 = 60.0;

// --- Level curve and spawning ---

/// Seconds of play per level.
pub const LEVEL_DURATION_SECS: f64 = 30.0;

pub const TARGET_SPAWN_BASE_SECS: f64 = 2.0;
pub const TARGET_SPAWN_MIN_SECS: f64 = 0.5;
pub const TARGET_SPAWN_STEP_SECS: f64 = 0.1;

pub const OBSTACLE_SPAWN_BASE_SECS: f64 = 3.0;
pub const OBSTACLE_SPAWN_MIN_SECS: f64 = 1.0;
pub const OBSTACLE_SPAWN_STEP_SECS: f64 = 0.15;

/// Base count of the session-start wave: `INITIAL_WAVE_BASE + level` units.
pub const INITIAL_WAVE_BASE: u32 = 3;

/// Delay before the session-start wave spawns, giving the presentation
/// layer time to report valid viewport dimensions.
pub const INITIAL_WAVE_DELAY_SECS: f64 = 0.1;

// --- Scoring and drops ---

pub const SCORE_PER_KILL: u32 = 10;

/// Tokens awarded per kill: base + level / 2.
pub const TOKENS_PER_KILL_BASE: u32 = 1;

// --- Shop upgrades ---

pub const UPGRADE_SPEED_STEP: f64 = 30.0;
pub const UPGRADE_FIRE_RATE_STEP: f64 = 0.2;
pub const UPGRADE_HEALTH_STEP: f64 = 25.0;

pub const UPGRADE_SPEED_BASE_COST: u32 = 10;
pub const UPGRADE_FIRE_RATE_BASE_COST: u32 = 15;
pub const UPGRADE_HEALTH_BASE_COST: u32 = 20;

/// Each completed upgrade of an axis raises its next cost by this much.
pub const UPGRADE_COST_INCREMENT: u32 = 5;

// --- Display colors ---

pub const TARGET_COLOR: &str = "#4fc3f7";
pub const OBSTACLE_COLOR: &str = "#ff4444";
