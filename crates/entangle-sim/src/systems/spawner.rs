//! Time-driven spawning: the session-start wave and the per-interval
//! target/obstacle spawns.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use entangle_core::constants::{INITIAL_WAVE_BASE, INITIAL_WAVE_DELAY_SECS};
use entangle_core::enums::FireMode;
use entangle_core::types::{SimTime, Viewport};

use crate::session::{SessionStats, SpawnTimers};
use crate::world_setup;

/// Check timers and spawn any due units. Spawn functions are no-ops on a
/// degenerate viewport; interval timers still reset so a hidden arena
/// does not burst-spawn on becoming visible.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    timers: &mut SpawnTimers,
    session: &SessionStats,
    mode: FireMode,
    viewport: Viewport,
    time: &SimTime,
    spawn_counter: &mut u64,
) {
    // Session-start wave, deferred until the viewport has reported
    // valid dimensions.
    if timers.initial_wave_pending
        && time.elapsed_secs >= INITIAL_WAVE_DELAY_SECS
        && !viewport.is_degenerate()
    {
        for _ in 0..(INITIAL_WAVE_BASE + session.level) {
            spawn_unit(world, rng, mode, viewport, spawn_counter);
        }
        timers.initial_wave_pending = false;
    }

    if time.elapsed_secs - timers.last_target_spawn_secs > timers.target_interval_secs {
        spawn_unit(world, rng, mode, viewport, spawn_counter);
        timers.last_target_spawn_secs = time.elapsed_secs;
    }

    if time.elapsed_secs - timers.last_obstacle_spawn_secs > timers.obstacle_interval_secs {
        world_setup::spawn_obstacle(world, rng, viewport, session.level, spawn_counter);
        timers.last_obstacle_spawn_secs = time.elapsed_secs;
    }
}

/// One spawn unit: a solitary target, or a linked pair in
/// entangled-pair mode.
fn spawn_unit(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    mode: FireMode,
    viewport: Viewport,
    spawn_counter: &mut u64,
) {
    if mode == FireMode::EntangledPair {
        world_setup::spawn_pair(world, rng, viewport, spawn_counter);
    } else {
        world_setup::spawn_target(world, rng, viewport, spawn_counter);
    }
}
