//! Session counters and spawn pacing state.
//!
//! Kept on the engine, not in the ECS world — they describe the session,
//! not an entity.

use entangle_core::constants::*;

/// Running score state for one play-through.
#[derive(Debug, Clone)]
pub struct SessionStats {
    pub score: u32,
    pub hits: u32,
    pub misses: u32,
    pub level: u32,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            score: 0,
            hits: 0,
            misses: 0,
            level: 1,
        }
    }
}

impl SessionStats {
    /// Hit percentage; 100 until a shot has resolved.
    pub fn accuracy_percent(&self) -> f64 {
        let resolved = self.hits + self.misses;
        if resolved == 0 {
            100.0
        } else {
            self.hits as f64 / resolved as f64 * 100.0
        }
    }

    /// The level curve: one level per 30 seconds of play, never regressing.
    pub fn level_for_elapsed(elapsed_secs: f64) -> u32 {
        (elapsed_secs / LEVEL_DURATION_SECS) as u32 + 1
    }
}

/// Spawn pacing: current intervals and the simulation times of the last
/// spawn attempts. Timers reset on attempt even when a degenerate
/// viewport turns the spawn itself into a no-op.
#[derive(Debug, Clone)]
pub struct SpawnTimers {
    pub target_interval_secs: f64,
    pub obstacle_interval_secs: f64,
    pub last_target_spawn_secs: f64,
    pub last_obstacle_spawn_secs: f64,
    /// The session-start wave has not been placed yet.
    pub initial_wave_pending: bool,
}

impl Default for SpawnTimers {
    fn default() -> Self {
        Self {
            target_interval_secs: TARGET_SPAWN_BASE_SECS,
            obstacle_interval_secs: OBSTACLE_SPAWN_BASE_SECS,
            last_target_spawn_secs: 0.0,
            last_obstacle_spawn_secs: 0.0,
            initial_wave_pending: true,
        }
    }
}

impl SpawnTimers {
    /// Shrink the spawn intervals for a freshly reached level.
    pub fn rescale(&mut self, level: u32) {
        let level = level as f64;
        self.target_interval_secs =
            (TARGET_SPAWN_BASE_SECS - level * TARGET_SPAWN_STEP_SECS).max(TARGET_SPAWN_MIN_SECS);
        self.obstacle_interval_secs = (OBSTACLE_SPAWN_BASE_SECS
            - level * OBSTACLE_SPAWN_STEP_SECS)
            .max(OBSTACLE_SPAWN_MIN_SECS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_curve_is_floor_of_elapsed_over_thirty() {
        assert_eq!(SessionStats::level_for_elapsed(0.0), 1);
        assert_eq!(SessionStats::level_for_elapsed(29.9), 1);
        assert_eq!(SessionStats::level_for_elapsed(30.0), 2);
        assert_eq!(SessionStats::level_for_elapsed(89.9), 3);
        assert_eq!(SessionStats::level_for_elapsed(90.0), 4);
    }

    #[test]
    fn spawn_intervals_shrink_but_never_below_floor() {
        let mut timers = SpawnTimers::default();
        timers.rescale(2);
        assert!((timers.target_interval_secs - 1.8).abs() < 1e-9);
        assert!((timers.obstacle_interval_secs - 2.7).abs() < 1e-9);

        timers.rescale(100);
        assert_eq!(timers.target_interval_secs, TARGET_SPAWN_MIN_SECS);
        assert_eq!(timers.obstacle_interval_secs, OBSTACLE_SPAWN_MIN_SECS);
    }

    #[test]
    fn accuracy_is_full_before_first_resolution() {
        let mut session = SessionStats::default();
        assert_eq!(session.accuracy_percent(), 100.0);
        session.hits = 3;
        session.misses = 1;
        assert!((session.accuracy_percent() - 75.0).abs() < 1e-9);
    }
}
