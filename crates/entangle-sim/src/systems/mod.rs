//! Per-tick systems operating on the simulation world.
//!
//! Systems are free functions over `&mut World` plus the session state
//! they need. The engine runs them in a fixed order each tick, so the
//! outcome of a tick is fully determined by (state, commands, dt, seed).

pub mod cleanup;
pub mod combat;
pub mod motion;
pub mod obstacles;
pub mod particles;
pub mod pickups;
pub mod player;
pub mod snapshot;
pub mod spawner;
