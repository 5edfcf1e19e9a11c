//! Entangle runtime shell.
//!
//! Wires the headless simulation engine to the outside world: a
//! fixed-rate game-loop thread, the leaderboard persistence
//! collaborator, player profile storage, and a JSON-over-stdio
//! protocol for the presentation layer.

pub mod game_loop;
pub mod leaderboard;
pub mod profile;
pub mod state;

pub use entangle_core as core;
