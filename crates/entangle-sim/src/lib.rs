//! Simulation engine for Entangle.
//!
//! Owns the hecs ECS world, runs the per-tick systems in a fixed order,
//! and produces WorldSnapshots for the render sink. Completely headless,
//! enabling deterministic testing.

pub mod engine;
pub mod progression;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use entangle_core as core;

#[cfg(test)]
mod tests;
