//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::{Resource, WeaponKind};
use crate::types::{Position, Velocity};

/// The player's ship. One instance per session, never despawned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    /// Hull radius for collision tests.
    pub radius: f64,
    /// Simulation time of the last shot, for fire-rate cooldown.
    pub last_shot_secs: Option<f64>,
}

/// A solitary destructible target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target {
    pub radius: f64,
    /// 1 = alive, 0 = destroyed (removed by the end-of-tick sweep).
    pub health: u32,
}

/// One half of an entangled pair. Carries its own kinematics because the
/// pair is a single entity whose halves move and collide independently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PairMember {
    pub position: Position,
    pub velocity: Velocity,
    pub radius: f64,
    pub health: u32,
}

/// Two linked targets. Destroying either member destroys both; their
/// separation is re-clamped each tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EntangledPair {
    pub a: PairMember,
    pub b: PairMember,
}

/// A projectile fired by the player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet {
    pub radius: f64,
    pub damage: f64,
    /// Weapon that fired it (display color lookup).
    pub weapon: WeaponKind,
}

/// A hazard drifting across the arena. Contact with the player applies
/// `damage` and neutralizes the obstacle in place (velocity and radius
/// zeroed; the sweep removes it).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub radius: f64,
    pub damage: f64,
}

/// A collectible resource drop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: Resource,
    pub radius: f64,
    pub collected: bool,
}

/// Cosmetic explosion debris. Zero gameplay effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub radius: f64,
    /// HSL hue in degrees.
    pub hue: f64,
    /// Initial lifetime, for alpha fade.
    pub max_lifetime_secs: f64,
}

/// Remaining time before the entity expires.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifetime {
    pub remaining_secs: f64,
}

/// Monotone insertion-order key. Collision resolution and snapshot
/// building iterate entities sorted by this, so tick outcomes do not
/// depend on archetype storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnId(pub u64);
