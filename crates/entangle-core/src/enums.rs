//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game state. Only `Playing` admits the physics step; every
/// other state freezes the simulation (render-only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    /// Crafting panel open.
    Crafting,
    /// Upgrade shop panel open.
    Shop,
    /// Leaderboard panel open.
    Leaderboard,
    /// Terminal state; only `Restart` leaves it (viewing the leaderboard
    /// is allowed and returns here).
    GameOver,
}

/// Firing-mode variant, selectable at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireMode {
    /// Deterministic aim.
    #[default]
    Individual,
    /// Probabilistic aim jitter on every bullet.
    Ensemble,
    /// Spawns linked pairs instead of solitary targets; destroying one
    /// member destroys both.
    EntangledPair,
}

/// Collectible resource kinds held in the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    QuantumParticles,
    EnergyCores,
    MetalScraps,
    Crystals,
    Tokens,
}

/// Hull classes in the equipment catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipKind {
    #[default]
    Basic,
    Fast,
    Tank,
    Agile,
}

/// Weapon classes in the equipment catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Basic,
    Rapid,
    Spread,
    Laser,
    Automatic,
}

/// Shield classes in the equipment catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShieldKind {
    /// No shield generator fitted (zero capacity, zero regen).
    #[default]
    None,
    Basic,
    Reinforced,
    Quantum,
}

/// Stat axes purchasable with tokens in the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Speed,
    FireRate,
    Health,
}

/// An equippable item addressed by (category, name), as the crafting
/// panel presents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "name")]
pub enum CraftableItem {
    Ship(ShipKind),
    Weapon(WeaponKind),
    Shield(ShieldKind),
}
