//! Player RPG state: stat block, equipment selection, and inventory.
//!
//! Baseline fields (`base_*`) always mirror the currently equipped gear;
//! the difference between a stat and its baseline is the accumulated
//! token-upgrade delta, which survives equipment swaps.

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::constants::STARTING_SHIELD;
use crate::enums::{Resource, ShieldKind, ShipKind, WeaponKind};

/// Player stat block.
///
/// Invariants, re-established after every mutation:
/// `0 <= health <= max_health`, `0 <= shield <= max_shield`,
/// `speed >= base_speed`, `fire_rate >= base_fire_rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: f64,
    pub max_health: f64,
    /// Hull capacity attributable to the equipped ship alone.
    pub base_max_health: f64,
    pub shield: f64,
    pub max_shield: f64,
    pub speed: f64,
    /// Speed attributable to the equipped ship alone.
    pub base_speed: f64,
    pub fire_rate: f64,
    /// Fire rate attributable to the equipped weapon alone.
    pub base_fire_rate: f64,
    pub damage: f64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        let ship = catalog::ship_profile(ShipKind::Basic);
        let weapon = catalog::weapon_profile(WeaponKind::Basic);
        Self {
            health: ship.health,
            max_health: ship.health,
            base_max_health: ship.health,
            shield: STARTING_SHIELD,
            max_shield: STARTING_SHIELD,
            speed: ship.speed,
            base_speed: ship.speed,
            fire_rate: weapon.fire_rate,
            base_fire_rate: weapon.fire_rate,
            damage: weapon.damage,
        }
    }
}

impl PlayerStats {
    /// Movement speed with upgrades layered on the equipped ship.
    pub fn effective_speed(&self, ship: ShipKind) -> f64 {
        catalog::ship_profile(ship).speed + (self.speed - self.base_speed)
    }

    /// Shots per second with upgrades layered on the equipped weapon.
    pub fn effective_fire_rate(&self, weapon: WeaponKind) -> f64 {
        catalog::weapon_profile(weapon).fire_rate + (self.fire_rate - self.base_fire_rate)
    }

    /// Apply incoming damage, shield first with excess spilling to hull.
    /// Returns the amount the shield absorbed.
    pub fn apply_damage(&mut self, amount: f64) -> f64 {
        let absorbed = amount.min(self.shield);
        self.shield = (self.shield - amount).max(0.0);
        let spill = amount - absorbed;
        if spill > 0.0 {
            self.health = (self.health - spill).max(0.0);
        }
        absorbed
    }

    /// Regenerate shield over `dt` seconds at the given rate.
    pub fn regen_shield(&mut self, regen_per_sec: f64, dt: f64) {
        if self.shield < self.max_shield {
            self.shield = (self.shield + regen_per_sec * dt).min(self.max_shield);
        }
    }

    /// Refill hull and shield and drop stat deltas back to their
    /// baselines, as a session restart does. Equipment-derived baselines
    /// are untouched.
    pub fn reset_for_new_session(&mut self) {
        self.speed = self.base_speed;
        self.fire_rate = self.base_fire_rate;
        self.health = self.max_health;
        self.shield = self.max_shield;
    }
}

/// Currently equipped gear, each a key into the static catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub ship: ShipKind,
    pub weapon: WeaponKind,
    pub shield: ShieldKind,
}

/// Resource counts. Never negative; crafting debits are all-or-nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub quantum_particles: u32,
    pub energy_cores: u32,
    pub metal_scraps: u32,
    pub crystals: u32,
    pub tokens: u32,
}

impl Inventory {
    pub fn count(&self, kind: Resource) -> u32 {
        match kind {
            Resource::QuantumParticles => self.quantum_particles,
            Resource::EnergyCores => self.energy_cores,
            Resource::MetalScraps => self.metal_scraps,
            Resource::Crystals => self.crystals,
            Resource::Tokens => self.tokens,
        }
    }

    pub fn add(&mut self, kind: Resource, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    pub fn can_afford(&self, costs: &[(Resource, u32)]) -> bool {
        costs.iter().all(|&(kind, amount)| self.count(kind) >= amount)
    }

    /// Debit every listed cost, or none of them. Returns whether the
    /// debit happened.
    pub fn try_debit_all(&mut self, costs: &[(Resource, u32)]) -> bool {
        if !self.can_afford(costs) {
            return false;
        }
        for &(kind, amount) in costs {
            *self.slot_mut(kind) -= amount;
        }
        true
    }

    fn slot_mut(&mut self, kind: Resource) -> &mut u32 {
        match kind {
            Resource::QuantumParticles => &mut self.quantum_particles,
            Resource::EnergyCores => &mut self.energy_cores,
            Resource::MetalScraps => &mut self.metal_scraps,
            Resource::Crystals => &mut self.crystals,
            Resource::Tokens => &mut self.tokens,
        }
    }
}
