//! Static equipment catalog: ship/weapon/shield stat tables and crafting
//! recipes. Pure data — no state, no RNG.

use crate::enums::{CraftableItem, Resource, ShieldKind, ShipKind, WeaponKind};

/// Hull stats: base movement speed and hull capacity.
#[derive(Debug, Clone, Copy)]
pub struct ShipProfile {
    pub speed: f64,
    pub health: f64,
}

/// Weapon stats. `spread` is the bullet count of a fanned shot; weapons
/// without it fire a single bullet along the aim vector.
#[derive(Debug, Clone, Copy)]
pub struct WeaponProfile {
    /// Shots per second before upgrades.
    pub fire_rate: f64,
    pub damage: f64,
    pub color: &'static str,
    /// Automatic weapons fire continuously while the fire control is held.
    pub automatic: bool,
    pub spread: Option<u32>,
}

/// Shield generator stats.
#[derive(Debug, Clone, Copy)]
pub struct ShieldProfile {
    pub capacity: f64,
    /// Points regenerated per second.
    pub regen: f64,
}

pub fn ship_profile(kind: ShipKind) -> ShipProfile {
    match kind {
        ShipKind::Basic => ShipProfile {
            speed: 150.0,
            health: 100.0,
        },
        ShipKind::Fast => ShipProfile {
            speed: 200.0,
            health: 80.0,
        },
        ShipKind::Tank => ShipProfile {
            speed: 100.0,
            health: 200.0,
        },
        ShipKind::Agile => ShipProfile {
            speed: 180.0,
            health: 120.0,
        },
    }
}

pub fn weapon_profile(kind: WeaponKind) -> WeaponProfile {
    match kind {
        WeaponKind::Basic => WeaponProfile {
            fire_rate: 0.5,
            damage: 10.0,
            color: "#4caf50",
            automatic: false,
            spread: None,
        },
        WeaponKind::Rapid => WeaponProfile {
            fire_rate: 1.0,
            damage: 8.0,
            color: "#ff9800",
            automatic: false,
            spread: None,
        },
        WeaponKind::Spread => WeaponProfile {
            fire_rate: 0.4,
            damage: 12.0,
            color: "#9c27b0",
            automatic: false,
            spread: Some(3),
        },
        WeaponKind::Laser => WeaponProfile {
            fire_rate: 0.3,
            damage: 20.0,
            color: "#f44336",
            automatic: false,
            spread: None,
        },
        WeaponKind::Automatic => WeaponProfile {
            fire_rate: 2.0,
            damage: 7.0,
            color: "#00bcd4",
            automatic: true,
            spread: None,
        },
    }
}

pub fn shield_profile(kind: ShieldKind) -> ShieldProfile {
    match kind {
        ShieldKind::None => ShieldProfile {
            capacity: 0.0,
            regen: 0.0,
        },
        ShieldKind::Basic => ShieldProfile {
            capacity: 50.0,
            regen: 5.0,
        },
        ShieldKind::Reinforced => ShieldProfile {
            capacity: 100.0,
            regen: 10.0,
        },
        ShieldKind::Quantum => ShieldProfile {
            capacity: 150.0,
            regen: 15.0,
        },
    }
}

/// Display color for a resource pickup.
pub fn resource_color(kind: Resource) -> &'static str {
    match kind {
        Resource::QuantumParticles => "#9c27b0",
        Resource::EnergyCores => "#ff9800",
        Resource::MetalScraps => "#757575",
        Resource::Crystals => "#00bcd4",
        Resource::Tokens => "#ffd54f",
    }
}

/// Crafting recipe for an item, or `None` if the item is not craftable
/// (starter equipment and the bare-hull shield slot have no recipe).
pub fn recipe(item: CraftableItem) -> Option<&'static [(Resource, u32)]> {
    use Resource::*;
    match item {
        CraftableItem::Weapon(WeaponKind::Rapid) => {
            Some(&[(QuantumParticles, 5), (EnergyCores, 2)])
        }
        CraftableItem::Weapon(WeaponKind::Spread) => {
            Some(&[(QuantumParticles, 8), (Crystals, 3)])
        }
        CraftableItem::Weapon(WeaponKind::Laser) => Some(&[(EnergyCores, 5), (Crystals, 5)]),
        CraftableItem::Weapon(WeaponKind::Automatic) => {
            Some(&[(QuantumParticles, 10), (EnergyCores, 5), (MetalScraps, 5)])
        }
        CraftableItem::Ship(ShipKind::Fast) => Some(&[(MetalScraps, 10), (EnergyCores, 3)]),
        CraftableItem::Ship(ShipKind::Tank) => Some(&[(MetalScraps, 15), (Crystals, 5)]),
        CraftableItem::Ship(ShipKind::Agile) => Some(&[(MetalScraps, 8), (EnergyCores, 5)]),
        CraftableItem::Shield(ShieldKind::Basic) => {
            Some(&[(EnergyCores, 3), (MetalScraps, 5)])
        }
        CraftableItem::Shield(ShieldKind::Reinforced) => {
            Some(&[(EnergyCores, 5), (Crystals, 3)])
        }
        CraftableItem::Shield(ShieldKind::Quantum) => {
            Some(&[(QuantumParticles, 10), (Crystals, 5)])
        }
        CraftableItem::Weapon(WeaponKind::Basic)
        | CraftableItem::Ship(ShipKind::Basic)
        | CraftableItem::Shield(ShieldKind::None) => None,
    }
}

/// Resource kinds eligible for random kill drops (tokens are credited
/// directly and never dropped as pickups).
pub const DROPPABLE_RESOURCES: [Resource; 4] = [
    Resource::QuantumParticles,
    Resource::EnergyCores,
    Resource::MetalScraps,
    Resource::Crystals,
];
