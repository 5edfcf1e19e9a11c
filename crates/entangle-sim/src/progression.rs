//! Crafting and token-upgrade logic.
//!
//! All operations are atomic: on any failure nothing is debited and
//! nothing is equipped or changed.

use entangle_core::catalog;
use entangle_core::constants::*;
use entangle_core::enums::{CraftableItem, StatKind};
use entangle_core::stats::{Inventory, Loadout, PlayerStats};

/// Craft an item and equip it immediately. Fails if the item has no
/// recipe or any resource is short; on failure the inventory, loadout,
/// and stats are untouched.
pub fn craft(
    item: CraftableItem,
    stats: &mut PlayerStats,
    loadout: &mut Loadout,
    inventory: &mut Inventory,
) -> Result<(), String> {
    let recipe =
        catalog::recipe(item).ok_or_else(|| format!("No recipe for {item:?}"))?;
    if !inventory.try_debit_all(recipe) {
        return Err("Insufficient resources".into());
    }
    equip(item, stats, loadout);
    Ok(())
}

/// Equip an item, re-deriving stat baselines.
///
/// Ship swaps preserve accumulated upgrade deltas: the delta between the
/// current stat and the old baseline is reapplied on top of the new
/// ship's baseline. Shield swaps reset shield and capacity outright.
fn equip(item: CraftableItem, stats: &mut PlayerStats, loadout: &mut Loadout) {
    match item {
        CraftableItem::Weapon(kind) => {
            let profile = catalog::weapon_profile(kind);
            let rate_delta = stats.fire_rate - stats.base_fire_rate;
            stats.base_fire_rate = profile.fire_rate;
            stats.fire_rate = profile.fire_rate + rate_delta;
            stats.damage = profile.damage;
            loadout.weapon = kind;
        }
        CraftableItem::Ship(kind) => {
            let profile = catalog::ship_profile(kind);
            let speed_delta = stats.speed - stats.base_speed;
            let health_delta = stats.max_health - stats.base_max_health;
            stats.base_speed = profile.speed;
            stats.speed = profile.speed + speed_delta;
            stats.base_max_health = profile.health;
            stats.max_health = profile.health + health_delta;
            stats.health = stats.health.min(stats.max_health);
            loadout.ship = kind;
        }
        CraftableItem::Shield(kind) => {
            let profile = catalog::shield_profile(kind);
            stats.max_shield = profile.capacity;
            stats.shield = profile.capacity;
            loadout.shield = kind;
        }
    }
}

/// How many times a stat axis has been upgraded, derived from its
/// current value relative to the equipped-gear baseline (there is no
/// separate purchase counter).
pub fn upgrade_count(stat: StatKind, stats: &PlayerStats) -> u32 {
    let (delta, step) = match stat {
        StatKind::Speed => (stats.speed - stats.base_speed, UPGRADE_SPEED_STEP),
        StatKind::FireRate => (
            stats.fire_rate - stats.base_fire_rate,
            UPGRADE_FIRE_RATE_STEP,
        ),
        StatKind::Health => (
            stats.max_health - stats.base_max_health,
            UPGRADE_HEALTH_STEP,
        ),
    };
    (delta / step).round().max(0.0) as u32
}

/// Token cost of the next upgrade on an axis; rises linearly with the
/// number of upgrades already applied.
pub fn upgrade_cost(stat: StatKind, stats: &PlayerStats) -> u32 {
    let base = match stat {
        StatKind::Speed => UPGRADE_SPEED_BASE_COST,
        StatKind::FireRate => UPGRADE_FIRE_RATE_BASE_COST,
        StatKind::Health => UPGRADE_HEALTH_BASE_COST,
    };
    base + upgrade_count(stat, stats) * UPGRADE_COST_INCREMENT
}

/// Buy one increment of a stat axis. Returns the tokens paid, or an
/// error with nothing debited and no stat changed.
pub fn apply_upgrade(
    stat: StatKind,
    stats: &mut PlayerStats,
    inventory: &mut Inventory,
) -> Result<u32, String> {
    let cost = upgrade_cost(stat, stats);
    if inventory.tokens < cost {
        return Err(format!(
            "Insufficient tokens: have {}, need {}",
            inventory.tokens, cost
        ));
    }
    inventory.tokens -= cost;
    match stat {
        StatKind::Speed => stats.speed += UPGRADE_SPEED_STEP,
        StatKind::FireRate => stats.fire_rate += UPGRADE_FIRE_RATE_STEP,
        StatKind::Health => {
            // The health upgrade also heals by the same amount.
            stats.max_health += UPGRADE_HEALTH_STEP;
            stats.health += UPGRADE_HEALTH_STEP;
        }
    }
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use entangle_core::enums::{Resource, ShieldKind, ShipKind, WeaponKind};

    fn rich_inventory() -> Inventory {
        Inventory {
            quantum_particles: 100,
            energy_cores: 100,
            metal_scraps: 100,
            crystals: 100,
            tokens: 1000,
        }
    }

    #[test]
    fn craft_debits_and_equips() {
        let mut stats = PlayerStats::default();
        let mut loadout = Loadout::default();
        let mut inventory = Inventory {
            quantum_particles: 5,
            energy_cores: 2,
            ..Default::default()
        };

        craft(
            CraftableItem::Weapon(WeaponKind::Rapid),
            &mut stats,
            &mut loadout,
            &mut inventory,
        )
        .unwrap();

        assert_eq!(inventory.quantum_particles, 0);
        assert_eq!(inventory.energy_cores, 0);
        assert_eq!(loadout.weapon, WeaponKind::Rapid);
        assert_eq!(stats.base_fire_rate, 1.0);

        // Second attempt fails with inventory and loadout unchanged.
        let before = inventory;
        assert!(craft(
            CraftableItem::Weapon(WeaponKind::Rapid),
            &mut stats,
            &mut loadout,
            &mut inventory,
        )
        .is_err());
        assert_eq!(inventory, before);
        assert_eq!(loadout.weapon, WeaponKind::Rapid);
    }

    #[test]
    fn craft_fails_without_recipe() {
        let mut stats = PlayerStats::default();
        let mut loadout = Loadout::default();
        let mut inventory = rich_inventory();
        let before = inventory;

        assert!(craft(
            CraftableItem::Ship(ShipKind::Basic),
            &mut stats,
            &mut loadout,
            &mut inventory,
        )
        .is_err());
        assert_eq!(inventory, before);
    }

    #[test]
    fn ship_swap_preserves_upgrade_deltas() {
        let mut stats = PlayerStats::default();
        let mut loadout = Loadout::default();
        let mut inventory = rich_inventory();

        // Two speed upgrades on the basic hull: 150 -> 210.
        apply_upgrade(StatKind::Speed, &mut stats, &mut inventory).unwrap();
        apply_upgrade(StatKind::Speed, &mut stats, &mut inventory).unwrap();
        assert_eq!(stats.speed, 210.0);

        craft(
            CraftableItem::Ship(ShipKind::Fast),
            &mut stats,
            &mut loadout,
            &mut inventory,
        )
        .unwrap();

        // Fast hull baseline 200 plus the preserved +60 delta.
        assert_eq!(stats.base_speed, 200.0);
        assert_eq!(stats.speed, 260.0);
        assert_eq!(upgrade_count(StatKind::Speed, &stats), 2);
    }

    #[test]
    fn ship_swap_clamps_health_to_new_capacity() {
        let mut stats = PlayerStats::default();
        let mut loadout = Loadout::default();
        let mut inventory = rich_inventory();

        assert_eq!(stats.health, 100.0);
        craft(
            CraftableItem::Ship(ShipKind::Fast),
            &mut stats,
            &mut loadout,
            &mut inventory,
        )
        .unwrap();

        // Fast hull holds 80; current hull is clamped down.
        assert_eq!(stats.max_health, 80.0);
        assert_eq!(stats.health, 80.0);
    }

    #[test]
    fn shield_swap_resets_pool_outright() {
        let mut stats = PlayerStats::default();
        let mut loadout = Loadout::default();
        let mut inventory = rich_inventory();

        stats.shield = 3.0;
        craft(
            CraftableItem::Shield(ShieldKind::Reinforced),
            &mut stats,
            &mut loadout,
            &mut inventory,
        )
        .unwrap();

        assert_eq!(stats.max_shield, 100.0);
        assert_eq!(stats.shield, 100.0);
        assert_eq!(loadout.shield, ShieldKind::Reinforced);
    }

    #[test]
    fn upgrade_cost_rises_with_each_purchase() {
        let mut stats = PlayerStats::default();
        let mut inventory = rich_inventory();

        assert_eq!(upgrade_cost(StatKind::Speed, &stats), 10);
        assert_eq!(
            apply_upgrade(StatKind::Speed, &mut stats, &mut inventory).unwrap(),
            10
        );
        assert_eq!(upgrade_cost(StatKind::Speed, &stats), 15);
        assert_eq!(
            apply_upgrade(StatKind::Speed, &mut stats, &mut inventory).unwrap(),
            15
        );
        assert_eq!(upgrade_cost(StatKind::Speed, &stats), 20);
    }

    #[test]
    fn fire_rate_upgrade_count_survives_float_accumulation() {
        let mut stats = PlayerStats::default();
        let mut inventory = rich_inventory();

        for expected in 1..=5 {
            apply_upgrade(StatKind::FireRate, &mut stats, &mut inventory).unwrap();
            assert_eq!(upgrade_count(StatKind::FireRate, &stats), expected);
        }
    }

    #[test]
    fn upgrade_fails_without_tokens() {
        let mut stats = PlayerStats::default();
        let mut inventory = Inventory {
            tokens: 5,
            ..Default::default()
        };
        let speed_before = stats.speed;

        assert!(apply_upgrade(StatKind::Speed, &mut stats, &mut inventory).is_err());
        assert_eq!(inventory.tokens, 5);
        assert_eq!(stats.speed, speed_before);
    }

    #[test]
    fn health_upgrade_heals_immediately() {
        let mut stats = PlayerStats::default();
        let mut inventory = rich_inventory();
        stats.health = 40.0;

        apply_upgrade(StatKind::Health, &mut stats, &mut inventory).unwrap();
        assert_eq!(stats.max_health, 125.0);
        assert_eq!(stats.health, 65.0);
    }
}
