//! Tests for the simulation engine: determinism, the tick pipeline,
//! combat resolution, progression commands, and the session lifecycle.

use entangle_core::commands::{ControlState, PlayerCommand};
use entangle_core::enums::*;
use entangle_core::events::GameEvent;
use entangle_core::types::{Position, Velocity, Viewport};

use crate::engine::{SimConfig, SimulationEngine};

/// Nominal frame time for tests.
const DT: f64 = 1.0 / 60.0;

fn engine_with_seed(seed: u64) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        seed,
        viewport: Viewport::new(800.0, 600.0),
    })
}

fn run_ticks(engine: &mut SimulationEngine, count: u32) {
    for _ in 0..count {
        engine.tick(DT);
    }
}

/// Aim horizontally right from the player: bullets fly along y = 500,
/// below every spawned target (targets spawn with y <= 450).
fn aim_right(engine: &mut SimulationEngine) {
    let player = engine.player_position();
    engine.set_controls(ControlState {
        aim: Position::new(player.x + 100.0, player.y),
        ..Default::default()
    });
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = engine_with_seed(12345);
    let mut engine_b = engine_with_seed(12345);

    for _ in 0..300 {
        let snap_a = engine_a.tick(DT);
        let snap_b = engine_b.tick(DT);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = engine_with_seed(111);
    let mut engine_b = engine_with_seed(222);

    // The session-start wave places targets at seeded random positions,
    // so snapshots diverge once it lands.
    let mut diverged = false;
    for _ in 0..600 {
        let snap_a = engine_a.tick(DT);
        let snap_b = engine_b.tick(DT);
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Spawning ----

#[test]
fn test_initial_wave_deferred_until_viewport_valid() {
    // No viewport reported yet: nothing can spawn.
    let mut engine = SimulationEngine::new(SimConfig::default());
    run_ticks(&mut engine, 60);
    let snap = engine.tick(DT);
    assert!(snap.targets.is_empty(), "Degenerate viewport must not spawn");
    assert!(snap.obstacles.is_empty());

    // Once dimensions arrive, the pending wave lands.
    engine.queue_command(PlayerCommand::SetViewport {
        width: 800.0,
        height: 600.0,
    });
    run_ticks(&mut engine, 10);
    let snap = engine.tick(DT);
    assert_eq!(snap.targets.len(), 4, "Initial wave is 3 + level targets");
}

#[test]
fn test_initial_wave_count() {
    let mut engine = engine_with_seed(7);
    run_ticks(&mut engine, 30);
    let snap = engine.tick(DT);
    assert_eq!(snap.targets.len(), 4);
    assert!(snap.pairs.is_empty());
}

#[test]
fn test_entangled_mode_spawns_pairs() {
    let mut engine = engine_with_seed(7);
    engine.queue_command(PlayerCommand::SetMode {
        mode: FireMode::EntangledPair,
    });
    run_ticks(&mut engine, 30);
    let snap = engine.tick(DT);
    assert!(snap.targets.is_empty());
    assert_eq!(snap.pairs.len(), 4);
    assert_eq!(snap.hud.target_count, 8, "Pair members count individually");
}

#[test]
fn test_timed_spawns_accumulate() {
    let mut engine = engine_with_seed(3);
    // 5 simulated seconds: initial 4 targets, a target every 2s, an
    // obstacle every 3s.
    let mut saw_obstacle = false;
    for _ in 0..300 {
        let snap = engine.tick(DT);
        saw_obstacle |= !snap.obstacles.is_empty();
    }
    let snap = engine.tick(DT);
    assert!(
        snap.targets.len() >= 6,
        "Expected initial wave plus timed spawns, got {}",
        snap.targets.len()
    );
    assert!(saw_obstacle, "An obstacle should have spawned by 5s");
}

#[test]
fn test_mode_switch_mid_session() {
    let mut engine = engine_with_seed(9);
    engine.queue_command(PlayerCommand::SetMode {
        mode: FireMode::EntangledPair,
    });
    run_ticks(&mut engine, 30);
    engine.queue_command(PlayerCommand::SetMode {
        mode: FireMode::Individual,
    });
    // Another 3 simulated seconds: timed spawns now produce targets.
    run_ticks(&mut engine, 180);
    let snap = engine.tick(DT);
    assert_eq!(snap.pairs.len(), 4, "Existing pairs persist");
    assert!(
        !snap.targets.is_empty(),
        "Timed spawns follow the current mode"
    );
}

// ---- Level curve ----

#[test]
fn test_level_progression() {
    let mut engine = engine_with_seed(1);
    let mut last_level = 0;
    let mut saw_level_up = false;

    for _ in 0..2000 {
        let snap = engine.tick(DT);
        // Monotonic and on-curve.
        assert!(snap.hud.level >= last_level, "Level must never decrease");
        let expected = (snap.time.elapsed_secs / 30.0) as u32 + 1;
        assert_eq!(snap.hud.level, expected);
        last_level = snap.hud.level;
        if snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::LevelUp { level: 2 }))
        {
            saw_level_up = true;
        }
    }

    assert_eq!(last_level, 2, "2000 ticks is just past the 30s boundary");
    assert!(saw_level_up, "LevelUp event should fire at the boundary");
}

// ---- Invariants ----

#[test]
fn test_health_shield_bounds_and_pair_separation() {
    let mut engine = engine_with_seed(42);
    engine.queue_command(PlayerCommand::SetMode {
        mode: FireMode::EntangledPair,
    });

    for i in 0..1800u32 {
        // Periodic hits keep the damage path exercised.
        if i % 300 == 0 {
            let player = engine.player_position();
            engine.spawn_obstacle_at(player, Velocity::default(), 20.0, 10.0);
        }
        let snap = engine.tick(DT);

        let stats = &snap.player.stats;
        assert!(stats.health >= 0.0 && stats.health <= stats.max_health);
        assert!(stats.shield >= 0.0 && stats.shield <= stats.max_shield);
        assert!(stats.speed >= stats.base_speed);
        assert!(stats.fire_rate >= stats.base_fire_rate);

        for pair in &snap.pairs {
            let separation = pair.a.position.distance_to(&pair.b.position);
            assert!(
                separation <= 200.0 + 1e-6,
                "Pair separation {separation} exceeds the constraint"
            );
        }
    }
}

#[test]
fn test_pair_separation_reclamped() {
    let mut engine = engine_with_seed(5);
    engine.queue_command(PlayerCommand::SetMode {
        mode: FireMode::EntangledPair,
    });
    engine.spawn_pair_at(Position::new(100.0, 100.0), Position::new(500.0, 100.0));
    let snap = engine.tick(DT);

    let pair = &snap.pairs[0];
    let separation = pair.a.position.distance_to(&pair.b.position);
    assert!(
        (separation - 200.0).abs() < 1e-6,
        "Member b should be repositioned to exactly the separation limit, got {separation}"
    );
    // Repositioned along the a->b bearing.
    assert!((pair.b.position.x - 300.0).abs() < 1e-6);
    assert!((pair.b.position.y - 100.0).abs() < 1e-6);
}

// ---- Combat ----

#[test]
fn test_point_blank_kill_scenario() {
    let mut engine = engine_with_seed(42);
    let player = engine.player_position();
    engine.spawn_target_at(player, Velocity::default());
    engine.set_controls(ControlState {
        aim: player,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::Shoot);
    let snap = engine.tick(DT);

    assert_eq!(snap.hud.score, 10);
    assert_eq!(snap.hud.hits, 1);
    assert_eq!(snap.hud.misses, 0);
    assert_eq!(snap.hud.inventory.tokens, 1, "Level 1 kill awards 1 token");
    assert!(snap.targets.is_empty(), "Destroyed target is swept");
    assert!(snap.bullets.is_empty(), "The bullet is spent on the kill");
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::TargetDestroyed { .. })));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::TokensAwarded { amount: 1 })));
    assert!(
        !snap.particles.is_empty(),
        "A kill emits an explosion burst"
    );
}

#[test]
fn test_one_bullet_resolves_one_kill() {
    let mut engine = engine_with_seed(42);
    let player = engine.player_position();
    // Two overlapping targets: the bullet may only kill the first.
    engine.spawn_target_at(player, Velocity::default());
    engine.spawn_target_at(player, Velocity::default());
    engine.set_controls(ControlState {
        aim: player,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::Shoot);
    let snap = engine.tick(DT);

    assert_eq!(snap.hud.score, 10, "Exactly one kill per bullet");
    assert_eq!(snap.hud.hits, 1);
    assert_eq!(snap.targets.len(), 1, "The second target survives");
}

#[test]
fn test_pair_collapse_scores_once() {
    let mut engine = engine_with_seed(42);
    engine.queue_command(PlayerCommand::SetMode {
        mode: FireMode::EntangledPair,
    });
    let player = engine.player_position();
    engine.spawn_pair_at(player, Position::new(player.x + 150.0, player.y - 150.0));
    engine.set_controls(ControlState {
        aim: player,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::Shoot);
    let snap = engine.tick(DT);

    assert_eq!(snap.hud.score, 10, "Collapsing a pair scores one kill");
    assert_eq!(snap.hud.hits, 1);
    assert!(snap.pairs.is_empty(), "Both members die together");
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::PairCollapsed { .. })));
}

#[test]
fn test_bullet_exiting_viewport_is_a_miss() {
    let mut engine = engine_with_seed(42);
    aim_right(&mut engine);
    engine.queue_command(PlayerCommand::Shoot);

    // 400 units to the right edge at 500 u/s: gone within a second.
    run_ticks(&mut engine, 70);
    let snap = engine.tick(DT);
    assert_eq!(snap.hud.misses, 1);
    assert_eq!(snap.hud.hits, 0);
    assert!(snap.bullets.is_empty());
}

#[test]
fn test_bullet_expiry_is_not_a_miss() {
    // A wide arena the bullet cannot cross within its lifetime.
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 42,
        viewport: Viewport::new(3000.0, 600.0),
    });
    aim_right(&mut engine);
    engine.queue_command(PlayerCommand::Shoot);

    // Lifetime 2s at 500 u/s covers 1000 units; the edge is 1500 away.
    run_ticks(&mut engine, 140);
    let snap = engine.tick(DT);
    assert_eq!(snap.hud.misses, 0, "Natural expiry must not count as a miss");
    assert_eq!(snap.hud.hits, 0);
    assert!(snap.bullets.is_empty(), "Expired bullet is removed");
}

#[test]
fn test_fire_rate_cooldown() {
    let mut engine = engine_with_seed(42);
    aim_right(&mut engine);
    engine.queue_command(PlayerCommand::Shoot);
    engine.tick(DT);
    engine.queue_command(PlayerCommand::Shoot);
    let snap = engine.tick(DT);

    // Basic weapon: 0.5 shots/s, a 2-second cooldown.
    assert_eq!(snap.bullets.len(), 1, "Second shot is inside the cooldown");
}

#[test]
fn test_spread_weapon_fires_fan() {
    let mut engine = engine_with_seed(42);
    *engine.inventory_mut() = entangle_core::stats::Inventory {
        quantum_particles: 8,
        crystals: 3,
        ..Default::default()
    };
    engine.queue_command(PlayerCommand::Craft {
        item: CraftableItem::Weapon(WeaponKind::Spread),
    });
    aim_right(&mut engine);
    engine.queue_command(PlayerCommand::Shoot);
    let snap = engine.tick(DT);

    assert_eq!(snap.bullets.len(), 3);
}

#[test]
fn test_automatic_weapon_needs_fire_held() {
    let mut engine = engine_with_seed(42);
    *engine.inventory_mut() = entangle_core::stats::Inventory {
        quantum_particles: 10,
        energy_cores: 5,
        metal_scraps: 5,
        ..Default::default()
    };
    engine.queue_command(PlayerCommand::Craft {
        item: CraftableItem::Weapon(WeaponKind::Automatic),
    });
    aim_right(&mut engine);

    // A discrete trigger edge alone does nothing for automatic weapons.
    engine.queue_command(PlayerCommand::Shoot);
    let snap = engine.tick(DT);
    assert!(snap.bullets.is_empty());

    // Holding the fire control fires continuously at the weapon's rate.
    let player = engine.player_position();
    engine.set_controls(ControlState {
        aim: Position::new(player.x + 100.0, player.y),
        fire_held: true,
        ..Default::default()
    });
    run_ticks(&mut engine, 39);
    let snap = engine.tick(DT);
    assert_eq!(
        snap.bullets.len(),
        2,
        "2 shots/s over ~0.65s of held fire"
    );
}

#[test]
fn test_individual_aim_is_exact() {
    let mut engine = engine_with_seed(42);
    let player = engine.player_position();
    aim_right(&mut engine);
    engine.queue_command(PlayerCommand::Shoot);
    let snap = engine.tick(DT);

    let bullet = &snap.bullets[0];
    assert!((bullet.position.y - player.y).abs() < 1e-9);
    assert!(bullet.position.x > player.x);
}

#[test]
fn test_ensemble_aim_is_jittered_within_cone() {
    let mut engine = engine_with_seed(42);
    engine.queue_command(PlayerCommand::SetMode {
        mode: FireMode::Ensemble,
    });
    let player = engine.player_position();
    aim_right(&mut engine);
    engine.queue_command(PlayerCommand::Shoot);
    let snap = engine.tick(DT);

    let bullet = &snap.bullets[0];
    let angle = (bullet.position.y - player.y).atan2(bullet.position.x - player.x);
    assert!(
        angle.abs() <= 0.15 + 1e-9,
        "Jitter must stay within the cone, got {angle}"
    );
}

// ---- Obstacles and damage ----

#[test]
fn test_obstacle_damage_spills_past_shield() {
    let mut engine = engine_with_seed(42);
    engine.stats_mut().shield = 20.0;
    let player = engine.player_position();
    engine.spawn_obstacle_at(player, Velocity::default(), 20.0, 30.0);
    let snap = engine.tick(DT);

    assert_eq!(snap.player.stats.shield, 0.0);
    assert_eq!(snap.player.stats.health, 90.0);
    assert!(
        snap.obstacles.is_empty(),
        "Struck obstacle is neutralized and swept"
    );
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ObstacleImpact { .. })));
}

#[test]
fn test_fatal_obstacle_triggers_game_over() {
    let mut engine = engine_with_seed(42);
    let player = engine.player_position();
    engine.spawn_obstacle_at(player, Velocity::default(), 20.0, 1000.0);
    let snap = engine.tick(DT);

    assert_eq!(snap.state, GameState::GameOver);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { .. })));

    // The simulation is frozen: time stops and commands that need
    // Playing are ignored.
    let frozen_tick = snap.time.tick;
    engine.queue_command(PlayerCommand::Shoot);
    let snap = engine.tick(DT);
    assert_eq!(snap.time.tick, frozen_tick);
    assert!(snap.bullets.is_empty());
}

#[test]
fn test_obstacle_culled_beyond_margin() {
    let mut engine = engine_with_seed(42);
    engine.spawn_obstacle_at(
        Position::new(100.0, 300.0),
        Velocity::new(0.0, 2000.0),
        20.0,
        10.0,
    );
    run_ticks(&mut engine, 30);
    let snap = engine.tick(DT);
    assert!(snap.obstacles.is_empty());
    assert_eq!(snap.player.stats.health, 100.0, "It never touched the player");
}

// ---- Pickups ----

#[test]
fn test_pickup_collected_on_contact() {
    let mut engine = engine_with_seed(42);
    let player = engine.player_position();
    engine.spawn_pickup_at(player, Resource::Crystals);
    let snap = engine.tick(DT);

    assert_eq!(snap.hud.inventory.crystals, 1);
    assert!(snap.pickups.is_empty(), "Collected pickup is swept");
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::PickupCollected {
            kind: Resource::Crystals
        }
    )));
}

#[test]
fn test_pickup_homes_toward_player() {
    let mut engine = engine_with_seed(42);
    let player = engine.player_position();
    engine.spawn_pickup_at(Position::new(player.x + 60.0, player.y), Resource::EnergyCores);

    // Inside the attraction radius, the drop accelerates inward and is
    // eventually collected.
    run_ticks(&mut engine, 120);
    let snap = engine.tick(DT);
    assert_eq!(snap.hud.inventory.energy_cores, 1);
    assert!(snap.pickups.is_empty());
}

#[test]
fn test_pickup_expires() {
    let mut engine = engine_with_seed(42);
    let player = engine.player_position();
    // Outside the attraction radius; it just sits and times out.
    engine.spawn_pickup_at(
        Position::new(player.x + 200.0, player.y - 200.0),
        Resource::MetalScraps,
    );
    run_ticks(&mut engine, 330);
    let snap = engine.tick(DT);
    assert_eq!(snap.hud.inventory.metal_scraps, 0);
    assert!(snap.pickups.is_empty());
}

// ---- Motion ----

#[test]
fn test_target_bounces_off_edge() {
    let mut engine = engine_with_seed(42);
    engine.spawn_target_at(Position::new(20.0, 300.0), Velocity::new(-50.0, 0.0));
    run_ticks(&mut engine, 120);
    let snap = engine.tick(DT);

    // The planted target never moves vertically, so its y stays exact.
    let target = snap
        .targets
        .iter()
        .find(|t| (t.position.y - 300.0).abs() < 1e-9)
        .expect("The planted target should still exist");
    assert!(
        target.position.x > 50.0,
        "After bouncing it should be heading back inward, got x={}",
        target.position.x
    );
}

// ---- State machine gating ----

#[test]
fn test_panels_freeze_simulation() {
    let mut engine = engine_with_seed(42);
    run_ticks(&mut engine, 30);
    engine.queue_command(PlayerCommand::ToggleCrafting);
    let snap = engine.tick(DT);
    assert_eq!(snap.state, GameState::Crafting);
    let frozen_tick = snap.time.tick;
    let frozen_targets: Vec<_> =
        snap.targets.iter().map(|t| (t.position.x, t.position.y)).collect();

    run_ticks(&mut engine, 60);
    let snap = engine.tick(DT);
    assert_eq!(snap.time.tick, frozen_tick, "Time is frozen in a panel");
    let targets_now: Vec<_> =
        snap.targets.iter().map(|t| (t.position.x, t.position.y)).collect();
    assert_eq!(frozen_targets, targets_now, "Entities do not move");

    engine.queue_command(PlayerCommand::ToggleCrafting);
    let snap = engine.tick(DT);
    assert_eq!(snap.state, GameState::Playing);
    assert!(snap.time.tick > frozen_tick);
}

#[test]
fn test_shoot_ignored_in_panel() {
    let mut engine = engine_with_seed(42);
    aim_right(&mut engine);
    engine.queue_command(PlayerCommand::ToggleShop);
    engine.queue_command(PlayerCommand::Shoot);
    let snap = engine.tick(DT);
    assert!(snap.bullets.is_empty());
}

// ---- Progression via commands ----

#[test]
fn test_craft_command_scenario() {
    let mut engine = engine_with_seed(42);
    *engine.inventory_mut() = entangle_core::stats::Inventory {
        quantum_particles: 5,
        energy_cores: 2,
        ..Default::default()
    };

    engine.queue_command(PlayerCommand::Craft {
        item: CraftableItem::Weapon(WeaponKind::Rapid),
    });
    let snap = engine.tick(DT);

    assert_eq!(snap.hud.inventory.quantum_particles, 0);
    assert_eq!(snap.hud.inventory.energy_cores, 0);
    assert_eq!(snap.player.loadout.weapon, WeaponKind::Rapid);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::Crafted { .. })));

    // Crafting again with an empty inventory fails silently.
    engine.queue_command(PlayerCommand::Craft {
        item: CraftableItem::Weapon(WeaponKind::Rapid),
    });
    let snap = engine.tick(DT);
    assert_eq!(snap.hud.inventory.quantum_particles, 0);
    assert_eq!(snap.player.loadout.weapon, WeaponKind::Rapid);
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::Crafted { .. })));
}

#[test]
fn test_upgrade_command_insufficient_tokens() {
    let mut engine = engine_with_seed(42);
    engine.inventory_mut().tokens = 5;
    let speed_before = engine.stats().speed;

    engine.queue_command(PlayerCommand::UpgradeStat {
        stat: StatKind::Speed,
    });
    let snap = engine.tick(DT);

    assert_eq!(snap.hud.inventory.tokens, 5, "No debit on failure");
    assert_eq!(snap.player.stats.speed, speed_before);
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::StatUpgraded { .. })));
}

#[test]
fn test_upgrade_command_success() {
    let mut engine = engine_with_seed(42);
    engine.inventory_mut().tokens = 10;

    engine.queue_command(PlayerCommand::UpgradeStat {
        stat: StatKind::Speed,
    });
    let snap = engine.tick(DT);

    assert_eq!(snap.hud.inventory.tokens, 0);
    assert_eq!(snap.player.stats.speed, 180.0);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::StatUpgraded {
            stat: StatKind::Speed,
            cost: 10
        }
    )));
}

// ---- Shield regeneration ----

#[test]
fn test_shield_regen_with_generator() {
    let mut engine = engine_with_seed(42);
    *engine.inventory_mut() = entangle_core::stats::Inventory {
        energy_cores: 3,
        metal_scraps: 5,
        ..Default::default()
    };
    engine.queue_command(PlayerCommand::Craft {
        item: CraftableItem::Shield(ShieldKind::Basic),
    });
    engine.tick(DT);

    engine.stats_mut().shield = 0.0;
    run_ticks(&mut engine, 60);
    let snap = engine.tick(DT);
    // Basic generator: 5/s, so roughly 5 points after a second.
    assert!(snap.player.stats.shield > 4.0);
    assert!(snap.player.stats.shield < 6.0);
}

#[test]
fn test_no_regen_without_generator() {
    let mut engine = engine_with_seed(42);
    engine.stats_mut().shield = 10.0;
    run_ticks(&mut engine, 60);
    let snap = engine.tick(DT);
    assert_eq!(snap.player.stats.shield, 10.0);
}

// ---- Session lifecycle ----

#[test]
fn test_restart_yields_initial_world() {
    let mut engine = engine_with_seed(42);
    engine.inventory_mut().tokens = 99;

    // Accrue some session state, then die.
    aim_right(&mut engine);
    engine.queue_command(PlayerCommand::Shoot);
    run_ticks(&mut engine, 200);
    let player = engine.player_position();
    engine.spawn_obstacle_at(player, Velocity::default(), 20.0, 1000.0);
    let snap = engine.tick(DT);
    assert_eq!(snap.state, GameState::GameOver);

    for _ in 0..2 {
        engine.queue_command(PlayerCommand::Restart);
        let snap = engine.tick(DT);

        assert_eq!(snap.state, GameState::Playing);
        assert_eq!(snap.hud.score, 0);
        assert_eq!(snap.hud.hits, 0);
        assert_eq!(snap.hud.misses, 0);
        assert_eq!(snap.hud.level, 1);
        assert_eq!(snap.player.stats.health, snap.player.stats.max_health);
        assert_eq!(snap.player.stats.shield, snap.player.stats.max_shield);
        assert_eq!(snap.time.tick, 1, "Session clock restarts");
        assert!(snap.bullets.is_empty());
        assert!(snap.obstacles.is_empty());
        assert!(snap.particles.is_empty());
        assert_eq!(
            snap.hud.inventory.tokens, 99,
            "Inventory persists across resets"
        );

        // Die again to verify idempotence from a second game-over.
        let player = engine.player_position();
        engine.spawn_obstacle_at(player, Velocity::default(), 20.0, 1000.0);
        let snap = engine.tick(DT);
        assert_eq!(snap.state, GameState::GameOver);
    }
}

#[test]
fn test_restart_ignored_while_playing() {
    let mut engine = engine_with_seed(42);
    run_ticks(&mut engine, 100);
    let before = engine.tick(DT);
    engine.queue_command(PlayerCommand::Restart);
    let after = engine.tick(DT);
    assert_eq!(after.time.tick, before.time.tick + 1, "No reset happened");
    assert_eq!(after.targets.len(), before.targets.len());
}

#[test]
fn test_leaderboard_view_preserves_game_over() {
    let mut engine = engine_with_seed(42);
    let player = engine.player_position();
    engine.spawn_obstacle_at(player, Velocity::default(), 20.0, 1000.0);
    let snap = engine.tick(DT);
    assert_eq!(snap.state, GameState::GameOver);

    engine.queue_command(PlayerCommand::ToggleLeaderboard);
    let snap = engine.tick(DT);
    assert_eq!(snap.state, GameState::Leaderboard);

    engine.queue_command(PlayerCommand::Escape);
    let snap = engine.tick(DT);
    assert_eq!(snap.state, GameState::GameOver, "Viewing does not clear it");
}

// ---- Accuracy ----

#[test]
fn test_accuracy_statistic() {
    let mut engine = engine_with_seed(42);
    let snap = engine.tick(DT);
    assert_eq!(snap.hud.accuracy, 100.0, "No resolved shots yet");

    // One kill, one miss: 50%.
    let player = engine.player_position();
    engine.spawn_target_at(player, Velocity::default());
    engine.set_controls(ControlState {
        aim: player,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::Shoot);
    engine.tick(DT);

    run_ticks(&mut engine, 130);
    aim_right(&mut engine);
    engine.queue_command(PlayerCommand::Shoot);
    run_ticks(&mut engine, 70);
    let snap = engine.tick(DT);
    assert_eq!(snap.hud.hits, 1);
    assert_eq!(snap.hud.misses, 1);
    assert!((snap.hud.accuracy - 50.0).abs() < 1e-9);
}
