//! Entity spawn factories.
//!
//! Every transient entity gets a monotone `SpawnId` so systems and
//! snapshots can iterate in insertion order. All spawn functions that
//! place entities inside the arena are no-ops while the viewport is
//! degenerate, and consume no randomness in that case.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use entangle_core::catalog;
use entangle_core::components::*;
use entangle_core::constants::*;
use entangle_core::enums::{Resource, WeaponKind};
use entangle_core::types::{Position, Velocity, Viewport};

fn next_id(counter: &mut u64) -> SpawnId {
    let id = SpawnId(*counter);
    *counter += 1;
    id
}

/// Spawn the player's ship. Called once per engine; the entity survives
/// session resets.
pub fn spawn_player(world: &mut World, viewport: Viewport) -> hecs::Entity {
    world.spawn((
        Player {
            radius: PLAYER_RADIUS,
            last_shot_secs: None,
        },
        player_start_position(viewport),
    ))
}

/// Center-bottom spawn point, or the origin while dimensions are unknown.
pub fn player_start_position(viewport: Viewport) -> Position {
    if viewport.is_degenerate() {
        Position::default()
    } else {
        Position::new(
            viewport.width / 2.0,
            viewport.height - PLAYER_SPAWN_BOTTOM_OFFSET,
        )
    }
}

/// Spawn a solitary drifting target at a random interior position.
pub fn spawn_target(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    viewport: Viewport,
    spawn_counter: &mut u64,
) -> Option<hecs::Entity> {
    if viewport.is_degenerate() {
        return None;
    }

    let drift = TARGET_DRIFT_SPEED / 2.0;
    let x = 50.0 + rng.gen_range(0.0..1.0) * (viewport.width - 100.0).max(50.0);
    let y = 50.0 + rng.gen_range(0.0..1.0) * (viewport.height - 200.0).max(50.0);
    let velocity = Velocity::new(rng.gen_range(-drift..drift), rng.gen_range(-drift..drift));

    Some(world.spawn((
        Target {
            radius: TARGET_RADIUS,
            health: 1,
        },
        Position::new(x, y),
        velocity,
        next_id(spawn_counter),
    )))
}

/// Spawn an entangled pair: member a at a random interior position,
/// member b scattered around it, both drifting independently.
pub fn spawn_pair(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    viewport: Viewport,
    spawn_counter: &mut u64,
) -> Option<hecs::Entity> {
    if viewport.is_degenerate() {
        return None;
    }

    let drift = TARGET_DRIFT_SPEED / 2.0;
    let scatter = PAIR_SPAWN_SCATTER / 2.0;

    let ax = 100.0 + rng.gen_range(0.0..1.0) * (viewport.width - 200.0).max(100.0);
    let ay = 100.0 + rng.gen_range(0.0..1.0) * (viewport.height - 200.0).max(100.0);
    let bx = ax + rng.gen_range(-scatter..scatter);
    let by = ay + rng.gen_range(-scatter..scatter);

    let a = PairMember {
        position: Position::new(ax, ay),
        velocity: Velocity::new(rng.gen_range(-drift..drift), rng.gen_range(-drift..drift)),
        radius: TARGET_RADIUS,
        health: 1,
    };
    let b = PairMember {
        position: Position::new(bx, by),
        velocity: Velocity::new(rng.gen_range(-drift..drift), rng.gen_range(-drift..drift)),
        radius: TARGET_RADIUS,
        health: 1,
    };

    Some(world.spawn((EntangledPair { a, b }, next_id(spawn_counter))))
}

/// Spawn an obstacle just outside a uniformly chosen edge, moving toward
/// the interior with perpendicular jitter. Size, speed, and contact
/// damage scale with level.
pub fn spawn_obstacle(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    viewport: Viewport,
    level: u32,
    spawn_counter: &mut u64,
) -> Option<hecs::Entity> {
    if viewport.is_degenerate() {
        return None;
    }

    let level = level as f64;
    let inward = OBSTACLE_BASE_SPEED + level * OBSTACLE_SPEED_PER_LEVEL;
    let jitter_span = OBSTACLE_JITTER_SPEED / 2.0;

    let side = rng.gen_range(0..4);
    let (position, velocity) = match side {
        // Top
        0 => (
            Position::new(rng.gen_range(0.0..1.0) * viewport.width, -OBSTACLE_SPAWN_INSET),
            Velocity::new(rng.gen_range(-jitter_span..jitter_span), inward),
        ),
        // Right
        1 => (
            Position::new(
                viewport.width + OBSTACLE_SPAWN_INSET,
                rng.gen_range(0.0..1.0) * viewport.height,
            ),
            Velocity::new(-inward, rng.gen_range(-jitter_span..jitter_span)),
        ),
        // Bottom
        2 => (
            Position::new(
                rng.gen_range(0.0..1.0) * viewport.width,
                viewport.height + OBSTACLE_SPAWN_INSET,
            ),
            Velocity::new(rng.gen_range(-jitter_span..jitter_span), -inward),
        ),
        // Left
        _ => (
            Position::new(-OBSTACLE_SPAWN_INSET, rng.gen_range(0.0..1.0) * viewport.height),
            Velocity::new(inward, rng.gen_range(-jitter_span..jitter_span)),
        ),
    };

    Some(world.spawn((
        Obstacle {
            radius: OBSTACLE_BASE_RADIUS + level * OBSTACLE_RADIUS_PER_LEVEL,
            damage: OBSTACLE_BASE_DAMAGE + level * OBSTACLE_DAMAGE_PER_LEVEL,
        },
        position,
        velocity,
        next_id(spawn_counter),
    )))
}

/// Spawn a bullet along `angle` from `position`.
pub fn spawn_bullet(
    world: &mut World,
    position: Position,
    angle: f64,
    weapon: WeaponKind,
    spawn_counter: &mut u64,
) -> hecs::Entity {
    let profile = catalog::weapon_profile(weapon);
    world.spawn((
        Bullet {
            radius: BULLET_RADIUS,
            damage: profile.damage,
            weapon,
        },
        position,
        Velocity::from_angle(angle, BULLET_SPEED),
        Lifetime {
            remaining_secs: BULLET_LIFETIME_SECS,
        },
        next_id(spawn_counter),
    ))
}

/// Spawn a material pickup with a small scatter velocity.
pub fn spawn_pickup(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: Position,
    kind: Resource,
    spawn_counter: &mut u64,
) -> hecs::Entity {
    let scatter = PICKUP_SCATTER_SPEED / 2.0;
    world.spawn((
        Pickup {
            kind,
            radius: PICKUP_RADIUS,
            collected: false,
        },
        position,
        Velocity::new(rng.gen_range(-scatter..scatter), rng.gen_range(-scatter..scatter)),
        Lifetime {
            remaining_secs: PICKUP_LIFETIME_SECS,
        },
        next_id(spawn_counter),
    ))
}

/// Emit an explosion burst of cosmetic particles at a position.
pub fn spawn_explosion(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: Position,
    spawn_counter: &mut u64,
) {
    let speed = PARTICLE_SPEED / 2.0;
    for _ in 0..EXPLOSION_PARTICLE_COUNT {
        let velocity = Velocity::new(rng.gen_range(-speed..speed), rng.gen_range(-speed..speed));
        let radius = PARTICLE_MIN_RADIUS + rng.gen_range(0.0..1.0) * PARTICLE_RADIUS_SPAN;
        let hue = rng.gen_range(0.0..PARTICLE_HUE_SPAN);
        world.spawn((
            Particle {
                radius,
                hue,
                max_lifetime_secs: PARTICLE_LIFETIME_SECS,
            },
            position,
            velocity,
            Lifetime {
                remaining_secs: PARTICLE_LIFETIME_SECS,
            },
            next_id(spawn_counter),
        ));
    }
}
