//! Lifecycle sweep: the per-kind "retain where predicate" pass run at
//! the end of each tick. Uses a pre-allocated buffer to avoid per-tick
//! allocation.

use hecs::{Entity, World};

use entangle_core::components::{EntangledPair, Lifetime, Obstacle, Particle, Pickup, Target};
use entangle_core::constants::OFFSCREEN_MARGIN;
use entangle_core::types::{Position, Viewport};

pub fn run(world: &mut World, viewport: Viewport, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    // Destroyed targets.
    for (entity, target) in world.query_mut::<&Target>() {
        if target.health == 0 {
            despawn_buffer.push(entity);
        }
    }

    // Collapsed pairs (members always die together).
    for (entity, pair) in world.query_mut::<&EntangledPair>() {
        if pair.a.health == 0 && pair.b.health == 0 {
            despawn_buffer.push(entity);
        }
    }

    // Neutralized obstacles, and strays beyond the off-screen margin.
    for (entity, (obstacle, position)) in world.query_mut::<(&Obstacle, &Position)>() {
        if obstacle.radius <= 0.0 || !viewport.contains(position, OFFSCREEN_MARGIN) {
            despawn_buffer.push(entity);
        }
    }

    // Collected or expired pickups.
    for (entity, (pickup, lifetime)) in world.query_mut::<(&Pickup, &Lifetime)>() {
        if pickup.collected || lifetime.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    // Burned-out particles.
    for (entity, (_particle, lifetime)) in world.query_mut::<(&Particle, &Lifetime)>() {
        if lifetime.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
