//! Pickup update: drift with damping, short-range homing toward the
//! player, and collection on contact.

use hecs::World;

use entangle_core::components::{Lifetime, Pickup, Player};
use entangle_core::constants::*;
use entangle_core::events::GameEvent;
use entangle_core::stats::Inventory;
use entangle_core::types::{Position, Velocity};

pub fn run(
    world: &mut World,
    dt: f64,
    inventory: &mut Inventory,
    events: &mut Vec<GameEvent>,
) {
    let player = {
        let mut query = world.query::<(&Player, &Position)>();
        query
            .iter()
            .next()
            .map(|(_, (player, position))| (*position, player.radius))
    };
    let Some((player_pos, player_radius)) = player else {
        return;
    };

    for (_entity, (pickup, position, velocity, lifetime)) in
        world.query_mut::<(&mut Pickup, &mut Position, &mut Velocity, &mut Lifetime)>()
    {
        position.x += velocity.x * dt;
        position.y += velocity.y * dt;
        velocity.x *= PICKUP_DRAG;
        velocity.y *= PICKUP_DRAG;
        lifetime.remaining_secs -= dt;

        let dx = player_pos.x - position.x;
        let dy = player_pos.y - position.y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance < PICKUP_ATTRACT_RADIUS && distance > 0.0 {
            velocity.x += dx / distance * PICKUP_ATTRACT_ACCEL * dt;
            velocity.y += dy / distance * PICKUP_ATTRACT_ACCEL * dt;
        }

        if !pickup.collected && distance < pickup.radius + player_radius {
            pickup.collected = true;
            inventory.add(pickup.kind, 1);
            events.push(GameEvent::PickupCollected { kind: pickup.kind });
        }
    }
}
