//! Obstacle update: integration and player-contact resolution.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use entangle_core::components::{Obstacle, Player};
use entangle_core::events::GameEvent;
use entangle_core::stats::PlayerStats;
use entangle_core::types::{Position, Velocity};

use crate::world_setup;

/// Integrate obstacles and resolve player contact. Damage goes to the
/// shield first, excess spills to the hull; the struck obstacle is
/// neutralized in place (velocity and radius zeroed, the lifecycle
/// sweep removes it) and an explosion is emitted.
///
/// Returns whether the player's hull reached zero this tick.
pub fn run(
    world: &mut World,
    dt: f64,
    stats: &mut PlayerStats,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
    spawn_counter: &mut u64,
) -> bool {
    let player = {
        let mut query = world.query::<(&Player, &Position)>();
        query
            .iter()
            .next()
            .map(|(_, (player, position))| (*position, player.radius))
    };
    let Some((player_pos, player_radius)) = player else {
        return false;
    };

    let mut impacts: Vec<Position> = Vec::new();

    for (_entity, (obstacle, position, velocity)) in
        world.query_mut::<(&mut Obstacle, &mut Position, &mut Velocity)>()
    {
        position.x += velocity.x * dt;
        position.y += velocity.y * dt;

        if obstacle.radius > 0.0
            && position.distance_to(&player_pos) < obstacle.radius + player_radius
        {
            stats.apply_damage(obstacle.damage);
            events.push(GameEvent::ObstacleImpact {
                damage: obstacle.damage,
            });
            velocity.x = 0.0;
            velocity.y = 0.0;
            obstacle.radius = 0.0;
            impacts.push(*position);
        }
    }

    for position in impacts {
        world_setup::spawn_explosion(world, rng, position, spawn_counter);
    }

    stats.health <= 0.0
}
