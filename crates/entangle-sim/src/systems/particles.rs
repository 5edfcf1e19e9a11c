//! Cosmetic particle integration. No gameplay effect.

use hecs::World;

use entangle_core::components::{Lifetime, Particle};
use entangle_core::types::{Position, Velocity};

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (_particle, position, velocity, lifetime)) in
        world.query_mut::<(&Particle, &mut Position, &Velocity, &mut Lifetime)>()
    {
        position.x += velocity.x * dt;
        position.y += velocity.y * dt;
        lifetime.remaining_secs -= dt;
    }
}
