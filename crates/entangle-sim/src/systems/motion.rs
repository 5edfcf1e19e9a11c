//! Target and pair kinematics: integration, edge bounces, and the pair
//! separation constraint.

use hecs::World;

use entangle_core::components::{EntangledPair, PairMember, Target};
use entangle_core::constants::PAIR_MAX_SEPARATION;
use entangle_core::types::{Position, Velocity, Viewport};

pub fn run(world: &mut World, viewport: Viewport, dt: f64) {
    for (_entity, (target, position, velocity)) in
        world.query_mut::<(&Target, &mut Position, &mut Velocity)>()
    {
        position.x += velocity.x * dt;
        position.y += velocity.y * dt;
        bounce(position, velocity, target.radius, viewport);
    }

    for (_entity, pair) in world.query_mut::<&mut EntangledPair>() {
        integrate_member(&mut pair.a, dt);
        integrate_member(&mut pair.b, dt);
        constrain_separation(pair);
        bounce_member(&mut pair.a, viewport);
        bounce_member(&mut pair.b, viewport);
    }
}

/// Mirror the velocity component on the axis whose edge was reached.
/// Magnitude is unchanged (simple elastic bounce).
fn bounce(position: &Position, velocity: &mut Velocity, radius: f64, viewport: Viewport) {
    if position.x < radius || position.x > viewport.width - radius {
        velocity.x = -velocity.x;
    }
    if position.y < radius || position.y > viewport.height - radius {
        velocity.y = -velocity.y;
    }
}

fn integrate_member(member: &mut PairMember, dt: f64) {
    member.position.x += member.velocity.x * dt;
    member.position.y += member.velocity.y * dt;
}

fn bounce_member(member: &mut PairMember, viewport: Viewport) {
    let position = member.position;
    bounce(&position, &mut member.velocity, member.radius, viewport);
}

/// Soft positional constraint: when the members drift beyond the maximum
/// separation, member b is repositioned on the a->b bearing at exactly
/// the limit. Velocities are not corrected.
fn constrain_separation(pair: &mut EntangledPair) {
    let distance = pair.a.position.distance_to(&pair.b.position);
    if distance > PAIR_MAX_SEPARATION {
        let angle = pair.a.position.angle_to(&pair.b.position);
        pair.b.position = Position::new(
            pair.a.position.x + angle.cos() * PAIR_MAX_SEPARATION,
            pair.a.position.y + angle.sin() * PAIR_MAX_SEPARATION,
        );
    }
}
