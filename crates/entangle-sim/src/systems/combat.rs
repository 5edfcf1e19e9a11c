//! Firing and bullet combat resolution.
//!
//! Bullets and their candidate victims are processed in spawn order, so
//! "first hit wins" is deterministic regardless of archetype storage
//! order. A bullet resolves at most one kill per tick.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use entangle_core::catalog;
use entangle_core::commands::ControlState;
use entangle_core::components::*;
use entangle_core::constants::*;
use entangle_core::enums::{FireMode, Resource};
use entangle_core::events::GameEvent;
use entangle_core::stats::{Inventory, Loadout, PlayerStats};
use entangle_core::types::{Position, SimTime, Velocity, Viewport};

use crate::session::SessionStats;
use crate::world_setup;

/// Continuous fire: automatic weapons shoot every tick the fire control
/// is held (still subject to the cooldown).
#[allow(clippy::too_many_arguments)]
pub fn auto_fire(
    world: &mut World,
    time: &SimTime,
    controls: &ControlState,
    stats: &PlayerStats,
    loadout: &Loadout,
    mode: FireMode,
    rng: &mut ChaCha8Rng,
    spawn_counter: &mut u64,
) {
    if controls.fire_held && catalog::weapon_profile(loadout.weapon).automatic {
        fire(world, time, controls, stats, loadout, mode, rng, spawn_counter);
    }
}

/// Discrete trigger edge. Automatic weapons ignore it unless the fire
/// control is also held.
#[allow(clippy::too_many_arguments)]
pub fn player_shoot(
    world: &mut World,
    time: &SimTime,
    controls: &ControlState,
    stats: &PlayerStats,
    loadout: &Loadout,
    mode: FireMode,
    rng: &mut ChaCha8Rng,
    spawn_counter: &mut u64,
) {
    if catalog::weapon_profile(loadout.weapon).automatic && !controls.fire_held {
        return;
    }
    fire(world, time, controls, stats, loadout, mode, rng, spawn_counter);
}

#[allow(clippy::too_many_arguments)]
fn fire(
    world: &mut World,
    time: &SimTime,
    controls: &ControlState,
    stats: &PlayerStats,
    loadout: &Loadout,
    mode: FireMode,
    rng: &mut ChaCha8Rng,
    spawn_counter: &mut u64,
) {
    let profile = catalog::weapon_profile(loadout.weapon);
    let cooldown = 1.0 / stats.effective_fire_rate(loadout.weapon);

    // Cooldown gate; records the shot time on success.
    let muzzle = {
        let mut fired_from = None;
        for (_entity, (player, position)) in world.query_mut::<(&mut Player, &Position)>() {
            if let Some(last) = player.last_shot_secs {
                if time.elapsed_secs - last < cooldown {
                    break;
                }
            }
            player.last_shot_secs = Some(time.elapsed_secs);
            fired_from = Some(*position);
        }
        match fired_from {
            Some(position) => position,
            None => return,
        }
    };

    let aim_angle = muzzle.angle_to(&controls.aim);

    if let Some(count) = profile.spread {
        for i in 0..count {
            let fan = (i as f64 - count as f64 / 2.0) * SPREAD_FAN_STEP;
            emit_bullet(world, rng, muzzle, aim_angle + fan, loadout, mode, spawn_counter);
        }
    } else {
        emit_bullet(world, rng, muzzle, aim_angle, loadout, mode, spawn_counter);
    }
}

/// Spawn one bullet, applying the ensemble-mode aim perturbation.
fn emit_bullet(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    muzzle: Position,
    mut angle: f64,
    loadout: &Loadout,
    mode: FireMode,
    spawn_counter: &mut u64,
) {
    if mode == FireMode::Ensemble {
        angle += rng.gen_range(-ENSEMBLE_JITTER..ENSEMBLE_JITTER);
    }
    world_setup::spawn_bullet(world, muzzle, angle, loadout.weapon, spawn_counter);
}

/// Integrate bullets, resolve collisions against live targets (or pair
/// members), apply kill rewards, and cull spent bullets.
///
/// A bullet leaving the viewport with lifetime remaining counts as a
/// miss; natural lifetime expiry does not.
#[allow(clippy::too_many_arguments)]
pub fn resolve_bullets(
    world: &mut World,
    mode: FireMode,
    viewport: Viewport,
    dt: f64,
    level: u32,
    rng: &mut ChaCha8Rng,
    session: &mut SessionStats,
    inventory: &mut Inventory,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
    spawn_counter: &mut u64,
) {
    for (_entity, (_bullet, position, velocity, lifetime)) in
        world.query_mut::<(&Bullet, &mut Position, &Velocity, &mut Lifetime)>()
    {
        position.x += velocity.x * dt;
        position.y += velocity.y * dt;
        lifetime.remaining_secs -= dt;
    }

    let mut bullets: Vec<(Entity, u64, Position, f64, f64)> = {
        let mut query = world.query::<(&Bullet, &SpawnId, &Position, &Lifetime)>();
        query
            .iter()
            .map(|(entity, (bullet, id, position, lifetime))| {
                (entity, id.0, *position, bullet.radius, lifetime.remaining_secs)
            })
            .collect()
    };
    bullets.sort_by_key(|&(_, id, ..)| id);

    despawn_buffer.clear();

    match mode {
        FireMode::EntangledPair => {
            let pairs = collect_sorted::<EntangledPair>(world);
            for (bullet_entity, _, bullet_pos, bullet_radius, remaining) in bullets {
                let hit = collide_pair(world, &pairs, &bullet_pos, bullet_radius);
                if let Some(position) = hit {
                    events.push(GameEvent::PairCollapsed { position });
                    award_kill(
                        world, rng, position, level, session, inventory, events, spawn_counter,
                    );
                    despawn_buffer.push(bullet_entity);
                } else {
                    cull_spent_bullet(
                        bullet_entity,
                        &bullet_pos,
                        remaining,
                        viewport,
                        session,
                        despawn_buffer,
                    );
                }
            }
        }
        _ => {
            let targets = collect_sorted::<Target>(world);
            for (bullet_entity, _, bullet_pos, bullet_radius, remaining) in bullets {
                let hit = collide_target(world, &targets, &bullet_pos, bullet_radius);
                if let Some(position) = hit {
                    events.push(GameEvent::TargetDestroyed { position });
                    award_kill(
                        world, rng, position, level, session, inventory, events, spawn_counter,
                    );
                    despawn_buffer.push(bullet_entity);
                } else {
                    cull_spent_bullet(
                        bullet_entity,
                        &bullet_pos,
                        remaining,
                        viewport,
                        session,
                        despawn_buffer,
                    );
                }
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Entities of one kind in spawn order.
fn collect_sorted<T: hecs::Component>(world: &World) -> Vec<Entity> {
    let mut entities: Vec<(Entity, u64)> = {
        let mut query = world.query::<(&T, &SpawnId)>();
        query.iter().map(|(entity, (_, id))| (entity, id.0)).collect()
    };
    entities.sort_by_key(|&(_, id)| id);
    entities.into_iter().map(|(entity, _)| entity).collect()
}

/// First live target hit by the bullet, in spawn order. Marks it dead
/// and returns its position.
fn collide_target(
    world: &mut World,
    targets: &[Entity],
    bullet_pos: &Position,
    bullet_radius: f64,
) -> Option<Position> {
    for &entity in targets {
        let Ok(mut target) = world.get::<&mut Target>(entity) else {
            continue;
        };
        if target.health == 0 {
            continue;
        }
        let Ok(position) = world.get::<&Position>(entity) else {
            continue;
        };
        if bullet_pos.distance_to(&position) < bullet_radius + target.radius {
            target.health = 0;
            return Some(*position);
        }
    }
    None
}

/// First pair with a live member hit by the bullet, in spawn order.
/// Collapses both members and returns the struck member's position.
fn collide_pair(
    world: &mut World,
    pairs: &[Entity],
    bullet_pos: &Position,
    bullet_radius: f64,
) -> Option<Position> {
    for &entity in pairs {
        let Ok(mut pair) = world.get::<&mut EntangledPair>(entity) else {
            continue;
        };
        if pair.a.health == 0 && pair.b.health == 0 {
            continue;
        }
        let hit_a = pair.a.health > 0
            && bullet_pos.distance_to(&pair.a.position) < bullet_radius + pair.a.radius;
        let hit_b = pair.b.health > 0
            && bullet_pos.distance_to(&pair.b.position) < bullet_radius + pair.b.radius;
        if hit_a || hit_b {
            pair.a.health = 0;
            pair.b.health = 0;
            let position = if hit_a { pair.a.position } else { pair.b.position };
            return Some(position);
        }
    }
    None
}

/// Kill side effects: explosion, drop roll, tokens, score, hit counter.
#[allow(clippy::too_many_arguments)]
fn award_kill(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: Position,
    level: u32,
    session: &mut SessionStats,
    inventory: &mut Inventory,
    events: &mut Vec<GameEvent>,
    spawn_counter: &mut u64,
) {
    world_setup::spawn_explosion(world, rng, position, spawn_counter);

    if rng.gen_bool(DROP_CHANCE) {
        let kind = catalog::DROPPABLE_RESOURCES
            [rng.gen_range(0..catalog::DROPPABLE_RESOURCES.len())];
        world_setup::spawn_pickup(world, rng, position, kind, spawn_counter);
        events.push(GameEvent::PickupDropped { kind, position });
    }

    let tokens = TOKENS_PER_KILL_BASE + level / 2;
    inventory.add(Resource::Tokens, tokens);
    events.push(GameEvent::TokensAwarded { amount: tokens });

    session.score += SCORE_PER_KILL;
    session.hits += 1;
}

/// Remove a bullet that left the viewport or ran out its lifetime.
fn cull_spent_bullet(
    entity: Entity,
    position: &Position,
    remaining_secs: f64,
    viewport: Viewport,
    session: &mut SessionStats,
    despawn_buffer: &mut Vec<Entity>,
) {
    let out_of_bounds = !viewport.contains(position, 0.0);
    if out_of_bounds || remaining_secs <= 0.0 {
        // Escaping the arena is a miss; expiring mid-flight is not.
        if remaining_secs > 0.0 {
            session.misses += 1;
        }
        despawn_buffer.push(entity);
    }
}
