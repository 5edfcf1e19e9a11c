//! Snapshot system: queries the ECS world and builds a complete
//! WorldSnapshot. Read-only — it never modifies the world.

use hecs::World;

use entangle_core::catalog;
use entangle_core::components::*;
use entangle_core::constants::{OBSTACLE_COLOR, TARGET_COLOR};
use entangle_core::enums::{FireMode, GameState};
use entangle_core::events::GameEvent;
use entangle_core::state::*;
use entangle_core::stats::{Inventory, Loadout, PlayerStats};
use entangle_core::types::{Position, SimTime, Viewport};

/// Build a complete WorldSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build(
    world: &World,
    time: &SimTime,
    state: GameState,
    mode: FireMode,
    viewport: Viewport,
    stats: &PlayerStats,
    loadout: &Loadout,
    session: &crate::session::SessionStats,
    inventory: &Inventory,
    events: Vec<GameEvent>,
) -> WorldSnapshot {
    let targets = build_targets(world);
    let pairs = build_pairs(world);

    let target_count = match mode {
        FireMode::EntangledPair => pairs.len() as u32 * 2,
        _ => targets.len() as u32,
    };

    WorldSnapshot {
        time: *time,
        state,
        mode,
        viewport,
        player: build_player(world, stats, loadout),
        hud: HudView {
            score: session.score,
            hits: session.hits,
            misses: session.misses,
            accuracy: session.accuracy_percent(),
            level: session.level,
            target_count,
            inventory: *inventory,
        },
        targets,
        pairs,
        bullets: build_bullets(world),
        obstacles: build_obstacles(world),
        pickups: build_pickups(world),
        particles: build_particles(world),
        events,
    }
}

fn build_player(world: &World, stats: &PlayerStats, loadout: &Loadout) -> PlayerView {
    world
        .query::<(&Player, &Position)>()
        .iter()
        .next()
        .map(|(_, (player, position))| PlayerView {
            position: *position,
            radius: player.radius,
            stats: *stats,
            loadout: *loadout,
        })
        .unwrap_or_default()
}

fn build_targets(world: &World) -> Vec<TargetView> {
    let mut targets: Vec<(u64, TargetView)> = world
        .query::<(&Target, &SpawnId, &Position)>()
        .iter()
        .map(|(_, (target, id, position))| {
            (
                id.0,
                TargetView {
                    position: *position,
                    radius: target.radius,
                    color: TARGET_COLOR.to_string(),
                },
            )
        })
        .collect();
    targets.sort_by_key(|&(id, _)| id);
    targets.into_iter().map(|(_, view)| view).collect()
}

fn build_pairs(world: &World) -> Vec<PairView> {
    let mut pairs: Vec<(u64, PairView)> = world
        .query::<(&EntangledPair, &SpawnId)>()
        .iter()
        .map(|(_, (pair, id))| {
            (
                id.0,
                PairView {
                    a: member_view(&pair.a),
                    b: member_view(&pair.b),
                },
            )
        })
        .collect();
    pairs.sort_by_key(|&(id, _)| id);
    pairs.into_iter().map(|(_, view)| view).collect()
}

fn member_view(member: &PairMember) -> PairMemberView {
    PairMemberView {
        position: member.position,
        radius: member.radius,
        alive: member.health > 0,
        color: TARGET_COLOR.to_string(),
    }
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    let mut bullets: Vec<(u64, BulletView)> = world
        .query::<(&Bullet, &SpawnId, &Position)>()
        .iter()
        .map(|(_, (bullet, id, position))| {
            (
                id.0,
                BulletView {
                    position: *position,
                    radius: bullet.radius,
                    color: catalog::weapon_profile(bullet.weapon).color.to_string(),
                },
            )
        })
        .collect();
    bullets.sort_by_key(|&(id, _)| id);
    bullets.into_iter().map(|(_, view)| view).collect()
}

fn build_obstacles(world: &World) -> Vec<ObstacleView> {
    let mut obstacles: Vec<(u64, ObstacleView)> = world
        .query::<(&Obstacle, &SpawnId, &Position)>()
        .iter()
        .map(|(_, (obstacle, id, position))| {
            (
                id.0,
                ObstacleView {
                    position: *position,
                    radius: obstacle.radius,
                    color: OBSTACLE_COLOR.to_string(),
                },
            )
        })
        .collect();
    obstacles.sort_by_key(|&(id, _)| id);
    obstacles.into_iter().map(|(_, view)| view).collect()
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut pickups: Vec<(u64, PickupView)> = world
        .query::<(&Pickup, &SpawnId, &Position)>()
        .iter()
        .map(|(_, (pickup, id, position))| {
            (
                id.0,
                PickupView {
                    position: *position,
                    radius: pickup.radius,
                    kind: pickup.kind,
                    color: catalog::resource_color(pickup.kind).to_string(),
                },
            )
        })
        .collect();
    pickups.sort_by_key(|&(id, _)| id);
    pickups.into_iter().map(|(_, view)| view).collect()
}

fn build_particles(world: &World) -> Vec<ParticleView> {
    let mut particles: Vec<(u64, ParticleView)> = world
        .query::<(&Particle, &SpawnId, &Position, &Lifetime)>()
        .iter()
        .map(|(_, (particle, id, position, lifetime))| {
            let alpha =
                (lifetime.remaining_secs / particle.max_lifetime_secs).clamp(0.0, 1.0);
            (
                id.0,
                ParticleView {
                    position: *position,
                    radius: particle.radius,
                    color: format!("hsl({:.0}, 100%, 50%)", particle.hue),
                    alpha,
                },
            )
        })
        .collect();
    particles.sort_by_key(|&(id, _)| id);
    particles.into_iter().map(|(_, view)| view).collect()
}
