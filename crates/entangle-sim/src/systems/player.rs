//! Player movement: axis-aligned motion from held-direction flags,
//! clamped so the hull stays inside the viewport.

use hecs::World;

use entangle_core::commands::ControlState;
use entangle_core::components::Player;
use entangle_core::stats::{Loadout, PlayerStats};
use entangle_core::types::{Position, Viewport};

pub fn run(
    world: &mut World,
    controls: &ControlState,
    stats: &PlayerStats,
    loadout: &Loadout,
    viewport: Viewport,
    dt: f64,
) {
    let speed = stats.effective_speed(loadout.ship);

    for (_entity, (player, position)) in world.query_mut::<(&Player, &mut Position)>() {
        if controls.move_up {
            position.y -= speed * dt;
        }
        if controls.move_down {
            position.y += speed * dt;
        }
        if controls.move_left {
            position.x -= speed * dt;
        }
        if controls.move_right {
            position.x += speed * dt;
        }

        position.x = position.x.min(viewport.width - player.radius).max(player.radius);
        position.y = position.y.min(viewport.height - player.radius).max(player.radius);
    }
}
