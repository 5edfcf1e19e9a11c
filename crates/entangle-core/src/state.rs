//! World snapshot — the complete visible state handed to the render sink
//! after each tick. Read-only from the renderer's point of view.

use serde::{Deserialize, Serialize};

use crate::enums::{FireMode, GameState, Resource};
use crate::events::GameEvent;
use crate::stats::{Inventory, Loadout, PlayerStats};
use crate::types::{Position, SimTime, Viewport};

/// Complete per-tick snapshot. Entity views are sorted by spawn order so
/// consumers see a stable sequence across ticks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub state: GameState,
    pub mode: FireMode,
    pub viewport: Viewport,
    pub player: PlayerView,
    pub hud: HudView,
    pub targets: Vec<TargetView>,
    pub pairs: Vec<PairView>,
    pub bullets: Vec<BulletView>,
    pub obstacles: Vec<ObstacleView>,
    pub pickups: Vec<PickupView>,
    pub particles: Vec<ParticleView>,
    pub events: Vec<GameEvent>,
}

/// The player's ship for rendering plus the full stat/equipment block
/// the HUD panels read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub radius: f64,
    pub stats: PlayerStats,
    pub loadout: Loadout,
}

impl Default for PlayerView {
    fn default() -> Self {
        Self {
            position: Position::default(),
            radius: crate::constants::PLAYER_RADIUS,
            stats: PlayerStats::default(),
            loadout: Loadout::default(),
        }
    }
}

/// Session counters for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: u32,
    pub hits: u32,
    pub misses: u32,
    /// Percentage; 100 when no shot has resolved yet.
    pub accuracy: f64,
    pub level: u32,
    /// Live targets on screen (pair members count individually).
    pub target_count: u32,
    pub inventory: Inventory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub position: Position,
    pub radius: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairMemberView {
    pub position: Position,
    pub radius: f64,
    pub alive: bool,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairView {
    pub a: PairMemberView,
    pub b: PairMemberView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub radius: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub position: Position,
    pub radius: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub position: Position,
    pub radius: f64,
    pub kind: Resource,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Position,
    pub radius: f64,
    /// CSS hsl() color string.
    pub color: String,
    /// Remaining/maximum lifetime ratio for fade-out.
    pub alpha: f64,
}
