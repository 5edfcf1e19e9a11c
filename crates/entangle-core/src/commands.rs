//! Player commands and the per-tick control state produced by the input
//! collaborator.
//!
//! Discrete commands are edge-triggered and queued for processing at the
//! next tick boundary; `ControlState` flags are level-triggered and read
//! by the physics step every tick.

use serde::{Deserialize, Serialize};

use crate::enums::{CraftableItem, FireMode, StatKind};
use crate::types::Position;

/// All possible edge-triggered player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Fire once along the current aim vector (ignored outside `Playing`;
    /// automatic weapons additionally require the fire control held).
    Shoot,
    /// Open/close the crafting panel.
    ToggleCrafting,
    /// Open/close the upgrade shop.
    ToggleShop,
    /// Open/close the leaderboard view.
    ToggleLeaderboard,
    /// Close whichever panel is open.
    Escape,
    /// Select the firing-mode variant.
    SetMode { mode: FireMode },
    /// Leave `GameOver` and start a fresh session. Equipment and
    /// inventory persist; session counters and entities reset.
    Restart,
    /// Report new arena dimensions from the presentation layer.
    SetViewport { width: f64, height: f64 },
    /// Craft (and immediately equip) an item from the catalog.
    Craft { item: CraftableItem },
    /// Buy a token-funded stat increment.
    UpgradeStat { stat: StatKind },
}

/// Level-triggered control flags, refreshed by the input collaborator.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ControlState {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Aim point in arena coordinates.
    pub aim: Position,
    /// Whether the fire control is currently held (automatic weapons).
    pub fire_held: bool,
}
