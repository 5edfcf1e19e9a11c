//! Events emitted by the simulation for UI and audio feedback, and for
//! the session-lifecycle hooks in the runtime shell.

use serde::{Deserialize, Serialize};

use crate::enums::{CraftableItem, Resource, StatKind};
use crate::types::Position;

/// Per-tick event feed included in each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The level curve advanced.
    LevelUp { level: u32 },
    /// A solitary target was destroyed by a bullet.
    TargetDestroyed { position: Position },
    /// Either member of a pair was hit; both collapsed.
    PairCollapsed { position: Position },
    /// A kill's drop roll produced a material pickup.
    PickupDropped { kind: Resource, position: Position },
    /// Tokens credited for a kill.
    TokensAwarded { amount: u32 },
    /// The player collected a pickup.
    PickupCollected { kind: Resource },
    /// An obstacle struck the player.
    ObstacleImpact { damage: f64 },
    /// A craft command succeeded and the item was equipped.
    Crafted { item: CraftableItem },
    /// A shop upgrade was purchased.
    StatUpgraded { stat: StatKind, cost: u32 },
    /// Player hull reached zero; the session is over. The shell reacts
    /// by submitting the score to the persistence collaborator.
    GameOver { score: u32, level: u32 },
}
