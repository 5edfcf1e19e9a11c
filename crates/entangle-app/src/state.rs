//! Messages between the shell, the game-loop thread, and the
//! presentation layer.

use serde::{Deserialize, Serialize};

use entangle_core::commands::{ControlState, PlayerCommand};

/// Commands sent from the shell to the game-loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// An edge-triggered player command to queue on the engine.
    Player(PlayerCommand),
    /// Fresh level-triggered control flags from the input collaborator.
    Controls(ControlState),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// One line of the stdin protocol, as the presentation layer speaks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShellInput {
    /// Forward an edge-triggered command.
    Command { command: PlayerCommand },
    /// Replace the control flags.
    Controls { controls: ControlState },
    /// Set the player's display name (e.g. in response to a
    /// `name_request` notice at game over).
    SetName { name: String },
    /// Exit the shell.
    Quit,
}

/// Out-of-band notices printed to stdout between snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShellNotice {
    /// A score submission cannot happen until a name is provided.
    NameRequest,
    /// Outcome of a score submission.
    ScoreSubmitted { accepted: bool, rank: usize },
}
