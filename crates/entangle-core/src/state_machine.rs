//! Top-level game-state transition table, decoupled from any
//! presentation layer.
//!
//! Transitions:
//!
//! | current       | command            | next          |
//! |---------------|--------------------|---------------|
//! | Playing       | toggle(panel)      | panel         |
//! | panel         | toggle(same panel) | resume state  |
//! | panel         | escape             | resume state  |
//! | GameOver      | toggle(Leaderboard)| Leaderboard   |
//! | GameOver      | restart            | Playing       |
//! | any Playing   | health reaches 0   | GameOver      |
//!
//! where panel is one of Crafting/Shop/Leaderboard and the resume state
//! is whatever state the panel was opened from (`Playing`, or `GameOver`
//! for the leaderboard view). Everything else is a no-op.

use serde::{Deserialize, Serialize};

use crate::enums::GameState;

/// The game-state machine with the remembered resume state for panels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StateMachine {
    state: GameState,
    resume_state: GameState,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self {
            state: GameState::Playing,
            resume_state: GameState::Playing,
        }
    }
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Whether the physics step runs this tick.
    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    /// Toggle a panel state (Crafting, Shop, or Leaderboard).
    pub fn toggle(&mut self, panel: GameState) {
        debug_assert!(matches!(
            panel,
            GameState::Crafting | GameState::Shop | GameState::Leaderboard
        ));
        if self.state == panel {
            self.state = self.resume_state;
        } else if self.state == GameState::Playing {
            self.resume_state = GameState::Playing;
            self.state = panel;
        } else if self.state == GameState::GameOver && panel == GameState::Leaderboard {
            // Viewing the leaderboard does not clear game-over.
            self.resume_state = GameState::GameOver;
            self.state = panel;
        }
    }

    /// Close whichever panel is open.
    pub fn escape(&mut self) {
        if matches!(
            self.state,
            GameState::Crafting | GameState::Shop | GameState::Leaderboard
        ) {
            self.state = self.resume_state;
        }
    }

    /// Enter the terminal game-over state.
    pub fn game_over(&mut self) {
        self.state = GameState::GameOver;
        self.resume_state = GameState::GameOver;
    }

    /// Leave game-over for a fresh session. Returns whether the
    /// transition happened (restart is only valid from `GameOver`).
    pub fn restart(&mut self) -> bool {
        if self.state == GameState::GameOver {
            self.state = GameState::Playing;
            self.resume_state = GameState::Playing;
            true
        } else {
            false
        }
    }
}
