//! Core domain: game state definitions for the run flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Copy, Default)]
pub enum GameState {
    #[default]
    Climbing,
    /// The player fell below the safety margin; waiting for a restart
    RunOver,
}

/// Pause flag that only exists while climbing, so resuming does not
/// re-enter `GameState::Climbing` and rebuild the run.
#[derive(SubStates, Debug, Hash, Eq, PartialEq, Clone, Copy, Default)]
#[source(GameState = GameState::Climbing)]
pub enum PauseState {
    #[default]
    Running,
    Paused,
}
