//! Core domain: run flow systems and setup.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::Rng;

use crate::core::events::RunOverEvent;
use crate::core::resources::{ClimbProgress, RunConfig};
use crate::core::state::{GameState, PauseState};

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Roll a fresh seed unless one was pinned, and clear progress.
pub(crate) fn initialize_run(
    mut run_config: ResMut<RunConfig>,
    mut progress: ResMut<ClimbProgress>,
    mut pinned: Local<bool>,
) {
    // The seed the app started with is used for the first run
    if *pinned {
        run_config.seed = rand::rng().random();
    }
    *pinned = true;

    progress.reset();

    info!("Starting new climb with seed: {}", run_config.seed);
}

pub(crate) fn handle_run_over(
    mut events: MessageReader<RunOverEvent>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    for event in events.read() {
        info!(
            "Run over: best height {:.0}, highest chunk {}",
            event.best_height, event.highest_chunk
        );
        game_state.set(GameState::RunOver);
    }
}

pub(crate) fn restart_on_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Enter)
        || keyboard.just_pressed(KeyCode::NumpadEnter)
        || keyboard.just_pressed(KeyCode::KeyR)
    {
        game_state.set(GameState::Climbing);
    }
}

pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    pause_state: Res<State<PauseState>>,
    mut next_pause: ResMut<NextState<PauseState>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }

    let next = match pause_state.get() {
        PauseState::Running => PauseState::Paused,
        PauseState::Paused => PauseState::Running,
    };
    info!("Climb {:?}", next);
    next_pause.set(next);
}
