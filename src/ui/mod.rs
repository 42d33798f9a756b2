//! UI domain: climb HUD, pause overlay, and run-over flow.

mod hud;
mod pause;
mod run_over;

use bevy::prelude::*;

use crate::core::{GameState, PauseState};
use crate::ui::hud::{spawn_climb_hud, update_charge_bar, update_height_text};
use crate::ui::pause::{despawn_pause_screen, handle_pause_buttons, spawn_pause_screen};
use crate::ui::run_over::{
    despawn_run_over_screen, handle_restart_button, spawn_run_over_screen,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_climb_hud)
            .add_systems(Update, (update_height_text, update_charge_bar))
            .add_systems(OnEnter(PauseState::Paused), spawn_pause_screen)
            .add_systems(OnExit(PauseState::Paused), despawn_pause_screen)
            .add_systems(
                Update,
                handle_pause_buttons.run_if(in_state(PauseState::Paused)),
            )
            .add_systems(OnEnter(GameState::RunOver), spawn_run_over_screen)
            .add_systems(OnExit(GameState::RunOver), despawn_run_over_screen)
            .add_systems(
                Update,
                handle_restart_button.run_if(in_state(GameState::RunOver)),
            );
    }
}
