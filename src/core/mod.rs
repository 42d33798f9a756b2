//! Core domain: run flow, camera, and progression.

mod events;
mod resources;
mod state;
mod systems;


pub use events::RunOverEvent;
pub use resources::{ClimbProgress, RunConfig};
pub use state::{GameState, PauseState};

use bevy::prelude::*;

use crate::core::systems::{
    handle_run_over, initialize_run, restart_on_key, setup_camera, toggle_pause,
};

/// Ordering for run setup on entering `GameState::Climbing`.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum RunSetupSet {
    /// Seed and progress are reset
    Config,
    /// World and player are rebuilt from the new seed
    World,
}

/// Ordering inside each fixed step while climbing and not paused.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum ClimbStepSet {
    /// Player physics against the active geometry
    Physics,
    /// Chunk window and progress follow the new position
    Streaming,
}

#[derive(Default)]
pub struct CorePlugin {
    /// Seed for the first run; later runs roll a fresh one
    pub seed: Option<u64>,
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let run_config = match self.seed {
            Some(seed) => RunConfig { seed },
            None => RunConfig::default(),
        };

        app.init_state::<GameState>()
            .add_sub_state::<PauseState>()
            .insert_resource(run_config)
            .init_resource::<ClimbProgress>()
            .add_message::<RunOverEvent>()
            .configure_sets(
                OnEnter(GameState::Climbing),
                (RunSetupSet::Config, RunSetupSet::World).chain(),
            )
            .configure_sets(
                FixedUpdate,
                (ClimbStepSet::Physics, ClimbStepSet::Streaming)
                    .chain()
                    .run_if(in_state(PauseState::Running)),
            )
            // The initial OnEnter(Climbing) runs before Startup
            .add_systems(PreStartup, setup_camera)
            .add_systems(
                OnEnter(GameState::Climbing),
                initialize_run.in_set(RunSetupSet::Config),
            )
            .add_systems(
                Update,
                (
                    handle_run_over.run_if(in_state(GameState::Climbing)),
                    toggle_pause.run_if(in_state(GameState::Climbing)),
                    restart_on_key.run_if(in_state(GameState::RunOver)),
                ),
            );
    }
}
