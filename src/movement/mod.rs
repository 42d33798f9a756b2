//! Movement domain: player body, charge jump, and fixed-step physics.

mod components;
mod events;
mod processor;
mod resolver;
mod resources;
mod systems;


pub use components::{Facing, MovementPhase, MovementState, PhysicsBody, Player, PlayerBody};
pub use events::{BonkedEvent, BouncedEvent, JumpedEvent, LandedEvent};
pub use processor::{PlayerPhysicsProcessor, StepReport};
pub use resolver::{Contact, CrossingBand, SIDE_EPSILON, crosses_top, crosses_underside, resolve};
pub use resources::MovementInput;

use bevy::prelude::*;

use crate::core::{ClimbStepSet, GameState, PauseState, RunSetupSet};
use crate::movement::systems::{read_input, spawn_player, step_player};

pub(crate) use systems::PLAYER_COLOR;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementInput>()
            .add_message::<JumpedEvent>()
            .add_message::<LandedEvent>()
            .add_message::<BonkedEvent>()
            .add_message::<BouncedEvent>()
            .add_systems(
                OnEnter(GameState::Climbing),
                spawn_player.in_set(RunSetupSet::World),
            )
            .add_systems(Update, read_input.run_if(in_state(PauseState::Running)))
            .add_systems(FixedUpdate, step_player.in_set(ClimbStepSet::Physics));
    }
}
