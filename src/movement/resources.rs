//! Movement domain: logical input intents.

use bevy::prelude::*;

/// Per-tick intents. No device details cross into the simulation.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump_held: bool,
}

impl MovementInput {
    /// Horizontal axis in {-1, 0, 1}; opposing keys cancel out.
    pub fn axis(&self) -> f32 {
        let mut x = 0.0;
        if self.move_left {
            x -= 1.0;
        }
        if self.move_right {
            x += 1.0;
        }
        x
    }
}
