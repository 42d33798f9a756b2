//! Sprites domain: presentation of the active geometry and the player.
//!
//! Everything here reads simulation state and writes `Transform`s and
//! `Sprite`s; nothing feeds back into physics or generation.

mod layers;
mod pieces;
mod systems;


pub use layers::{DrawLayer, surface_color, surface_layer};
pub use pieces::{SurfacePiece, surface_pieces};
pub use systems::{CAMERA_FOLLOW_RATE, CAMERA_LEAD, SurfaceSprite, camera_target};

use bevy::prelude::*;

use crate::core::{GameState, RunSetupSet};
use crate::sprites::systems::{
    follow_player, rebuild_surface_sprites, snap_camera, sync_player_sprite,
};

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::Climbing),
            snap_camera.after(RunSetupSet::World),
        )
        .add_systems(
            Update,
            (
                rebuild_surface_sprites,
                (sync_player_sprite, follow_player).chain(),
            ),
        );
    }
}
