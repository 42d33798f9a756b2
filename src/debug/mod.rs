//! Dev overlay for inspecting generation and collision.
//!
//! Features:
//! - Surface, hole and chunk seam outlines (F1 or `)
//! - Jump arcs recorded by the generator (F2)
//! - Foot sensors and body box
//! - Info overlay with position, chunk window and seed (F3)

mod outline;
mod state;
mod systems;
mod ui;


pub use outline::{Line, aabb_outline, hole_outline, surface_outline};
pub use state::DebugState;

use bevy::prelude::*;

use crate::debug::systems::{
    draw_sensor_gizmos, draw_world_gizmos, handle_debug_hotkeys, toggle_debug_gizmos,
    update_debug_info_overlay, update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (
                    toggle_debug_gizmos,
                    handle_debug_hotkeys,
                    update_status_message,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (draw_world_gizmos, draw_sensor_gizmos, update_debug_info_overlay),
            );
    }
}
