//! Debug domain: toggles for the dev overlay.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether surface and sensor gizmos are drawn
    pub gizmos_visible: bool,
    /// Whether jump arcs from the generator are drawn
    pub show_arcs: bool,
    /// Whether to show the info overlay (position, chunk, seed)
    pub show_info: bool,
    /// Message to display temporarily in the overlay
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}
