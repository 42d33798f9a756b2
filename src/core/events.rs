//! Core domain: events for the run flow.

use bevy::ecs::message::Message;

/// Fired when the player drops more than one chunk below the highest chunk
/// reached this run.
#[derive(Debug, Clone, Copy)]
pub struct RunOverEvent {
    pub best_height: f32,
    pub highest_chunk: i64,
}

impl Message for RunOverEvent {}
