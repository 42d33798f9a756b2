//! Chunks domain: surface geometry, procedural generation, and streaming.

mod generator;
mod geometry;
mod manager;
mod systems;

#[cfg(test)]
mod tests;

pub use generator::{Anchor, ChunkEntry, ChunkLayout, LevelGenerator};
pub use geometry::{Aabb, Hole, Segment, SideSpan, Slab, Surface, SurfaceKind, WallSides};
pub use manager::{Chunk, ChunkManager, ChunkUpdate};

use bevy::prelude::*;

use crate::chunks::systems::{reset_world, stream_chunks};
use crate::core::{ClimbStepSet, GameState, RunSetupSet};

/// Expects `ClimbTuning` and `RunConfig` to be inserted already.
pub struct ChunksPlugin;

impl Plugin for ChunksPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChunkManager>()
            .add_systems(
                OnEnter(GameState::Climbing),
                reset_world.in_set(RunSetupSet::World),
            )
            .add_systems(FixedUpdate, stream_chunks.in_set(ClimbStepSet::Streaming));
    }
}
