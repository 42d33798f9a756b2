//! Chunks domain: streaming window over generated chunks.
//!
//! Chunks are generated lazily in ascending order, so every chunk's entry is
//! the exit of the one below it. Unloading only drops a chunk from the active
//! geometry; its record stays cached and is never regenerated.

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::chunks::generator::{ChunkEntry, ChunkLayout, LevelGenerator};
use crate::chunks::geometry::Surface;
use crate::content::ClimbTuning;
use crate::core::RunConfig;

/// Chunks kept loaded on each side of the player's chunk.
pub const WINDOW_RADIUS: i64 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub index: i64,
    pub y_start: f32,
    pub layout: ChunkLayout,
    pub loaded: bool,
}

impl Chunk {
    pub fn surfaces(&self) -> &[Surface] {
        &self.layout.surfaces
    }
}

/// Result of feeding the player's height to the manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkUpdate {
    pub player_chunk: i64,
    /// The loaded window moved this update
    pub changed: bool,
    /// The player dropped more than one chunk below the highest reached
    pub fell_below_safety: bool,
}

#[derive(Resource, Debug)]
pub struct ChunkManager {
    generator: LevelGenerator,
    chunk_height: f32,
    chunks: BTreeMap<i64, Chunk>,
    current_chunk: i64,
    highest_chunk: i64,
    active: Vec<Surface>,
    /// Bumped whenever the active geometry is rebuilt
    revision: u64,
    generated: u64,
}

impl FromWorld for ChunkManager {
    fn from_world(world: &mut World) -> Self {
        let tuning = world.get_resource::<ClimbTuning>().cloned().unwrap_or_default();
        let seed = world.get_resource::<RunConfig>().map_or(0, |config| config.seed);
        Self::new(tuning, seed)
    }
}

impl ChunkManager {
    /// Create a manager with the window loaded around chunk 0.
    pub fn new(tuning: ClimbTuning, seed: u64) -> Self {
        let chunk_height = tuning.world.chunk_height;
        let mut manager = Self {
            generator: LevelGenerator::new(tuning, seed),
            chunk_height,
            chunks: BTreeMap::new(),
            current_chunk: 0,
            highest_chunk: 0,
            active: Vec::new(),
            revision: 0,
            generated: 0,
        };
        manager.refresh_window(0);
        manager
    }

    /// Throw away every chunk and start over with a new seed.
    pub fn reset(&mut self, seed: u64) {
        let tuning = self.generator.tuning().clone();
        let revision = self.revision;
        *self = Self::new(tuning, seed);
        // Presentation watches the revision, so it must keep moving forward
        self.revision += revision + 1;
        info!("World reset with seed {}", seed);
    }

    pub fn chunk_index(&self, y: f32) -> i64 {
        (y / self.chunk_height).floor() as i64
    }

    /// Track the player's height: slide the loaded window when the player
    /// changes chunk, and report a fall below the safety margin.
    pub fn update(&mut self, player_y: f32) -> ChunkUpdate {
        let player_chunk = self.chunk_index(player_y);
        if player_chunk == self.current_chunk {
            return ChunkUpdate {
                player_chunk,
                ..default()
            };
        }

        self.current_chunk = player_chunk;
        self.highest_chunk = self.highest_chunk.max(player_chunk);
        self.refresh_window(player_chunk);

        let fell_below_safety = self.highest_chunk - player_chunk > 1;
        if fell_below_safety {
            warn!(
                "Player fell to chunk {} (highest {})",
                player_chunk, self.highest_chunk
            );
        }

        ChunkUpdate {
            player_chunk,
            changed: true,
            fell_below_safety,
        }
    }

    /// Loaded surfaces, concatenated in ascending chunk order.
    pub fn active_geometry(&self) -> &[Surface] {
        &self.active
    }

    pub fn loaded_indices(&self) -> Vec<i64> {
        self.chunks
            .values()
            .filter(|chunk| chunk.loaded)
            .map(|chunk| chunk.index)
            .collect()
    }

    pub fn chunk(&self, index: i64) -> Option<&Chunk> {
        self.chunks.get(&index)
    }

    pub fn loaded_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values().filter(|chunk| chunk.loaded)
    }

    pub fn current_chunk(&self) -> i64 {
        self.current_chunk
    }

    pub fn highest_chunk(&self) -> i64 {
        self.highest_chunk
    }

    pub fn chunk_height(&self) -> f32 {
        self.chunk_height
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// How many chunks have ever been generated.
    pub fn generated_count(&self) -> u64 {
        self.generated
    }

    fn refresh_window(&mut self, center: i64) {
        let low = center - WINDOW_RADIUS;
        let high = center + WINDOW_RADIUS;

        for index in low.max(0)..=high {
            self.ensure_generated(index);
        }

        for chunk in self.chunks.values_mut() {
            let loaded = (low..=high).contains(&chunk.index);
            if chunk.loaded != loaded {
                debug!(
                    "Chunk {} {}",
                    chunk.index,
                    if loaded { "loaded" } else { "unloaded" }
                );
            }
            chunk.loaded = loaded;
        }

        self.active = self
            .chunks
            .values()
            .filter(|chunk| chunk.loaded)
            .flat_map(|chunk| chunk.layout.surfaces.iter().copied())
            .collect();
        self.revision += 1;
    }

    /// Generate `index` and any missing chunks below it, lowest first.
    fn ensure_generated(&mut self, index: i64) {
        if index < 0 || self.chunks.contains_key(&index) {
            return;
        }

        let first_missing = self
            .chunks
            .keys()
            .next_back()
            .map_or(0, |highest| highest + 1);

        for next in first_missing..=index {
            let entry = match self.chunks.get(&(next - 1)) {
                Some(below) => below.layout.exit.clone(),
                None => ChunkEntry::default(),
            };
            let y_start = next as f32 * self.chunk_height;
            let layout = self
                .generator
                .generate_chunk(y_start, self.chunk_height, &entry);

            self.chunks.insert(
                next,
                Chunk {
                    index: next,
                    y_start,
                    layout,
                    loaded: false,
                },
            );
            self.generated += 1;
        }
    }
}
