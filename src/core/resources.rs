//! Core domain: shared resources for run configuration and progression.

use bevy::prelude::*;
use rand::Rng;

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// Height bookkeeping for the current run.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct ClimbProgress {
    /// Highest foot height reached above the ground, never decreases
    pub best_height: f32,
    /// Current foot height above the ground
    pub height: f32,
    pub highest_chunk: i64,
}

impl ClimbProgress {
    pub fn record(&mut self, height: f32, chunk: i64) {
        self.height = height;
        self.best_height = self.best_height.max(height);
        self.highest_chunk = self.highest_chunk.max(chunk);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
