//! Content domain: tuning data, RON loading, and validation.

mod data;
mod loader;
mod validation;

#[cfg(test)]
mod tests;

pub use data::{BodyTuning, ClimbTuning, GeneratorTuning, JumpTuning, WorldTuning};
pub use loader::{ContentLoadError, load_tuning, parse_tuning};
pub use validation::{TuningIssue, validate_tuning};

use bevy::prelude::*;
use std::path::{Path, PathBuf};

pub const DEFAULT_TUNING_PATH: &str = "assets/data/tuning.ron";

pub struct ContentPlugin {
    pub tuning_path: PathBuf,
}

impl Default for ContentPlugin {
    fn default() -> Self {
        Self {
            tuning_path: PathBuf::from(DEFAULT_TUNING_PATH),
        }
    }
}

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        // Inserted at build time so every Startup system sees the final tuning
        let tuning = load_tuning_or_default(&self.tuning_path);
        app.insert_resource(Time::<Fixed>::from_hz(tuning.world.fixed_hz))
            .insert_resource(tuning);
    }
}

/// Load and validate tuning, falling back to the built-in defaults when the
/// file is missing, malformed, or inconsistent.
pub fn load_tuning_or_default(path: &Path) -> ClimbTuning {
    let tuning = match load_tuning(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            warn!("{}; using default tuning", e);
            return ClimbTuning::default();
        }
    };

    let issues = validate_tuning(&tuning);
    if issues.is_empty() {
        info!(
            "Tuning loaded from {}: jump height {:.1}, chunk height {}",
            path.display(),
            tuning.max_jump_height(),
            tuning.world.chunk_height
        );
        tuning
    } else {
        for issue in &issues {
            error!("Tuning validation failed: {}", issue);
        }
        warn!(
            "{} tuning issue(s) in {}; using default tuning",
            issues.len(),
            path.display()
        );
        ClimbTuning::default()
    }
}
