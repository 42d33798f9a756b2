//! Chunks domain: streaming systems.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::chunks::ChunkManager;
use crate::content::ClimbTuning;
use crate::core::{ClimbProgress, RunConfig, RunOverEvent};
use crate::movement::{Player, PlayerBody};

/// Rebuild the world from the run's seed.
pub(crate) fn reset_world(run_config: Res<RunConfig>, mut chunks: ResMut<ChunkManager>) {
    chunks.reset(run_config.seed);
}

/// Follow the player's height: slide the chunk window, record progress, and
/// end the run on a fall below the safety margin.
pub(crate) fn stream_chunks(
    tuning: Res<ClimbTuning>,
    mut chunks: ResMut<ChunkManager>,
    mut progress: ResMut<ClimbProgress>,
    player_query: Query<&PlayerBody, With<Player>>,
    mut run_over: MessageWriter<RunOverEvent>,
) {
    let Ok(body) = player_query.single() else {
        return;
    };

    let update = chunks.update(body.foot_y());
    progress.record(
        body.foot_y() - tuning.world.ground_height,
        update.player_chunk,
    );

    if update.changed {
        debug!(
            "Player entered chunk {}; loaded {:?}",
            update.player_chunk,
            chunks.loaded_indices()
        );
    }

    if update.fell_below_safety {
        run_over.write(RunOverEvent {
            best_height: progress.best_height,
            highest_chunk: chunks.highest_chunk(),
        });
    }
}
