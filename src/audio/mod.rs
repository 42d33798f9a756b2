//! Audio domain: turns movement transitions into queued cues.
//!
//! No sound is played. Cues are flushed to the log each frame, and a
//! playback backend would drain `AudioCueQueue` in place of `flush_cues`.


use std::collections::VecDeque;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{BonkedEvent, BouncedEvent, JumpedEvent, LandedEvent};

/// Cues kept when nothing drains the queue for a while.
pub const MAX_PENDING_CUES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCue {
    Jump { charge_fraction: f32 },
    Land,
    Bonk,
    Bounce { world_edge: bool },
}

impl AudioCue {
    /// Playback volume in [0, 1]; stronger jumps are louder.
    pub fn volume(&self) -> f32 {
        match self {
            AudioCue::Jump { charge_fraction } => 0.4 + 0.6 * charge_fraction.clamp(0.0, 1.0),
            AudioCue::Land => 0.8,
            AudioCue::Bonk => 0.7,
            AudioCue::Bounce { world_edge: true } => 0.5,
            AudioCue::Bounce { world_edge: false } => 0.6,
        }
    }
}

impl From<&JumpedEvent> for AudioCue {
    fn from(event: &JumpedEvent) -> Self {
        AudioCue::Jump {
            charge_fraction: event.charge_fraction,
        }
    }
}

impl From<&BouncedEvent> for AudioCue {
    fn from(event: &BouncedEvent) -> Self {
        AudioCue::Bounce {
            world_edge: event.world_edge,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct AudioCueQueue {
    pending: VecDeque<AudioCue>,
}

impl AudioCueQueue {
    /// Queue a cue, dropping the oldest once `MAX_PENDING_CUES` are waiting.
    pub fn push(&mut self, cue: AudioCue) {
        if self.pending.len() >= MAX_PENDING_CUES {
            self.pending.pop_front();
        }
        self.pending.push_back(cue);
    }

    pub fn pending(&self) -> impl ExactSizeIterator<Item = &AudioCue> {
        self.pending.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every queued cue, oldest first.
    pub fn drain(&mut self) -> Vec<AudioCue> {
        self.pending.drain(..).collect()
    }
}

pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioCueQueue>()
            .add_systems(Update, (queue_movement_cues, flush_cues).chain());
    }
}

fn queue_movement_cues(
    mut queue: ResMut<AudioCueQueue>,
    mut jumped: MessageReader<JumpedEvent>,
    mut landed: MessageReader<LandedEvent>,
    mut bonked: MessageReader<BonkedEvent>,
    mut bounced: MessageReader<BouncedEvent>,
) {
    for event in jumped.read() {
        queue.push(event.into());
    }
    for _ in landed.read() {
        queue.push(AudioCue::Land);
    }
    for _ in bonked.read() {
        queue.push(AudioCue::Bonk);
    }
    for event in bounced.read() {
        queue.push(event.into());
    }
}

fn flush_cues(mut queue: ResMut<AudioCueQueue>) {
    for cue in queue.drain() {
        debug!("Audio cue {:?} at volume {:.2}", cue, cue.volume());
    }
}
