//! Data definitions for the tuning RON file.
//!
//! `ClimbTuning` is the single source of truth shared by the physics step and
//! the level generator. Every reach figure the generator relies on is derived
//! from the same numbers the player is simulated with.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Root tuning (tuning.ron)
// ============================================================================

#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClimbTuning {
    pub body: BodyTuning,
    pub jump: JumpTuning,
    pub world: WorldTuning,
    pub generator: GeneratorTuning,
}

// ============================================================================
// Body integration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BodyTuning {
    /// Horizontal acceleration while a direction is held (units/s²)
    pub accel: f32,
    pub max_speed: f32,
    /// Deceleration toward rest when no direction is held (units/s²)
    pub friction: f32,
    /// Signed; negative pulls down
    pub gravity: f32,
    /// Terminal fall speed, kept within what the landing band can catch in one step
    pub max_fall_speed: f32,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            accel: 2000.0,
            max_speed: 300.0,
            friction: 1300.0,
            gravity: -1800.0,
            max_fall_speed: 2640.0,
        }
    }
}

// ============================================================================
// Jump charge and contact response
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JumpTuning {
    /// Launch velocity of a fully charged jump
    pub max_charge: f32,
    pub charge_rate: f32,
    /// Lockout after a release before charging can start again
    pub cooldown: f32,
    /// Downward velocity applied after hitting the underside of a surface
    pub bonk_knockback: f32,
    pub edge_bounce: f32,
    pub edge_stun: f32,
    pub wall_bounce: f32,
    pub wall_stun: f32,
    /// Forgiveness band above a surface that still counts as a landing
    pub detection_zone: f32,
    /// Tolerance below a surface for the previous-frame foot height
    pub crossing_epsilon: f32,
    /// Inset of the outer foot sensors from the body edges
    pub sensor_inset: f32,
    /// Vertical inset used when checking overlap with a wall side
    pub wall_inset: f32,
    pub facing_deadband: f32,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            max_charge: 900.0,
            charge_rate: 1600.0,
            cooldown: 0.15,
            bonk_knockback: 200.0,
            edge_bounce: 1.25,
            edge_stun: 0.25,
            wall_bounce: 1.3,
            wall_stun: 0.3,
            detection_zone: 15.0,
            crossing_epsilon: 5.0,
            sensor_inset: 2.0,
            wall_inset: 2.0,
            facing_deadband: 0.1,
        }
    }
}

// ============================================================================
// World layout and streaming
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldTuning {
    pub width: f32,
    pub chunk_height: f32,
    /// Physics steps per second
    pub fixed_hz: f64,
    pub player_width: f32,
    pub player_height: f32,
    /// Height of the ground slab emitted at the base of chunk 0
    pub ground_height: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            width: 800.0,
            chunk_height: 600.0,
            fixed_hz: 180.0,
            player_width: 40.0,
            player_height: 40.0,
            ground_height: 50.0,
        }
    }
}

impl WorldTuning {
    pub fn step(&self) -> f32 {
        (1.0 / self.fixed_hz) as f32
    }
}

// ============================================================================
// Level generation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorTuning {
    /// Concurrent climbing paths (1 = single path, 2 = dual path)
    pub paths: u8,
    /// Vertical gap range as fractions of the full-charge jump height
    pub vertical_gap_min: f32,
    pub vertical_gap_max: f32,
    /// Horizontal displacement range as fractions of the reach at the sampled gap
    pub horizontal_min: f32,
    pub horizontal_max: f32,
    pub platform_width_min: f32,
    pub platform_width_max: f32,
    /// Maximum vertical rise across a path platform (either sign)
    pub slope_max: f32,
    pub platform_thickness: f32,
    /// Platform centres stay this far from the world edges
    pub edge_margin: f32,
    /// Padding added around candidates for the overlap check
    pub overlap_padding: f32,
    /// Surfaces closer than this below a candidate must keep a launch strip free of it
    pub headroom_clearance: f32,
    /// Upward anchor nudge after a rejected candidate
    pub retry_nudge: f32,
    /// Candidate budget per chunk
    pub max_iterations: u32,
    pub decoys_per_chunk: u32,
    pub decoy_width_min: f32,
    pub decoy_width_max: f32,
    /// Probability that a decoy girder gets a fall-through hole
    pub hole_chance: f64,
    pub hole_width_min: f32,
    pub hole_width_max: f32,
}

impl Default for GeneratorTuning {
    fn default() -> Self {
        Self {
            paths: 1,
            vertical_gap_min: 0.65,
            vertical_gap_max: 0.85,
            horizontal_min: 0.40,
            horizontal_max: 0.80,
            platform_width_min: 90.0,
            platform_width_max: 140.0,
            slope_max: 20.0,
            platform_thickness: 16.0,
            edge_margin: 100.0,
            overlap_padding: 30.0,
            headroom_clearance: 265.0,
            retry_nudge: 8.0,
            max_iterations: 256,
            decoys_per_chunk: 3,
            decoy_width_min: 120.0,
            decoy_width_max: 160.0,
            hole_chance: 0.35,
            hole_width_min: 40.0,
            hole_width_max: 56.0,
        }
    }
}

// ============================================================================
// Derived reach
// ============================================================================

impl ClimbTuning {
    fn fall_accel(&self) -> f32 {
        -self.body.gravity
    }

    /// Apex height of a fully charged jump: h = v² / (2g)
    pub fn max_jump_height(&self) -> f32 {
        let g = self.fall_accel();
        if g <= 0.0 {
            return 0.0;
        }
        self.jump.max_charge * self.jump.max_charge / (2.0 * g)
    }

    /// Time after launch at which a full-charge jump comes back down through
    /// `rise` units above the launch height. `None` when the apex is lower.
    pub fn airtime_to_height(&self, rise: f32) -> Option<f32> {
        let g = self.fall_accel();
        let v = self.jump.max_charge;
        if g <= 0.0 {
            return None;
        }
        let disc = v * v - 2.0 * g * rise;
        if disc < 0.0 {
            return None;
        }
        Some((v + disc.sqrt()) / g)
    }

    /// Horizontal distance covered from rest with full air control in `time`
    /// seconds: accelerate to max speed, then cruise.
    pub fn horizontal_reach(&self, time: f32) -> f32 {
        let accel = self.body.accel;
        let max_speed = self.body.max_speed;
        if accel <= 0.0 || time <= 0.0 {
            return 0.0;
        }
        let t_accel = max_speed / accel;
        if time <= t_accel {
            0.5 * accel * time * time
        } else {
            0.5 * accel * t_accel * t_accel + max_speed * (time - t_accel)
        }
    }

    /// Horizontal reach of a full-charge jump that lands `rise` units higher.
    pub fn max_jump_distance(&self, rise: f32) -> f32 {
        self.airtime_to_height(rise)
            .map(|t| self.horizontal_reach(t))
            .unwrap_or(0.0)
    }
}
