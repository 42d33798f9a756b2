//! Movement domain: components for the climbing body.

use bevy::prelude::*;

use crate::chunks::Aabb;
use crate::content::BodyTuning;

#[derive(Component, Debug)]
pub struct Player;

/// Simulated box of the player in world units, `position` at bottom-left.
/// The sprite transform is derived from this, never the other way round.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    pub position: Vec2,
    pub size: Vec2,
}

impl PlayerBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: self.position,
            max: self.position + self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    pub fn foot_y(&self) -> f32 {
        self.position.y
    }

    /// X of the left, centre and right foot sensors.
    pub fn sensor_xs(&self, inset: f32) -> [f32; 3] {
        let x = self.position.x;
        [x + inset, x + self.size.x * 0.5, x + self.size.x - inset]
    }

    pub fn head_y(&self) -> f32 {
        self.position.y + self.size.y
    }
}

/// Velocity integration for one moving entity. Knows nothing about geometry.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    pub velocity: Vec2,
    accel: f32,
    max_speed: f32,
    friction: f32,
    gravity: f32,
    max_fall_speed: f32,
}

impl PhysicsBody {
    pub fn new(tuning: &BodyTuning) -> Self {
        Self {
            velocity: Vec2::ZERO,
            accel: tuning.accel,
            max_speed: tuning.max_speed,
            friction: tuning.friction,
            gravity: tuning.gravity,
            max_fall_speed: tuning.max_fall_speed,
        }
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// `input` is -1, 0 or 1. Held input accelerates toward `input * max_speed`;
    /// no input decelerates toward rest without crossing zero.
    pub fn apply_horizontal_input(&mut self, input: f32, dt: f32) {
        if input != 0.0 {
            let target_vx = input.signum() * self.max_speed;
            let accel = self.accel * dt;
            if self.velocity.x < target_vx {
                self.velocity.x = (self.velocity.x + accel).min(target_vx);
            } else {
                self.velocity.x = (self.velocity.x - accel).max(target_vx);
            }
        } else {
            self.apply_friction(dt);
        }

        self.velocity.x = self.velocity.x.clamp(-self.max_speed, self.max_speed);
    }

    fn apply_friction(&mut self, dt: f32) {
        let decel = self.friction * dt;
        if self.velocity.x > 0.0 {
            self.velocity.x = (self.velocity.x - decel).max(0.0);
        } else if self.velocity.x < 0.0 {
            self.velocity.x = (self.velocity.x + decel).min(0.0);
        }
    }

    pub fn apply_gravity(&mut self, dt: f32) {
        self.velocity.y = (self.velocity.y + self.gravity * dt).max(-self.max_fall_speed);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

/// Jump and contact state driven by the physics processor.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct MovementState {
    pub grounded: bool,
    pub charging: bool,
    /// Accumulated launch velocity, within `[0, max_charge]`
    pub jump_charge: f32,
    pub jump_cooldown: f32,
    pub stun_time: f32,
    pub facing: Facing,
}

impl MovementState {
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..default()
        }
    }

    /// Charge as a fraction of `max_charge`, for the HUD.
    pub fn charge_fraction(&self, max_charge: f32) -> f32 {
        if max_charge <= 0.0 {
            return 0.0;
        }
        (self.jump_charge / max_charge).clamp(0.0, 1.0)
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_time > 0.0
    }

    pub fn phase(&self) -> MovementPhase {
        if self.charging {
            MovementPhase::Charging
        } else if self.grounded {
            MovementPhase::Grounded
        } else {
            MovementPhase::Airborne
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementPhase {
    Grounded,
    Charging,
    Airborne,
}
