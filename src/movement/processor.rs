//! Movement domain: one fixed physics step for the player.
//!
//! Order within a step: timers, jump charge, horizontal input and
//! integration, world-edge containment, wall crossings, gravity and vertical
//! integration, surface crossings at three foot sensors, solid-box push-out,
//! facing. Nothing here fails; clamps and insets exist to stop oscillation and
//! tunnelling.

use bevy::prelude::*;

use crate::chunks::Surface;
use crate::content::ClimbTuning;
use crate::movement::resolver::{self, Contact, CrossingBand};
use crate::movement::{Facing, MovementInput, MovementState, PhysicsBody, PlayerBody};

/// Transitions observed during one step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Launch velocity when a charged jump was released this step
    pub jumped: Option<f32>,
    pub landed: bool,
    pub bonked: bool,
    pub wall_hit: bool,
    pub edge_bounce: bool,
}

pub struct PlayerPhysicsProcessor<'a> {
    tuning: &'a ClimbTuning,
}

impl<'a> PlayerPhysicsProcessor<'a> {
    pub fn new(tuning: &'a ClimbTuning) -> Self {
        Self { tuning }
    }

    pub fn step(
        &self,
        pose: &mut PlayerBody,
        body: &mut PhysicsBody,
        state: &mut MovementState,
        input: &MovementInput,
        surfaces: &[Surface],
        dt: f32,
    ) -> StepReport {
        let mut report = StepReport::default();
        let old_position = pose.position;
        let was_grounded = state.grounded;

        state.jump_cooldown = (state.jump_cooldown - dt).max(0.0);
        state.stun_time = (state.stun_time - dt).max(0.0);

        report.jumped = self.update_jump_charge(body, state, input.jump_held, dt);

        self.move_horizontally(pose, body, state, input, surfaces, old_position.x, dt, &mut report);
        self.move_vertically(pose, body, state, surfaces, old_position.y, dt, &mut report);
        self.push_out_of_solids(pose, body, state, surfaces, &mut report);

        self.update_facing(body, state);

        report.landed = state.grounded && !was_grounded;
        report
    }

    /// Charge while grounded and held, launch on release. Returns the launch
    /// velocity on the step the jump fires.
    pub fn update_jump_charge(
        &self,
        body: &mut PhysicsBody,
        state: &mut MovementState,
        jump_held: bool,
        dt: f32,
    ) -> Option<f32> {
        let jump = &self.tuning.jump;

        if state.grounded && jump_held && state.jump_cooldown <= 0.0 && !state.charging {
            state.charging = true;
            state.jump_charge = 0.0;
        }

        if state.charging && jump_held {
            state.jump_charge = (state.jump_charge + jump.charge_rate * dt).min(jump.max_charge);
        }

        if state.charging && !jump_held {
            let launch = state.jump_charge;
            body.velocity.y = launch;
            state.charging = false;
            state.grounded = false;
            state.jump_cooldown = jump.cooldown;
            debug!("Jump released: launch velocity {:.1}", launch);
            return Some(launch);
        }

        None
    }

    #[allow(clippy::too_many_arguments)]
    fn move_horizontally(
        &self,
        pose: &mut PlayerBody,
        body: &mut PhysicsBody,
        state: &mut MovementState,
        input: &MovementInput,
        surfaces: &[Surface],
        old_x: f32,
        dt: f32,
        report: &mut StepReport,
    ) {
        let jump = &self.tuning.jump;

        let axis = if !state.charging && !state.is_stunned() {
            input.axis()
        } else {
            0.0
        };
        body.apply_horizontal_input(axis, dt);
        pose.position.x += body.velocity.x * dt;

        // World edges
        let max_x = self.tuning.world.width - pose.size.x;
        if pose.position.x < 0.0 || pose.position.x > max_x {
            body.velocity.x *= -jump.edge_bounce;
            state.stun_time = jump.edge_stun;
            pose.position.x = pose.position.x.clamp(0.0, max_x);
            report.edge_bounce = true;
        }

        // Surface sides crossed between the previous and current X
        let width = pose.size.x;
        let height = pose.size.y;
        for surface in surfaces {
            let sides = surface.sides();
            let foot = pose.position.y;

            let entered_left = body.velocity.x > 0.0
                && old_x + width <= sides.left.x
                && pose.position.x + width >= sides.left.x
                && sides.left.overlaps_body(foot, height, jump.wall_inset);
            let entered_right = body.velocity.x < 0.0
                && old_x >= sides.right.x
                && pose.position.x <= sides.right.x
                && sides.right.overlaps_body(foot, height, jump.wall_inset);

            if entered_left {
                pose.position.x = sides.left.x - width;
            } else if entered_right {
                pose.position.x = sides.right.x;
            } else {
                continue;
            }

            body.velocity.x *= -jump.wall_bounce;
            state.stun_time = jump.wall_stun;
            report.wall_hit = true;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn move_vertically(
        &self,
        pose: &mut PlayerBody,
        body: &mut PhysicsBody,
        state: &mut MovementState,
        surfaces: &[Surface],
        old_y: f32,
        dt: f32,
        report: &mut StepReport,
    ) {
        let jump = &self.tuning.jump;
        let old_head = old_y + pose.size.y;

        if !state.grounded {
            body.apply_gravity(dt);
        }
        pose.position.y += body.velocity.y * dt;

        let band = CrossingBand {
            epsilon: jump.crossing_epsilon,
            detection_zone: jump.detection_zone,
        };
        let sensors = pose.sensor_xs(jump.sensor_inset);

        let mut grounded = false;
        'surfaces: for surface in surfaces {
            for sensor_x in sensors {
                let Some(surface_y) = surface.surface_y(sensor_x) else {
                    continue;
                };

                if resolver::crosses_top(old_y, pose.foot_y(), body.velocity.y, surface_y, band) {
                    pose.position.y = surface_y;
                    body.velocity.y = 0.0;
                    grounded = true;
                    break 'surfaces;
                }

                let Some(underside_y) = surface.underside_y(sensor_x) else {
                    continue;
                };
                if resolver::crosses_underside(
                    old_head,
                    pose.head_y(),
                    body.velocity.y,
                    underside_y,
                    jump.crossing_epsilon,
                ) {
                    pose.position.y = underside_y - pose.size.y - 1.0;
                    body.velocity.y = -jump.bonk_knockback;
                    report.bonked = true;
                    break;
                }
            }
        }

        state.grounded = grounded;
    }

    /// Push the body out of flat slabs and walls it still overlaps, for
    /// contacts that fall between the foot sensors.
    fn push_out_of_solids(
        &self,
        pose: &mut PlayerBody,
        body: &mut PhysicsBody,
        state: &mut MovementState,
        surfaces: &[Surface],
        report: &mut StepReport,
    ) {
        let mut bounds = pose.bounds();
        for solid in surfaces.iter().filter_map(Surface::solid_box) {
            match resolver::resolve(&mut bounds, &mut body.velocity, &solid) {
                Contact::None => {}
                Contact::LandedOnTop => state.grounded = true,
                Contact::HitBottom => report.bonked = true,
                Contact::HitSide => report.wall_hit = true,
            }
        }
        pose.position = bounds.min;
    }

    fn update_facing(&self, body: &PhysicsBody, state: &mut MovementState) {
        let deadband = self.tuning.jump.facing_deadband;
        if body.velocity.x > deadband {
            state.facing = Facing::Right;
        } else if body.velocity.x < -deadband {
            state.facing = Facing::Left;
        }
    }
}
