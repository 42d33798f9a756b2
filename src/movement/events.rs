//! Movement domain: events for jump and contact transitions.

use bevy::ecs::message::Message;

/// A charged jump was released.
#[derive(Debug, Clone, Copy)]
pub struct JumpedEvent {
    pub launch_velocity: f32,
    /// Fraction of the maximum charge, within [0, 1]
    pub charge_fraction: f32,
}

impl Message for JumpedEvent {}

/// The player became grounded after being airborne.
#[derive(Debug, Clone, Copy)]
pub struct LandedEvent {
    pub foot_y: f32,
}

impl Message for LandedEvent {}

/// The player's head hit the underside of a surface.
#[derive(Debug, Clone, Copy)]
pub struct BonkedEvent;

impl Message for BonkedEvent {}

/// The player bounced off a wall or a world edge.
#[derive(Debug, Clone, Copy)]
pub struct BouncedEvent {
    pub world_edge: bool,
}

impl Message for BouncedEvent {}
