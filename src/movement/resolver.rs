//! Movement domain: contact resolution between the player box and surfaces.

use bevy::prelude::*;

use crate::chunks::Aabb;

/// Gap left between the actor and a surface after a side push-out.
pub const SIDE_EPSILON: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Contact {
    #[default]
    None,
    LandedOnTop,
    HitSide,
    HitBottom,
}

/// Resolve an overlap between `actor` and a solid `surface` box along the
/// axis of least penetration, mutating the actor box and its velocity.
///
/// Vertical resolution wins exact ties with a horizontal one so that a
/// landing is never masked by simultaneous side contact.
pub fn resolve(actor: &mut Aabb, velocity: &mut Vec2, surface: &Aabb) -> Contact {
    if !actor.overlaps(surface) {
        return Contact::None;
    }

    let left = actor.max.x - surface.min.x;
    let right = surface.max.x - actor.min.x;
    let top = actor.max.y - surface.min.y;
    let bottom = surface.max.y - actor.min.y;

    let min = left.min(right).min(top).min(bottom);

    if bottom == min && velocity.y <= 0.0 {
        translate(actor, Vec2::new(0.0, surface.max.y - actor.min.y));
        velocity.y = 0.0;
        return Contact::LandedOnTop;
    }

    if top == min && velocity.y > 0.0 {
        translate(actor, Vec2::new(0.0, surface.min.y - actor.max.y));
        velocity.y = 0.0;
        return Contact::HitBottom;
    }

    if left == min {
        translate(actor, Vec2::new(surface.min.x - actor.max.x - SIDE_EPSILON, 0.0));
        velocity.x = -velocity.x.abs();
        return Contact::HitSide;
    }

    if right == min {
        translate(actor, Vec2::new(surface.max.x - actor.min.x + SIDE_EPSILON, 0.0));
        velocity.x = velocity.x.abs();
        return Contact::HitSide;
    }

    Contact::None
}

fn translate(actor: &mut Aabb, offset: Vec2) {
    actor.min += offset;
    actor.max += offset;
}

/// Tolerances for the surface crossing test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingBand {
    /// How far below the surface the previous foot may already be
    pub epsilon: f32,
    /// How far above the surface the current foot still counts as landed
    pub detection_zone: f32,
}

/// Grounding test bracketing the surface between the previous and current
/// foot heights, so a fast fall cannot step over a thin surface.
pub fn crosses_top(prev_foot: f32, foot: f32, vy: f32, surface_y: f32, band: CrossingBand) -> bool {
    vy <= 0.0 && prev_foot >= surface_y - band.epsilon && foot <= surface_y + band.detection_zone
}

/// Head-bonk test against the underside of a surface while rising.
pub fn crosses_underside(prev_head: f32, head: f32, vy: f32, underside_y: f32, epsilon: f32) -> bool {
    vy > 0.0 && prev_head <= underside_y + epsilon && head >= underside_y
}
