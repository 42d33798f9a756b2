//! Draw order and palette for world sprites.

use bevy::prelude::*;

use crate::chunks::SurfaceKind;

/// Defines the render order for world sprites.
/// Lower values render behind higher values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawLayer {
    /// Walls and the ground slab.
    Structure = 0,
    /// Walkable girders.
    Girder = 10,
    /// The climber.
    Player = 20,
}

impl DrawLayer {
    /// Convert to Z coordinate for 2D ordering.
    pub fn z(&self) -> f32 {
        (*self as i32) as f32 * 0.1
    }
}

pub fn surface_layer(kind: SurfaceKind) -> DrawLayer {
    match kind {
        SurfaceKind::Wall => DrawLayer::Structure,
        SurfaceKind::Slab | SurfaceKind::PerforatedSlab | SurfaceKind::Segment => {
            DrawLayer::Girder
        }
    }
}

pub fn surface_color(kind: SurfaceKind) -> Color {
    match kind {
        SurfaceKind::Slab => Color::srgb(0.55, 0.35, 0.25),
        SurfaceKind::PerforatedSlab => Color::srgb(0.5, 0.3, 0.3),
        SurfaceKind::Segment => Color::srgb(0.75, 0.45, 0.2),
        SurfaceKind::Wall => Color::srgb(0.3, 0.3, 0.4),
    }
}
