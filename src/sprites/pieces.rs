//! Splitting surfaces into rectangles a sprite can draw.
//!
//! Slabs break around their hole, girders become one rotated bar, and walls
//! use their bounding box.

use bevy::prelude::*;

use crate::chunks::{Segment, Slab, Surface, SurfaceKind};

/// Spans narrower than this are not worth a sprite.
const MIN_PIECE_WIDTH: f32 = 0.5;

/// One rotated rectangle of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePiece {
    pub center: Vec2,
    pub size: Vec2,
    /// Rotation around `center`, radians counter-clockwise
    pub angle: f32,
    pub kind: SurfaceKind,
}

pub fn surface_pieces(surface: &Surface) -> Vec<SurfacePiece> {
    let kind = surface.kind();
    match surface {
        Surface::Slab(slab) => slab_pieces(slab, kind),
        Surface::Segment(segment) if segment.is_wall() => {
            let bounds = segment.bounds();
            vec![SurfacePiece {
                center: bounds.center(),
                size: Vec2::new(bounds.width(), bounds.height()),
                angle: 0.0,
                kind,
            }]
        }
        Surface::Segment(segment) => vec![segment_piece(segment, kind)],
    }
}

fn slab_pieces(slab: &Slab, kind: SurfaceKind) -> Vec<SurfacePiece> {
    let spans = match slab.hole {
        Some(hole) => vec![(0.0, hole.offset), (hole.offset + hole.width, slab.width)],
        None => vec![(0.0, slab.width)],
    };
    let angle = slab.slope.atan2(slab.width);
    let gradient = if slab.width > 0.0 {
        slab.slope / slab.width
    } else {
        0.0
    };

    spans
        .into_iter()
        .filter(|(start, end)| end - start >= MIN_PIECE_WIDTH)
        .map(|(start, end)| {
            let mid = (start + end) * 0.5;
            let run = end - start;
            SurfacePiece {
                center: Vec2::new(
                    slab.x + mid,
                    slab.y + slab.height * 0.5 + gradient * mid,
                ),
                size: Vec2::new(run.hypot(gradient * run), slab.height),
                angle,
                kind,
            }
        })
        .collect()
}

fn segment_piece(segment: &Segment, kind: SurfaceKind) -> SurfacePiece {
    let dx = segment.x2 - segment.x1;
    let dy = segment.y2 - segment.y1;
    SurfacePiece {
        center: Vec2::new(
            (segment.x1 + segment.x2) * 0.5,
            (segment.y1 + segment.y2) * 0.5 - segment.thickness * 0.5,
        ),
        size: Vec2::new(dx.hypot(dy), segment.thickness),
        angle: dy.atan2(dx),
        kind,
    }
}
