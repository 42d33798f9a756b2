//! Debug domain: line lists for surface outlines.

use bevy::prelude::*;

use crate::chunks::{Aabb, Slab, Surface};

pub type Line = (Vec2, Vec2);

/// Edges of a surface: walkable tops, undersides and ends. Slab tops skip
/// their hole.
pub fn surface_outline(surface: &Surface) -> Vec<Line> {
    match surface {
        Surface::Slab(slab) => slab_outline(slab),
        Surface::Segment(segment) if segment.is_wall() => aabb_outline(&segment.bounds()),
        Surface::Segment(segment) => {
            let top = (
                Vec2::new(segment.x1, segment.y1),
                Vec2::new(segment.x2, segment.y2),
            );
            let down = Vec2::new(0.0, segment.thickness);
            vec![
                top,
                (top.0 - down, top.1 - down),
                (top.0, top.0 - down),
                (top.1, top.1 - down),
            ]
        }
    }
}

/// Outline of the hole in a slab, if it has one.
pub fn hole_outline(surface: &Surface) -> Vec<Line> {
    let Surface::Slab(slab) = surface else {
        return Vec::new();
    };
    let Some(hole) = slab.hole else {
        return Vec::new();
    };

    let corner = |local_x: f32, top: bool| {
        let rise = slab.slope * (local_x / slab.width);
        let y = slab.y + rise + if top { slab.height } else { 0.0 };
        Vec2::new(slab.x + local_x, y)
    };
    let start = hole.offset;
    let end = hole.offset + hole.width;
    vec![
        (corner(start, true), corner(start, false)),
        (corner(end, true), corner(end, false)),
        (corner(start, true), corner(end, false)),
    ]
}

pub fn aabb_outline(aabb: &Aabb) -> Vec<Line> {
    let a = aabb.min;
    let b = Vec2::new(aabb.max.x, aabb.min.y);
    let c = aabb.max;
    let d = Vec2::new(aabb.min.x, aabb.max.y);
    vec![(a, b), (b, c), (c, d), (d, a)]
}

fn slab_outline(slab: &Slab) -> Vec<Line> {
    let point = |local_x: f32, top: bool| {
        let rise = slab.slope * (local_x / slab.width);
        let y = slab.y + rise + if top { slab.height } else { 0.0 };
        Vec2::new(slab.x + local_x, y)
    };

    let spans = match slab.hole {
        Some(hole) => vec![(0.0, hole.offset), (hole.offset + hole.width, slab.width)],
        None => vec![(0.0, slab.width)],
    };

    let mut lines = Vec::new();
    for (start, end) in spans {
        if end <= start {
            continue;
        }
        lines.push((point(start, true), point(end, true)));
        lines.push((point(start, false), point(end, false)));
        lines.push((point(start, true), point(start, false)));
        lines.push((point(end, true), point(end, false)));
    }
    lines
}
