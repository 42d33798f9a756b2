//! Chunks domain: static surface geometry and height queries.
//!
//! A `Surface` is either a slab (girder) with an optional fall-through hole or
//! a line segment with thickness. Horizontal-dominant segments are walkable;
//! near-vertical segments only act as walls.

use bevy::prelude::*;

/// Axis-aligned box in world units, `min` at bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }

    pub fn overlaps_horizontally(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }

    pub fn expanded(&self, padding: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(padding),
            max: self.max + Vec2::splat(padding),
        }
    }
}

/// Fall-through gap in a slab, in slab-local X.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hole {
    pub offset: f32,
    pub width: f32,
}

impl Hole {
    pub fn contains(&self, local_x: f32) -> bool {
        local_x >= self.offset && local_x <= self.offset + self.width
    }
}

/// Possibly tilted girder. `slope` is the total rise from left to right edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slab {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub slope: f32,
    pub hole: Option<Hole>,
}

impl Slab {
    pub fn flat(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            slope: 0.0,
            hole: None,
        }
    }

    pub fn sloped(x: f32, y: f32, width: f32, height: f32, slope: f32) -> Self {
        Self {
            slope,
            ..Self::flat(x, y, width, height)
        }
    }

    /// Attach a hole. The hole is clamped inside `[0, width]`.
    pub fn with_hole(mut self, offset: f32, width: f32) -> Self {
        let offset = offset.clamp(0.0, self.width);
        let width = width.clamp(0.0, self.width - offset);
        self.hole = Some(Hole { offset, width });
        self
    }

    fn local_x(&self, world_x: f32) -> Option<f32> {
        let local = world_x - self.x;
        if !(0.0..=self.width).contains(&local) {
            return None;
        }
        if self.hole.is_some_and(|hole| hole.contains(local)) {
            return None;
        }
        Some(local)
    }

    fn rise_at(&self, local_x: f32) -> f32 {
        self.slope * (local_x / self.width)
    }

    pub fn surface_y(&self, world_x: f32) -> Option<f32> {
        self.local_x(world_x)
            .map(|local| self.y + self.height + self.rise_at(local))
    }

    pub fn underside_y(&self, world_x: f32) -> Option<f32> {
        self.local_x(world_x).map(|local| self.y + self.rise_at(local))
    }

    pub fn bounds(&self) -> Aabb {
        let low = self.slope.min(0.0);
        let high = self.slope.max(0.0);
        Aabb {
            min: Vec2::new(self.x, self.y + low),
            max: Vec2::new(self.x + self.width, self.y + self.height + high),
        }
    }
}

/// Line surface with thickness hanging below it (or centred on it, for walls).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub thickness: f32,
}

impl Segment {
    /// Build a segment with endpoints ordered left to right.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32) -> Self {
        if x1 <= x2 {
            Self {
                x1,
                y1,
                x2,
                y2,
                thickness,
            }
        } else {
            Self {
                x1: x2,
                y1: y2,
                x2: x1,
                y2: y1,
                thickness,
            }
        }
    }

    pub fn is_wall(&self) -> bool {
        (self.y2 - self.y1).abs() > (self.x2 - self.x1).abs()
    }

    pub fn surface_y(&self, world_x: f32) -> Option<f32> {
        if self.is_wall() || world_x < self.x1 || world_x > self.x2 {
            return None;
        }
        let span = self.x2 - self.x1;
        if span <= 0.0 {
            return None;
        }
        let t = (world_x - self.x1) / span;
        Some(self.y1 + (self.y2 - self.y1) * t)
    }

    pub fn underside_y(&self, world_x: f32) -> Option<f32> {
        self.surface_y(world_x).map(|top| top - self.thickness)
    }

    pub fn bounds(&self) -> Aabb {
        if self.is_wall() {
            let half = self.thickness * 0.5;
            let x = (self.x1 + self.x2) * 0.5;
            Aabb {
                min: Vec2::new(x - half, self.y1.min(self.y2)),
                max: Vec2::new(x + half, self.y1.max(self.y2)),
            }
        } else {
            Aabb {
                min: Vec2::new(self.x1, self.y1.min(self.y2) - self.thickness),
                max: Vec2::new(self.x2, self.y1.max(self.y2)),
            }
        }
    }
}

/// Vertical extent of one side of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideSpan {
    pub x: f32,
    pub bottom: f32,
    pub top: f32,
}

impl SideSpan {
    /// True when a body spanning `[foot, foot + height]` overlaps this side
    /// by more than `inset` on both ends.
    pub fn overlaps_body(&self, foot: f32, height: f32, inset: f32) -> bool {
        foot < self.top - inset && foot + height > self.bottom + inset
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSides {
    pub left: SideSpan,
    pub right: SideSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Slab,
    PerforatedSlab,
    Segment,
    Wall,
}

/// Canonical static geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    Slab(Slab),
    Segment(Segment),
}

impl Surface {
    pub fn kind(&self) -> SurfaceKind {
        match self {
            Surface::Slab(slab) if slab.hole.is_some() => SurfaceKind::PerforatedSlab,
            Surface::Slab(_) => SurfaceKind::Slab,
            Surface::Segment(segment) if segment.is_wall() => SurfaceKind::Wall,
            Surface::Segment(_) => SurfaceKind::Segment,
        }
    }

    /// Height of the walkable top at `world_x`, `None` outside the extent,
    /// inside a hole, or on a wall.
    pub fn surface_y(&self, world_x: f32) -> Option<f32> {
        match self {
            Surface::Slab(slab) => slab.surface_y(world_x),
            Surface::Segment(segment) => segment.surface_y(world_x),
        }
    }

    pub fn underside_y(&self, world_x: f32) -> Option<f32> {
        match self {
            Surface::Slab(slab) => slab.underside_y(world_x),
            Surface::Segment(segment) => segment.underside_y(world_x),
        }
    }

    pub fn bounds(&self) -> Aabb {
        match self {
            Surface::Slab(slab) => slab.bounds(),
            Surface::Segment(segment) => segment.bounds(),
        }
    }

    /// Box that is solid everywhere inside it: flat unbroken slabs and walls.
    /// Sloped or perforated surfaces only collide through height queries.
    pub fn solid_box(&self) -> Option<Aabb> {
        match self {
            Surface::Slab(slab) if slab.slope == 0.0 && slab.hole.is_none() => Some(slab.bounds()),
            Surface::Segment(segment) if segment.is_wall() => Some(segment.bounds()),
            _ => None,
        }
    }

    /// Left and right faces, with per-edge heights for sloped tops.
    pub fn sides(&self) -> WallSides {
        match self {
            Surface::Slab(slab) => WallSides {
                left: SideSpan {
                    x: slab.x,
                    bottom: slab.y,
                    top: slab.y + slab.height,
                },
                right: SideSpan {
                    x: slab.x + slab.width,
                    bottom: slab.y + slab.slope,
                    top: slab.y + slab.height + slab.slope,
                },
            },
            Surface::Segment(segment) if segment.is_wall() => {
                let bounds = segment.bounds();
                WallSides {
                    left: SideSpan {
                        x: bounds.min.x,
                        bottom: bounds.min.y,
                        top: bounds.max.y,
                    },
                    right: SideSpan {
                        x: bounds.max.x,
                        bottom: bounds.min.y,
                        top: bounds.max.y,
                    },
                }
            }
            Surface::Segment(segment) => WallSides {
                left: SideSpan {
                    x: segment.x1,
                    bottom: segment.y1 - segment.thickness,
                    top: segment.y1,
                },
                right: SideSpan {
                    x: segment.x2,
                    bottom: segment.y2 - segment.thickness,
                    top: segment.y2,
                },
            },
        }
    }
}

impl From<Slab> for Surface {
    fn from(slab: Slab) -> Self {
        Surface::Slab(slab)
    }
}

impl From<Segment> for Surface {
    fn from(segment: Segment) -> Self {
        Surface::Segment(segment)
    }
}
