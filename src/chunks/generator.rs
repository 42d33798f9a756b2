//! Chunks domain: procedural chunk layout.
//!
//! Each chunk is grown from one or two anchors, the top centres of the last
//! accepted path platforms. Gaps and displacements are sampled inside the
//! reach of a full-charge jump as computed from the shared `ClimbTuning`, and
//! every candidate passes the playability filter before it is kept.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::chunks::geometry::{Aabb, Segment, Slab, Surface};
use crate::content::ClimbTuning;

const CHUNK_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;
const CHUNK_SEED_MIX: u64 = 0xbf58_476d_1ce4_e5b9;

/// Extra horizontal room a launch strip needs beyond the player's width.
const LAUNCH_STRIP_MARGIN: f32 = 4.0;

/// Candidate placements tried per decoy before giving up on it.
const DECOY_ATTEMPTS: u32 = 8;

/// Top centre of the last accepted platform on a climbing path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

impl Anchor {
    /// True when `surface` is the platform this anchor sits on.
    pub fn rests_on(&self, surface: &Surface) -> bool {
        surface
            .surface_y(self.x)
            .is_some_and(|y| (y - self.y).abs() < 0.01)
    }
}

/// What a chunk inherits from the one below it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChunkEntry {
    /// One anchor per path
    pub anchors: Vec<Anchor>,
    /// Surfaces near the seam that new candidates must respect
    pub carried: Vec<Surface>,
    /// Jump arcs that reach across the seam
    pub envelopes: Vec<Aabb>,
    /// Full-apex clearances that reach across the seam
    pub clearances: Vec<Aabb>,
}

/// Everything generated for one chunk.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChunkLayout {
    pub surfaces: Vec<Surface>,
    /// Per path, indices into `surfaces` in climbing order
    pub paths: Vec<Vec<usize>>,
    /// Space swept by each path jump that lands in this chunk
    pub envelopes: Vec<Aabb>,
    /// The same jumps taken at full charge; decoys stay out of these
    pub clearances: Vec<Aabb>,
    /// Seam state the next chunk continues from
    pub exit: ChunkEntry,
    /// True when the iteration budget ran out before the chunk was filled
    pub exhausted: bool,
}

enum Proposal {
    Candidate { surface: Surface, anchor: Anchor },
    AboveChunk,
}

#[derive(Debug, Clone)]
pub struct LevelGenerator {
    tuning: ClimbTuning,
    seed: u64,
}

impl LevelGenerator {
    pub fn new(tuning: ClimbTuning, seed: u64) -> Self {
        Self { tuning, seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &ClimbTuning {
        &self.tuning
    }

    /// Stable per-chunk seed, independent of the order chunks are generated in.
    pub fn chunk_seed(&self, index: i64) -> u64 {
        let mixed = (index as u64).wrapping_mul(CHUNK_SEED_SALT) ^ CHUNK_SEED_MIX;
        self.seed ^ mixed.rotate_left(31)
    }

    fn path_count(&self) -> usize {
        usize::from(self.tuning.generator.paths.clamp(1, 2))
    }

    /// Range of platform centre X for `path`. Dual paths get lanes far
    /// enough apart that neither platforms nor jump arcs can interact.
    pub fn lane(&self, path: usize) -> (f32, f32) {
        let generator = &self.tuning.generator;
        let low = generator.edge_margin;
        let high = self.tuning.world.width - generator.edge_margin;
        if self.path_count() == 1 {
            return (low, high);
        }

        let separation = generator.platform_width_max
            + self.arc_padding()
            + generator.overlap_padding;
        let lane_width = ((high - low - separation) * 0.5).max(0.0);
        if path == 0 {
            (low, low + lane_width)
        } else {
            (high - lane_width, high)
        }
    }

    /// Anchors on top of the ground slab, one per path.
    pub fn ground_anchors(&self) -> Vec<Anchor> {
        let y = self.tuning.world.ground_height;
        (0..self.path_count())
            .map(|path| {
                let (low, high) = self.lane(path);
                Anchor {
                    x: (low + high) * 0.5,
                    y,
                }
            })
            .collect()
    }

    pub fn ground_slab(&self) -> Slab {
        Slab::flat(
            0.0,
            0.0,
            self.tuning.world.width,
            self.tuning.world.ground_height,
        )
    }

    /// Generate the chunk spanning `[y_start, y_start + height)`.
    ///
    /// Chunk 0 emits the ground slab and starts from it; every other chunk
    /// continues the paths from `entry`, the previous chunk's exit.
    pub fn generate_chunk(&self, y_start: f32, height: f32, entry: &ChunkEntry) -> ChunkLayout {
        let index = (y_start / height).round() as i64;
        let mut rng = ChaCha8Rng::seed_from_u64(self.chunk_seed(index));
        let mut layout = ChunkLayout::default();

        // Candidates are checked against carried seam surfaces as well as
        // this chunk's own
        let mut nearby: Vec<Surface> = entry.carried.clone();
        let mut envelopes: Vec<Aabb> = entry.envelopes.clone();
        let mut clearances: Vec<Aabb> = entry.clearances.clone();

        let mut anchors = if index == 0 {
            let ground: Surface = self.ground_slab().into();
            layout.surfaces.push(ground);
            nearby.push(ground);
            self.ground_anchors()
        } else if entry.anchors.is_empty() {
            warn!("Chunk {} has no entry anchors; restarting paths at its base", index);
            self.ground_anchors()
                .into_iter()
                .map(|a| Anchor { x: a.x, y: y_start })
                .collect()
        } else {
            entry.anchors.clone()
        };
        let path_count = self.path_count();
        while anchors.len() < path_count {
            anchors.push(anchors[0]);
        }
        anchors.truncate(path_count);

        layout.paths = vec![Vec::new(); anchors.len()];
        let top = y_start + height;
        let max_iterations = self.tuning.generator.max_iterations;
        let mut iterations = 0;
        let mut open = vec![true; anchors.len()];
        let mut lift = vec![0.0_f32; anchors.len()];

        'grow: while open.iter().any(|o| *o) {
            for path in 0..anchors.len() {
                if !open[path] {
                    continue;
                }
                if iterations >= max_iterations {
                    layout.exhausted = true;
                    break 'grow;
                }
                iterations += 1;

                let from = anchors[path];
                let lane = self.lane(path);
                match self.propose_path_platform(&mut rng, from, lift[path], lane, y_start, top) {
                    Proposal::AboveChunk => open[path] = false,
                    Proposal::Candidate { surface, anchor } => {
                        let bounds = surface.bounds();
                        let arc = self.arc_envelope(from, &bounds);
                        let arc_clear = nearby
                            .iter()
                            .filter(|s| !from.rests_on(s))
                            .all(|s| !arc.overlaps(&s.bounds()));

                        if arc_clear && self.is_playable(&bounds, &nearby, &envelopes) {
                            layout.paths[path].push(layout.surfaces.len());
                            layout.surfaces.push(surface);
                            let clearance = self.clearance_envelope(from, &bounds);
                            layout.envelopes.push(arc);
                            layout.clearances.push(clearance);
                            nearby.push(surface);
                            envelopes.push(arc);
                            clearances.push(clearance);
                            anchors[path] = anchor;
                            lift[path] = 0.0;
                        } else {
                            lift[path] += self.tuning.generator.retry_nudge;
                        }
                    }
                }
            }
        }

        if layout.exhausted {
            warn!(
                "Chunk {} hit the iteration cap ({}); layout is sparser than intended",
                index, max_iterations
            );
        }

        self.add_decoys(&mut rng, &mut layout, &mut nearby, &clearances, y_start, top);
        layout.exit = self.exit_entry(&layout, anchors, top);

        debug!(
            "Generated chunk {}: {} surfaces, {} path platforms, {} iterations",
            index,
            layout.surfaces.len(),
            layout.paths.iter().map(Vec::len).sum::<usize>(),
            iterations
        );
        layout
    }

    /// Vertical gap bounds for a path step, in world units.
    pub fn vertical_gap_range(&self) -> (f32, f32) {
        let height = self.tuning.max_jump_height();
        let generator = &self.tuning.generator;
        (
            generator.vertical_gap_min * height,
            generator.vertical_gap_max * height,
        )
    }

    /// Horizontal displacement bounds for a step that rises `rise` units,
    /// allowing for the steepest slope at the landing edge.
    pub fn horizontal_range(&self, rise: f32) -> (f32, f32) {
        let generator = &self.tuning.generator;
        let reach = self
            .tuning
            .max_jump_distance(rise + generator.slope_max * 0.5);
        (generator.horizontal_min * reach, generator.horizontal_max * reach)
    }

    fn propose_path_platform(
        &self,
        rng: &mut ChaCha8Rng,
        anchor: Anchor,
        lift: f32,
        lane: (f32, f32),
        y_start: f32,
        top: f32,
    ) -> Proposal {
        let generator = &self.tuning.generator;
        let (gap_min, gap_max) = self.vertical_gap_range();

        // The first platform of a chunk must start inside it; the nudge never
        // pushes past what a full charge can reach
        let lower = (gap_min + lift).max(y_start - anchor.y).min(gap_max);
        let gap = if lower < gap_max {
            rng.random_range(lower..=gap_max)
        } else {
            gap_max
        };
        let y = anchor.y + gap;
        if y >= top {
            return Proposal::AboveChunk;
        }

        let x = self.displace(rng, anchor.x, gap, lane);
        let width = rng.random_range(generator.platform_width_min..=generator.platform_width_max);
        let slope = rng.random_range(-generator.slope_max..=generator.slope_max);
        let segment = Segment::new(
            x - width * 0.5,
            y - slope * 0.5,
            x + width * 0.5,
            y + slope * 0.5,
            generator.platform_thickness,
        );

        Proposal::Candidate {
            surface: segment.into(),
            anchor: Anchor { x, y },
        }
    }

    /// Pick a horizontal position reachable from `from_x` for a step of
    /// `rise`, on whichever side of it has room inside `(margin, max_x)`.
    fn displace(
        &self,
        rng: &mut ChaCha8Rng,
        from_x: f32,
        rise: f32,
        (margin, max_x): (f32, f32),
    ) -> f32 {
        let (dx_min, dx_max) = self.horizontal_range(rise);
        let dx = rng.random_range(dx_min..=dx_max);

        let right_fits = from_x + dx <= max_x;
        let left_fits = from_x - dx >= margin;
        let sign = match (left_fits, right_fits) {
            (true, true) => {
                if rng.random_bool(0.5) {
                    1.0
                } else {
                    -1.0
                }
            }
            (false, true) => 1.0,
            (true, false) => -1.0,
            (false, false) => {
                if max_x - from_x >= from_x - margin {
                    1.0
                } else {
                    -1.0
                }
            }
        };

        (from_x + sign * dx).clamp(margin, max_x)
    }

    fn arc_padding(&self) -> f32 {
        self.tuning.world.player_width + LAUNCH_STRIP_MARGIN
    }

    /// Space the player sweeps jumping from the launch strip next to `from`
    /// onto a platform with bounds `to`: from the lowest point of the launch
    /// platform's top to a body height above the landing, a strip wider on
    /// each side.
    pub fn arc_envelope(&self, from: Anchor, to: &Aabb) -> Aabb {
        let pad = self.arc_padding();
        Aabb {
            min: Vec2::new(
                from.x.min(to.min.x) - pad,
                from.y - self.tuning.generator.slope_max * 0.5,
            ),
            max: Vec2::new(
                from.x.max(to.max.x) + pad,
                to.max.y + self.tuning.world.player_height,
            ),
        }
    }

    /// `arc_envelope` raised to the apex of a full-charge jump.
    pub fn clearance_envelope(&self, from: Anchor, to: &Aabb) -> Aabb {
        let mut arc = self.arc_envelope(from, to);
        arc.max.y = arc
            .max
            .y
            .max(arc.min.y + self.tuning.max_jump_height() + self.tuning.world.player_height);
        arc
    }

    /// Playability filter for a candidate with bounds `candidate`:
    /// - padded, it must not intersect any existing surface or jump arc;
    /// - every surface within `headroom_clearance` below it that it overhangs
    ///   must keep a launch strip the player can stand on without it overhead.
    pub fn is_playable(&self, candidate: &Aabb, existing: &[Surface], envelopes: &[Aabb]) -> bool {
        let generator = &self.tuning.generator;
        let padded = candidate.expanded(generator.overlap_padding);
        if envelopes.iter().any(|arc| padded.overlaps(arc)) {
            return false;
        }

        let strip = self.arc_padding();
        existing.iter().all(|surface| {
            let bounds = surface.bounds();
            if padded.overlaps(&bounds) {
                return false;
            }

            let clearance = candidate.min.y - bounds.max.y;
            if clearance < 0.0 || clearance >= generator.headroom_clearance {
                return true;
            }
            if !candidate.overlaps_horizontally(&bounds) {
                return true;
            }

            let left_strip = candidate.min.x - bounds.min.x;
            let right_strip = bounds.max.x - candidate.max.x;
            left_strip >= strip || right_strip >= strip
        })
    }

    fn add_decoys(
        &self,
        rng: &mut ChaCha8Rng,
        layout: &mut ChunkLayout,
        nearby: &mut Vec<Surface>,
        clearances: &[Aabb],
        y_start: f32,
        top: f32,
    ) {
        let generator = &self.tuning.generator;
        let bases: Vec<Anchor> = layout
            .paths
            .iter()
            .flatten()
            .filter_map(|&i| anchor_of(&layout.surfaces[i]))
            .collect();
        if bases.is_empty() {
            return;
        }

        let (gap_min, gap_max) = self.vertical_gap_range();
        let full_width = (
            generator.edge_margin,
            self.tuning.world.width - generator.edge_margin,
        );
        // The first jump of the next chunk launches from at most a full gap
        // below the seam; decoys stay under that band
        let ceiling = top - gap_max - generator.slope_max;

        for _ in 0..generator.decoys_per_chunk {
            for _ in 0..DECOY_ATTEMPTS {
                let base = bases[rng.random_range(0..bases.len())];
                let gap = rng.random_range(gap_min..=gap_max);
                let y = base.y + gap;
                let x = self.displace(rng, base.x, gap, full_width);
                let width = rng.random_range(generator.decoy_width_min..=generator.decoy_width_max);
                let slope = rng.random_range(-generator.slope_max..=generator.slope_max);
                let thickness = generator.platform_thickness;

                let mut slab = Slab::sloped(
                    x - width * 0.5,
                    y - thickness - slope * 0.5,
                    width,
                    thickness,
                    slope,
                );
                if rng.random_bool(generator.hole_chance) {
                    let hole_width =
                        rng.random_range(generator.hole_width_min..=generator.hole_width_max);
                    let offset = rng.random_range(0.0..=(width - hole_width).max(0.0));
                    slab = slab.with_hole(offset, hole_width);
                }

                let bounds = slab.bounds();
                if bounds.min.y < y_start || bounds.max.y >= ceiling {
                    continue;
                }
                if self.is_playable(&bounds, nearby, clearances) {
                    let surface = Surface::from(slab);
                    layout.surfaces.push(surface);
                    nearby.push(surface);
                    break;
                }
            }
        }
    }

    /// Seam state for the chunk above: the path anchors plus every surface
    /// and jump arc close enough to the top edge to matter there.
    fn exit_entry(&self, layout: &ChunkLayout, anchors: Vec<Anchor>, top: f32) -> ChunkEntry {
        let generator = &self.tuning.generator;
        let band =
            self.tuning.max_jump_height() + generator.headroom_clearance + generator.overlap_padding;

        ChunkEntry {
            anchors,
            carried: layout
                .surfaces
                .iter()
                .filter(|s| s.bounds().max.y > top - band)
                .copied()
                .collect(),
            envelopes: crossing(&layout.envelopes, top - generator.overlap_padding),
            clearances: crossing(&layout.clearances, top - generator.overlap_padding),
        }
    }
}

fn crossing(arcs: &[Aabb], below: f32) -> Vec<Aabb> {
    arcs.iter().filter(|arc| arc.max.y > below).copied().collect()
}

/// Top centre of a walkable surface.
fn anchor_of(surface: &Surface) -> Option<Anchor> {
    let x = surface.bounds().center().x;
    surface.surface_y(x).map(|y| Anchor { x, y })
}
