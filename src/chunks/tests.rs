//! Chunks domain: tests for geometry queries, generation, and streaming.

use bevy::prelude::*;

use super::{
    Aabb, Anchor, ChunkEntry, ChunkLayout, ChunkManager, LevelGenerator, Segment, Slab, Surface,
    SurfaceKind,
};
use crate::content::ClimbTuning;
use crate::movement::{MovementInput, MovementState, PhysicsBody, PlayerBody, PlayerPhysicsProcessor};

const SEEDS: [u64; 4] = [1, 7, 42, 0xC0FF_EE00];

fn dual_path_tuning() -> ClimbTuning {
    let mut tuning = ClimbTuning::default();
    tuning.generator.paths = 2;
    tuning
}

/// Generate `count` consecutive chunks, chaining each exit into the next entry.
fn generate_run(generator: &LevelGenerator, count: i64) -> Vec<(ChunkEntry, ChunkLayout)> {
    let height = generator.tuning().world.chunk_height;
    let mut chunks = Vec::new();
    let mut entry = ChunkEntry::default();

    for index in 0..count {
        let layout = generator.generate_chunk(index as f32 * height, height, &entry);
        let next = layout.exit.clone();
        chunks.push((entry, layout));
        entry = next;
    }
    chunks
}

fn top_centre(surface: &Surface) -> Anchor {
    let x = surface.bounds().center().x;
    Anchor {
        x,
        y: surface.surface_y(x).unwrap(),
    }
}

/// Every path jump as (launch surface, landing surface, launch anchor).
fn path_jumps(generator: &LevelGenerator, count: i64) -> Vec<(Surface, Surface, Anchor)> {
    let ground = Surface::from(generator.ground_slab());
    let starts = generator.ground_anchors();
    let mut previous: Vec<(Surface, Anchor)> = starts.iter().map(|a| (ground, *a)).collect();
    let mut jumps = Vec::new();

    for (_, layout) in generate_run(generator, count) {
        for (path, indices) in layout.paths.iter().enumerate() {
            for &i in indices {
                let surface = layout.surfaces[i];
                let (from, anchor) = previous[path];
                jumps.push((from, surface, anchor));
                previous[path] = (surface, top_centre(&surface));
            }
        }
    }
    jumps
}

/// Stand on `from` as close to `to` as its underside allows, full-charge
/// jump, and steer onto `to` once above it. True when the player lands on `to`.
fn simulate_jump(tuning: &ClimbTuning, from: &Surface, to: &Surface) -> bool {
    let processor = PlayerPhysicsProcessor::new(tuning);
    let surfaces = [*from, *to];
    let dt = tuning.world.step();
    let width = tuning.world.player_width;
    let from_bounds = from.bounds();
    let to_bounds = to.bounds();
    let rightward = to_bounds.center().x >= from_bounds.center().x;

    let x = if rightward {
        to_bounds.min.x.min(from_bounds.max.x) - width - 1.0
    } else {
        to_bounds.max.x.max(from_bounds.min.x) + 1.0
    };
    let Some(foot) = from.surface_y(x + width * 0.5) else {
        return false;
    };

    let mut pose = PlayerBody::new(
        Vec2::new(x, foot),
        Vec2::new(width, tuning.world.player_height),
    );
    let mut body = PhysicsBody::new(&tuning.body);
    let mut state = MovementState::grounded();

    let charge = MovementInput {
        jump_held: true,
        ..default()
    };
    for _ in 0..110 {
        processor.step(&mut pose, &mut body, &mut state, &charge, &surfaces, dt);
    }

    let direction = if rightward { 1.0 } else { -1.0 };
    let near_x = if rightward {
        to_bounds.min.x
    } else {
        to_bounds.max.x
    };

    for _ in 0..600 {
        let lead_gap = if rightward {
            near_x - (pose.position.x + width)
        } else {
            pose.position.x - near_x
        };
        let above = pose.foot_y() >= to_bounds.max.y + 1.0;

        let steer = if above || lead_gap < 0.0 {
            let offset = to_bounds.center().x - pose.center().x;
            if offset.abs() < 4.0 { 0.0 } else { offset.signum() }
        } else {
            // Approach the near side only as fast as friction can stop
            let speed = body.velocity.x.abs();
            let stopping = speed * speed / (2.0 * tuning.body.friction) + speed * dt * 2.0 + 2.0;
            if lead_gap > stopping { direction } else { 0.0 }
        };

        let input = MovementInput {
            move_left: steer < 0.0,
            move_right: steer > 0.0,
            jump_held: false,
        };
        let report = processor.step(&mut pose, &mut body, &mut state, &input, &surfaces, dt);

        if report.landed {
            let sensors = [
                pose.position.x + tuning.jump.sensor_inset,
                pose.position.x + width * 0.5,
                pose.position.x + width - tuning.jump.sensor_inset,
            ];
            return sensors
                .iter()
                .filter_map(|&px| to.surface_y(px))
                .any(|y| (y - pose.foot_y()).abs() < 1e-3);
        }
    }
    false
}

// -----------------------------------------------------------------------------
// Geometry tests
// -----------------------------------------------------------------------------

#[test]
fn test_slab_surface_follows_slope() {
    let slab = Slab::sloped(100.0, 200.0, 100.0, 16.0, 20.0);

    assert_eq!(slab.surface_y(100.0), Some(216.0));
    assert_eq!(slab.surface_y(150.0), Some(226.0));
    assert_eq!(slab.surface_y(200.0), Some(236.0));
    assert_eq!(slab.underside_y(150.0), Some(210.0));
    assert_eq!(slab.surface_y(99.0), None);
    assert_eq!(slab.surface_y(201.0), None);
}

#[test]
fn test_hole_has_no_surface() {
    let slab = Slab::flat(0.0, 0.0, 200.0, 10.0).with_hole(80.0, 40.0);
    let surface = Surface::from(slab);

    assert_eq!(surface.kind(), SurfaceKind::PerforatedSlab);
    assert_eq!(surface.surface_y(79.0), Some(10.0));
    assert_eq!(surface.surface_y(100.0), None);
    assert_eq!(surface.surface_y(121.0), Some(10.0));
    assert!(surface.solid_box().is_none());
}

#[test]
fn test_hole_is_clamped_inside_slab() {
    let slab = Slab::flat(0.0, 0.0, 100.0, 10.0).with_hole(80.0, 50.0);
    let hole = slab.hole.unwrap();
    assert_eq!(hole.offset, 80.0);
    assert_eq!(hole.width, 20.0);
}

#[test]
fn test_segment_interpolates_and_orders_endpoints() {
    let segment = Segment::new(200.0, 120.0, 100.0, 100.0, 16.0);

    assert_eq!(segment.x1, 100.0);
    assert_eq!(segment.surface_y(150.0), Some(110.0));
    assert_eq!(segment.underside_y(150.0), Some(94.0));
    assert_eq!(segment.bounds(), Aabb::new(100.0, 84.0, 100.0, 36.0));
}

#[test]
fn test_steep_segment_is_a_wall() {
    let wall = Surface::from(Segment::new(300.0, 0.0, 305.0, 200.0, 10.0));

    assert_eq!(wall.kind(), SurfaceKind::Wall);
    assert_eq!(wall.surface_y(302.0), None);
    let sides = wall.sides();
    assert!(sides.left.x < sides.right.x);
    assert_eq!(sides.left.bottom, 0.0);
    assert_eq!(sides.left.top, 200.0);
    assert!(wall.solid_box().is_some());
}

#[test]
fn test_sloped_slab_sides_follow_edge_heights() {
    let sides = Surface::from(Slab::sloped(0.0, 100.0, 100.0, 16.0, -20.0)).sides();

    assert_eq!(sides.left.top, 116.0);
    assert_eq!(sides.right.top, 96.0);
    assert_eq!(sides.right.bottom, 80.0);
}

// -----------------------------------------------------------------------------
// Generator tests
// -----------------------------------------------------------------------------

#[test]
fn test_generation_is_deterministic_per_seed() {
    let tuning = ClimbTuning::default();
    let a = generate_run(&LevelGenerator::new(tuning.clone(), 99), 5);
    let b = generate_run(&LevelGenerator::new(tuning.clone(), 99), 5);
    let c = generate_run(&LevelGenerator::new(tuning, 100), 5);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_chunk_zero_has_single_ground_slab() {
    let tuning = ClimbTuning::default();
    for seed in SEEDS {
        let generator = LevelGenerator::new(tuning.clone(), seed);
        let layout = generator.generate_chunk(0.0, 600.0, &ChunkEntry::default());

        let ground = Aabb::new(0.0, 0.0, 800.0, 50.0);
        let grounds = layout
            .surfaces
            .iter()
            .filter(|s| s.bounds() == ground)
            .count();
        assert_eq!(grounds, 1);
        assert_eq!(layout.surfaces[0].kind(), SurfaceKind::Slab);

        let first = layout.paths[0][0];
        assert!(top_centre(&layout.surfaces[first]).y < 500.0);
    }
}

#[test]
fn test_path_platforms_are_segments_and_decoys_are_slabs() {
    let generator = LevelGenerator::new(ClimbTuning::default(), 42);
    for (index, (_, layout)) in generate_run(&generator, 4).into_iter().enumerate() {
        for (i, surface) in layout.surfaces.iter().enumerate() {
            let on_path = layout.paths.iter().any(|p| p.contains(&i));
            match surface {
                Surface::Segment(_) => assert!(on_path),
                Surface::Slab(_) => assert!(!on_path, "chunk {} surface {}", index, i),
            }
        }
    }
}

#[test]
fn test_path_steps_stay_inside_jump_reach() {
    for tuning in [ClimbTuning::default(), dual_path_tuning()] {
        for seed in SEEDS {
            let generator = LevelGenerator::new(tuning.clone(), seed);
            let (gap_min, gap_max) = generator.vertical_gap_range();

            for (_, to, from) in path_jumps(&generator, 6) {
                let landing = top_centre(&to);
                let gap = landing.y - from.y;
                assert!(gap >= gap_min - 0.01 && gap <= gap_max + 0.01, "gap {}", gap);

                let (_, dx_max) = generator.horizontal_range(gap);
                assert!((landing.x - from.x).abs() <= dx_max + 0.05);
                assert!(gap < tuning.max_jump_height());
            }
        }
    }
}

#[test]
fn test_every_path_jump_is_reachable_in_simulation() {
    let tuning = ClimbTuning::default();
    for seed in SEEDS {
        let generator = LevelGenerator::new(tuning.clone(), seed);
        let jumps = path_jumps(&generator, 5);
        assert!(jumps.len() >= 8);

        for (n, (from, to, _)) in jumps.iter().enumerate() {
            assert!(
                simulate_jump(&tuning, from, to),
                "seed {} jump {} unreachable: {:?} -> {:?}",
                seed,
                n,
                from.bounds(),
                to.bounds()
            );
        }
    }
}

#[test]
fn test_path_climbs_through_every_chunk() {
    let generator = LevelGenerator::new(ClimbTuning::default(), 7);
    for (index, (_, layout)) in generate_run(&generator, 8).iter().enumerate() {
        assert!(!layout.exhausted, "chunk {} exhausted", index);
        assert!(!layout.paths[0].is_empty(), "chunk {} has no path", index);

        let y_start = index as f32 * 600.0;
        let exit = layout.exit.anchors[0];
        // The exit anchor is close enough to the next chunk to continue from
        assert!(exit.y >= y_start + 600.0 - generator.vertical_gap_range().1);
        assert!(exit.y < y_start + 600.0);
    }
}

#[test]
fn test_surfaces_never_overlap_within_or_across_chunks() {
    for tuning in [ClimbTuning::default(), dual_path_tuning()] {
        for seed in SEEDS {
            let generator = LevelGenerator::new(tuning.clone(), seed);
            for (entry, layout) in generate_run(&generator, 5) {
                let all: Vec<Aabb> = entry
                    .carried
                    .iter()
                    .chain(layout.surfaces.iter())
                    .map(Surface::bounds)
                    .collect();
                for (i, a) in all.iter().enumerate() {
                    for b in &all[i + 1..] {
                        assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
                    }
                }
            }
        }
    }
}

#[test]
fn test_surfaces_stay_inside_world_width() {
    let generator = LevelGenerator::new(ClimbTuning::default(), 1);
    for (_, layout) in generate_run(&generator, 5) {
        for surface in &layout.surfaces {
            let bounds = surface.bounds();
            assert!(bounds.min.x >= 0.0);
            assert!(bounds.max.x <= 800.0);
        }
    }
}

#[test]
fn test_dual_path_keeps_two_paths() {
    let tuning = dual_path_tuning();
    for seed in SEEDS {
        let generator = LevelGenerator::new(tuning.clone(), seed);
        let run = generate_run(&generator, 4);

        let mut per_path = [0; 2];
        for (_, layout) in &run {
            assert_eq!(layout.paths.len(), 2);
            assert_eq!(layout.exit.anchors.len(), 2);
            for (path, indices) in layout.paths.iter().enumerate() {
                per_path[path] += indices.len();
            }
        }
        assert!(per_path[0] > 0 && per_path[1] > 0, "seed {}", seed);
    }
}

#[test]
fn test_dual_path_lanes_never_meet() {
    let generator = LevelGenerator::new(dual_path_tuning(), 3);
    let (_, left_high) = generator.lane(0);
    let (right_low, _) = generator.lane(1);
    assert!(right_low - left_high >= 140.0 + 44.0 + 30.0 - 1e-3);

    for (_, layout) in generate_run(&generator, 4) {
        let right_edge_of_left = layout.paths[0]
            .iter()
            .map(|&i| layout.surfaces[i].bounds().max.x)
            .fold(f32::MIN, f32::max);
        let left_edge_of_right = layout.paths[1]
            .iter()
            .map(|&i| layout.surfaces[i].bounds().min.x)
            .fold(f32::MAX, f32::min);
        assert!(right_edge_of_left < left_edge_of_right);
    }
}

#[test]
fn test_decoys_stay_out_of_full_charge_clearances() {
    for seed in SEEDS {
        let generator = LevelGenerator::new(ClimbTuning::default(), seed);
        for (entry, layout) in generate_run(&generator, 4) {
            let clearances: Vec<Aabb> = entry
                .clearances
                .iter()
                .chain(layout.clearances.iter())
                .copied()
                .collect();
            for (i, surface) in layout.surfaces.iter().enumerate() {
                if !matches!(surface, Surface::Slab(_)) || surface.bounds().min.y < 50.0 {
                    continue;
                }
                let bounds = surface.bounds();
                for clearance in &clearances {
                    assert!(!bounds.overlaps(clearance), "decoy {} in a jump clearance", i);
                }
            }
        }
    }
}

#[test]
fn test_filter_rejects_padded_overlap() {
    let generator = LevelGenerator::new(ClimbTuning::default(), 1);
    let existing = vec![Surface::from(Segment::new(300.0, 300.0, 400.0, 300.0, 16.0))];

    // 20 units to the right of the platform, inside the 30 unit padding
    let near = Aabb::new(420.0, 284.0, 100.0, 16.0);
    let far = Aabb::new(450.0, 284.0, 100.0, 16.0);

    assert!(!generator.is_playable(&near, &existing, &[]));
    assert!(generator.is_playable(&far, &existing, &[]));
}

#[test]
fn test_filter_keeps_a_launch_strip_under_overhangs() {
    let generator = LevelGenerator::new(ClimbTuning::default(), 1);
    let existing = vec![Surface::from(Segment::new(300.0, 300.0, 400.0, 300.0, 16.0))];

    // Covers the whole platform from 140 units above
    let shadow = Aabb::new(280.0, 440.0, 140.0, 16.0);
    // Leaves 50 units of the platform's left end uncovered
    let offset = Aabb::new(350.0, 440.0, 140.0, 16.0);
    // High enough to be out of the headroom band
    let high = Aabb::new(280.0, 600.0, 140.0, 16.0);

    assert!(!generator.is_playable(&shadow, &existing, &[]));
    assert!(generator.is_playable(&offset, &existing, &[]));
    assert!(generator.is_playable(&high, &existing, &[]));
}

#[test]
fn test_filter_rejects_candidates_in_a_jump_arc() {
    let generator = LevelGenerator::new(ClimbTuning::default(), 1);
    let arc = generator.arc_envelope(
        Anchor { x: 300.0, y: 100.0 },
        &Aabb::new(400.0, 264.0, 100.0, 16.0),
    );
    let inside = Aabb::new(330.0, 180.0, 60.0, 16.0);

    assert!(!generator.is_playable(&inside, &[], &[arc]));
}

// -----------------------------------------------------------------------------
// ChunkManager tests
// -----------------------------------------------------------------------------

#[test]
fn test_manager_starts_with_window_around_chunk_zero() {
    let manager = ChunkManager::new(ClimbTuning::default(), 5);

    assert_eq!(manager.loaded_indices(), vec![0, 1]);
    assert_eq!(manager.generated_count(), 2);
    assert_eq!(manager.current_chunk(), 0);
    assert!(manager.chunk(-1).is_none());
}

#[test]
fn test_window_slides_and_keeps_cached_chunks() {
    let mut manager = ChunkManager::new(ClimbTuning::default(), 5);
    let chunk_zero = manager.chunk(0).cloned().unwrap();

    let update = manager.update(1300.0);
    assert!(update.changed);
    assert_eq!(update.player_chunk, 2);
    assert_eq!(manager.loaded_indices(), vec![1, 2, 3]);
    assert!(!manager.chunk(0).unwrap().loaded);
    assert_eq!(manager.generated_count(), 4);

    manager.update(700.0);
    assert_eq!(manager.loaded_indices(), vec![0, 1, 2]);
    assert_eq!(manager.generated_count(), 4);
    assert_eq!(manager.chunk(0).unwrap().layout, chunk_zero.layout);
}

#[test]
fn test_loaded_window_is_the_player_chunk_and_its_neighbours() {
    let mut manager = ChunkManager::new(ClimbTuning::default(), 5);

    for (height, expected) in [
        (5.5 * 600.0, vec![4, 5, 6]),
        (8.1 * 600.0, vec![7, 8, 9]),
        (7.2 * 600.0, vec![6, 7, 8]),
        (10.0, vec![0, 1]),
    ] {
        manager.update(height);
        let loaded = manager.loaded_indices();
        assert_eq!(loaded, expected);
        assert!(loaded.last().unwrap() - loaded.first().unwrap() <= 2);
    }
}

#[test]
fn test_update_within_same_chunk_is_a_no_op() {
    let mut manager = ChunkManager::new(ClimbTuning::default(), 5);
    let revision = manager.revision();

    let update = manager.update(320.0);

    assert!(!update.changed);
    assert_eq!(manager.revision(), revision);
    assert_eq!(manager.generated_count(), 2);
}

#[test]
fn test_active_geometry_concatenates_loaded_chunks_in_order() {
    let mut manager = ChunkManager::new(ClimbTuning::default(), 11);
    manager.update(1300.0);

    let expected: Vec<Surface> = [1, 2, 3]
        .iter()
        .flat_map(|i| manager.chunk(*i).unwrap().surfaces().to_vec())
        .collect();
    assert_eq!(manager.active_geometry(), expected.as_slice());
}

#[test]
fn test_skipping_ahead_generates_missing_chunks_in_order() {
    let tuning = ClimbTuning::default();
    let mut manager = ChunkManager::new(tuning.clone(), 21);

    manager.update(5.5 * 600.0);
    assert_eq!(manager.loaded_indices(), vec![4, 5, 6]);
    assert_eq!(manager.generated_count(), 7);

    // Identical to generating the chunks one after another
    let generator = LevelGenerator::new(tuning, 21);
    for (index, (_, layout)) in generate_run(&generator, 7).into_iter().enumerate() {
        assert_eq!(manager.chunk(index as i64).unwrap().layout, layout);
    }
}

#[test]
fn test_seams_continue_the_previous_chunk() {
    let mut manager = ChunkManager::new(ClimbTuning::default(), 3);
    manager.update(2500.0);
    let generator = LevelGenerator::new(ClimbTuning::default(), 3);
    let (_, gap_max) = generator.vertical_gap_range();

    for index in 1..=4 {
        let below = manager.chunk(index - 1).unwrap();
        let chunk = manager.chunk(index).unwrap();
        let exit = below.layout.exit.anchors[0];
        let first = top_centre(&chunk.surfaces()[chunk.layout.paths[0][0]]);
        assert!(first.y - exit.y <= gap_max + 1e-3);
        assert!(first.y > exit.y);
    }
}

#[test]
fn test_falling_two_chunks_below_highest_ends_the_run() {
    let mut manager = ChunkManager::new(ClimbTuning::default(), 5);

    manager.update(700.0);
    manager.update(1300.0);
    manager.update(1900.0);
    assert_eq!(manager.highest_chunk(), 3);

    let one_below = manager.update(1300.0);
    assert!(!one_below.fell_below_safety);

    let two_below = manager.update(700.0);
    assert!(two_below.fell_below_safety);
}

#[test]
fn test_negative_height_never_generates_negative_chunks() {
    let mut manager = ChunkManager::new(ClimbTuning::default(), 5);

    let update = manager.update(-50.0);

    assert_eq!(update.player_chunk, -1);
    assert_eq!(manager.loaded_indices(), vec![0]);
    assert!(manager.chunk(-1).is_none());
    assert!(!manager.active_geometry().is_empty());
}

#[test]
fn test_reset_rebuilds_from_new_seed() {
    let mut manager = ChunkManager::new(ClimbTuning::default(), 5);
    manager.update(1900.0);
    let revision = manager.revision();

    manager.reset(6);

    assert_eq!(manager.seed(), 6);
    assert_eq!(manager.loaded_indices(), vec![0, 1]);
    assert_eq!(manager.highest_chunk(), 0);
    assert!(manager.revision() > revision);
}
