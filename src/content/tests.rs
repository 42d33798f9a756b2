//! Content domain: tests for tuning parsing, derived reach, and validation.

use super::{ClimbTuning, parse_tuning, validate_tuning};

// -----------------------------------------------------------------------------
// Derived reach tests
// -----------------------------------------------------------------------------

#[test]
fn test_max_jump_height_from_defaults() {
    let tuning = ClimbTuning::default();
    // 900² / (2 * 1800)
    assert!((tuning.max_jump_height() - 225.0).abs() < 1e-3);
}

#[test]
fn test_airtime_to_launch_height_is_full_arc() {
    let tuning = ClimbTuning::default();
    let t = tuning.airtime_to_height(0.0).unwrap();
    assert!((t - 1.0).abs() < 1e-4);
}

#[test]
fn test_airtime_above_apex_is_none() {
    let tuning = ClimbTuning::default();
    assert!(tuning.airtime_to_height(tuning.max_jump_height() + 1.0).is_none());
}

#[test]
fn test_horizontal_reach_accelerates_then_cruises() {
    let tuning = ClimbTuning::default();
    // 0.15s to reach 300 at 2000/s², covering 22.5 units
    assert!((tuning.horizontal_reach(0.1) - 10.0).abs() < 1e-3);
    assert!((tuning.horizontal_reach(1.0) - 277.5).abs() < 1e-3);
}

#[test]
fn test_max_jump_distance_shrinks_with_rise() {
    let tuning = ClimbTuning::default();
    let flat = tuning.max_jump_distance(0.0);
    let high = tuning.max_jump_distance(180.0);
    assert!(high < flat);
    assert!(high > 0.0);
    assert_eq!(tuning.max_jump_distance(1000.0), 0.0);
}

// -----------------------------------------------------------------------------
// Parsing tests
// -----------------------------------------------------------------------------

#[test]
fn test_parse_partial_tuning_keeps_defaults() {
    let tuning = parse_tuning("(world: (width: 960.0), jump: (max_charge: 1000.0))", "inline")
        .unwrap();

    assert_eq!(tuning.world.width, 960.0);
    assert_eq!(tuning.jump.max_charge, 1000.0);
    assert_eq!(tuning.world.chunk_height, 600.0);
    assert_eq!(tuning.body, ClimbTuning::default().body);
}

#[test]
fn test_parse_empty_struct_is_default() {
    let tuning = parse_tuning("()", "inline").unwrap();
    assert_eq!(tuning, ClimbTuning::default());
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_tuning("(world: (width: \"wide\"))", "tuning.ron").unwrap_err();
    assert_eq!(err.file, "tuning.ron");
    assert!(err.to_string().starts_with("Failed to load tuning.ron"));
}

#[test]
fn test_shipped_tuning_file_matches_defaults() {
    let contents = include_str!("../../assets/data/tuning.ron");
    let tuning = parse_tuning(contents, "tuning.ron").unwrap();
    assert_eq!(tuning, ClimbTuning::default());
}

// -----------------------------------------------------------------------------
// Validation tests
// -----------------------------------------------------------------------------

#[test]
fn test_default_tuning_is_valid() {
    let issues = validate_tuning(&ClimbTuning::default());
    assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
}

#[test]
fn test_upward_gravity_is_rejected() {
    let mut tuning = ClimbTuning::default();
    tuning.body.gravity = 1800.0;

    let issues = validate_tuning(&tuning);
    assert!(issues.iter().any(|i| i.field == "body.gravity"));
}

#[test]
fn test_fall_speed_beyond_detection_zone_is_rejected() {
    let mut tuning = ClimbTuning::default();
    tuning.body.max_fall_speed = 6000.0;

    let issues = validate_tuning(&tuning);
    assert!(issues.iter().any(|i| i.field == "jump.detection_zone"));
}

#[test]
fn test_inverted_gap_range_is_rejected() {
    let mut tuning = ClimbTuning::default();
    tuning.generator.vertical_gap_min = 0.9;
    tuning.generator.vertical_gap_max = 0.5;

    let issues = validate_tuning(&tuning);
    assert!(issues.iter().any(|i| i.field == "generator.vertical_gap"));
}

#[test]
fn test_unsupported_path_count_is_rejected() {
    let mut tuning = ClimbTuning::default();
    tuning.generator.paths = 3;

    let issues = validate_tuning(&tuning);
    assert!(issues.iter().any(|i| i.field == "generator.paths"));
}

#[test]
fn test_dual_path_needs_room_for_two_lanes() {
    let mut tuning = ClimbTuning::default();
    tuning.generator.paths = 2;
    assert!(validate_tuning(&tuning).is_empty());

    tuning.world.width = 500.0;
    let issues = validate_tuning(&tuning);
    assert!(issues.iter().any(|i| i.field == "generator.paths"));
}

#[test]
fn test_negative_slope_is_rejected() {
    let mut tuning = ClimbTuning::default();
    tuning.generator.slope_max = -5.0;

    let issues = validate_tuning(&tuning);
    assert!(issues.iter().any(|i| i.field == "generator.slope_max"));
}

#[test]
fn test_negative_paddings_and_thickness_are_rejected() {
    let cases: [(&str, fn(&mut ClimbTuning)); 3] = [
        ("generator.overlap_padding", |t| t.generator.overlap_padding = -1.0),
        ("generator.headroom_clearance", |t| t.generator.headroom_clearance = -1.0),
        ("generator.platform_thickness", |t| t.generator.platform_thickness = -1.0),
    ];

    for (field, corrupt) in cases {
        let mut tuning = ClimbTuning::default();
        corrupt(&mut tuning);

        let issues = validate_tuning(&tuning);
        assert!(issues.iter().any(|i| i.field == field), "{} accepted", field);
    }
}

#[test]
fn test_ground_must_have_height() {
    let mut tuning = ClimbTuning::default();
    tuning.world.ground_height = 0.0;

    let issues = validate_tuning(&tuning);
    assert!(issues.iter().any(|i| i.field == "world.ground_height"));
}

#[test]
fn test_inverted_hole_width_range_is_rejected() {
    let mut tuning = ClimbTuning::default();
    tuning.generator.hole_width_min = 60.0;
    tuning.generator.hole_width_max = 50.0;

    let issues = validate_tuning(&tuning);
    assert!(issues.iter().any(|i| i.field == "generator.hole_width"));
}
