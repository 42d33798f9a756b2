//! Validation of tuning values that physics and generation both depend on.

use super::data::ClimbTuning;

/// A tuning value that breaks an assumption of the simulation or generator.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningIssue {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for TuningIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

macro_rules! check {
    ($issues:expr, $cond:expr, $field:expr, $($msg:tt)+) => {
        if !$cond {
            $issues.push(TuningIssue {
                field: $field,
                message: format!($($msg)+),
            });
        }
    };
}

fn check_fraction_range(
    issues: &mut Vec<TuningIssue>,
    field: &'static str,
    min: f32,
    max: f32,
) {
    check!(
        issues,
        min > 0.0 && min <= max && max <= 1.0,
        field,
        "range [{}, {}] must satisfy 0 < min <= max <= 1",
        min,
        max
    );
}

/// Validate a tuning set. Returns an empty list when everything is consistent.
pub fn validate_tuning(tuning: &ClimbTuning) -> Vec<TuningIssue> {
    let mut issues = Vec::new();
    let body = &tuning.body;
    let jump = &tuning.jump;
    let world = &tuning.world;
    let generator = &tuning.generator;

    // Body
    check!(issues, body.accel > 0.0, "body.accel", "must be positive, got {}", body.accel);
    check!(
        issues,
        body.max_speed > 0.0,
        "body.max_speed",
        "must be positive, got {}",
        body.max_speed
    );
    check!(
        issues,
        body.friction >= 0.0,
        "body.friction",
        "must not be negative, got {}",
        body.friction
    );
    check!(
        issues,
        body.gravity < 0.0,
        "body.gravity",
        "must pull downward (negative), got {}",
        body.gravity
    );

    // Jump
    check!(
        issues,
        jump.max_charge > 0.0 && jump.charge_rate > 0.0,
        "jump.max_charge",
        "charge and charge rate must be positive"
    );

    // A fall step must never travel further than the landing band can catch
    let step = world.step();
    check!(
        issues,
        jump.detection_zone >= body.max_fall_speed * step,
        "jump.detection_zone",
        "{} is smaller than one step at max fall speed ({})",
        jump.detection_zone,
        body.max_fall_speed * step
    );

    // World
    check!(
        issues,
        world.width > world.player_width,
        "world.width",
        "must be wider than the player"
    );
    check!(
        issues,
        world.chunk_height > 0.0,
        "world.chunk_height",
        "must be positive, got {}",
        world.chunk_height
    );
    check!(
        issues,
        world.fixed_hz > 0.0,
        "world.fixed_hz",
        "must be positive, got {}",
        world.fixed_hz
    );
    check!(
        issues,
        world.ground_height > 0.0,
        "world.ground_height",
        "must be positive, got {}",
        world.ground_height
    );

    // Generator
    check!(
        issues,
        (1..=2).contains(&generator.paths),
        "generator.paths",
        "supports one or two paths, got {}",
        generator.paths
    );
    check_fraction_range(
        &mut issues,
        "generator.vertical_gap",
        generator.vertical_gap_min,
        generator.vertical_gap_max,
    );
    check_fraction_range(
        &mut issues,
        "generator.horizontal",
        generator.horizontal_min,
        generator.horizontal_max,
    );
    check!(
        issues,
        generator.platform_width_min > 0.0
            && generator.platform_width_min <= generator.platform_width_max,
        "generator.platform_width",
        "width range must be positive and ordered"
    );
    check!(
        issues,
        generator.decoy_width_min > 0.0 && generator.decoy_width_min <= generator.decoy_width_max,
        "generator.decoy_width",
        "width range must be positive and ordered"
    );
    check!(
        issues,
        generator.hole_width_min > 0.0
            && generator.hole_width_min <= generator.hole_width_max
            && generator.hole_width_max + world.player_width <= generator.decoy_width_min,
        "generator.hole_width",
        "holes must leave a standable strip on a decoy"
    );
    check!(
        issues,
        (0.0..=1.0).contains(&generator.hole_chance),
        "generator.hole_chance",
        "must be a probability, got {}",
        generator.hole_chance
    );
    check!(
        issues,
        generator.platform_width_min >= world.player_width,
        "generator.platform_width",
        "platforms narrower than the player ({}) cannot be stood on",
        world.player_width
    );
    // Sampled as symmetric ranges or used as paddings
    for (field, value) in [
        ("generator.slope_max", generator.slope_max),
        ("generator.overlap_padding", generator.overlap_padding),
        ("generator.headroom_clearance", generator.headroom_clearance),
        ("generator.platform_thickness", generator.platform_thickness),
    ] {
        check!(issues, value >= 0.0, field, "must not be negative, got {}", value);
    }
    check!(
        issues,
        generator.edge_margin * 2.0 < world.width,
        "generator.edge_margin",
        "leaves no room for platform centres"
    );
    if generator.paths == 2 {
        let separation = generator.platform_width_max
            + world.player_width
            + 4.0
            + generator.overlap_padding;
        let lane_width = (world.width - generator.edge_margin * 2.0 - separation) * 0.5;
        check!(
            issues,
            lane_width >= generator.platform_width_max,
            "generator.paths",
            "world too narrow for two separated lanes (lane width {})",
            lane_width
        );
    }
    check!(
        issues,
        generator.max_iterations > 0,
        "generator.max_iterations",
        "must allow at least one candidate"
    );

    // The steepest path platform must still sit under the jump apex
    let highest_landing =
        tuning.max_jump_height() * generator.vertical_gap_max + generator.slope_max * 0.5;
    check!(
        issues,
        highest_landing < tuning.max_jump_height(),
        "generator.vertical_gap_max",
        "highest landing {} is above the jump apex {}",
        highest_landing,
        tuning.max_jump_height()
    );

    issues
}
