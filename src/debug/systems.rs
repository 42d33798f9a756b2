//! Debug domain: hotkeys, gizmos and the info overlay.

use bevy::prelude::*;

use crate::chunks::ChunkManager;
use crate::content::ClimbTuning;
use crate::core::{GameState, RunConfig};
use crate::debug::outline::{aabb_outline, hole_outline, surface_outline};
use crate::debug::state::DebugState;
use crate::debug::ui::{DebugInfoOverlay, spawn_debug_info_overlay};
use crate::movement::{MovementState, PhysicsBody, Player, PlayerBody};

const SURFACE_COLOR: Color = Color::srgb(0.2, 0.9, 0.4);
const HOLE_COLOR: Color = Color::srgb(0.95, 0.25, 0.25);
const SEAM_COLOR: Color = Color::srgba(0.5, 0.5, 0.9, 0.6);
const ARC_COLOR: Color = Color::srgba(0.9, 0.8, 0.2, 0.5);
const SENSOR_COLOR: Color = Color::srgb(0.2, 0.8, 1.0);

/// Toggle gizmos with F1 or backtick key
pub(crate) fn toggle_debug_gizmos(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
) {
    if keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote) {
        debug_state.gizmos_visible = !debug_state.gizmos_visible;
        info!(
            "[DEBUG] Gizmos {}",
            if debug_state.gizmos_visible { "ON" } else { "OFF" }
        );
    }
}

/// Handle function-key shortcuts for debug toggles
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
) {
    // F2: jump arcs
    if keyboard.just_pressed(KeyCode::F2) {
        debug_state.show_arcs = !debug_state.show_arcs;
        let msg = if debug_state.show_arcs {
            "Jump arcs ON"
        } else {
            "Jump arcs OFF"
        };
        debug_state.set_message(msg, 2.0);
        info!("[DEBUG] {}", msg);
    }

    // F3: info overlay
    if keyboard.just_pressed(KeyCode::F3) {
        debug_state.show_info = !debug_state.show_info;
    }
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

pub(crate) fn draw_world_gizmos(
    mut gizmos: Gizmos,
    debug_state: Res<DebugState>,
    chunks: Res<ChunkManager>,
    tuning: Res<ClimbTuning>,
) {
    if !debug_state.gizmos_visible {
        return;
    }

    for surface in chunks.active_geometry() {
        for (a, b) in surface_outline(surface) {
            gizmos.line_2d(a, b, SURFACE_COLOR);
        }
        for (a, b) in hole_outline(surface) {
            gizmos.line_2d(a, b, HOLE_COLOR);
        }
    }

    let width = tuning.world.width;
    for chunk in chunks.loaded_chunks() {
        let y = chunk.y_start;
        gizmos.line_2d(Vec2::new(0.0, y), Vec2::new(width, y), SEAM_COLOR);

        if debug_state.show_arcs {
            for arc in &chunk.layout.envelopes {
                for (a, b) in aabb_outline(arc) {
                    gizmos.line_2d(a, b, ARC_COLOR);
                }
            }
        }
    }
}

pub(crate) fn draw_sensor_gizmos(
    mut gizmos: Gizmos,
    debug_state: Res<DebugState>,
    tuning: Res<ClimbTuning>,
    player_query: Query<&PlayerBody, With<Player>>,
) {
    if !debug_state.gizmos_visible {
        return;
    }

    for body in &player_query {
        let foot = body.foot_y();
        for x in body.sensor_xs(tuning.jump.sensor_inset) {
            gizmos.line_2d(Vec2::new(x, foot - 6.0), Vec2::new(x, foot + 6.0), SENSOR_COLOR);
        }
        for (a, b) in aabb_outline(&body.bounds()) {
            gizmos.line_2d(a, b, SENSOR_COLOR);
        }
    }
}

/// Update the debug info overlay with current player and chunk state
#[allow(clippy::too_many_arguments)]
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    run_config: Res<RunConfig>,
    game_state: Res<State<GameState>>,
    chunks: Res<ChunkManager>,
    player_query: Query<(&PlayerBody, &PhysicsBody, &MovementState), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some((pose, body, state)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        let status = debug_state
            .status_message
            .as_ref()
            .map_or("", |(message, _)| message.as_str());
        **text = format!(
            "Pos: ({:.0}, {:.0})\nVel: ({:.0}, {:.0})\nPhase: {:?}\nChunk: {} (highest {})\nLoaded: {:?}\nSeed: {}\nGenerated: {}\nState: {:?}\n{}",
            pose.position.x,
            pose.position.y,
            body.velocity.x,
            body.velocity.y,
            state.phase(),
            chunks.current_chunk(),
            chunks.highest_chunk(),
            chunks.loaded_indices(),
            run_config.seed,
            chunks.generated_count(),
            game_state.get(),
            status
        );
    }
}
