//! Sprite sync systems for surfaces, the player, and the camera.

use bevy::prelude::*;

use crate::chunks::ChunkManager;
use crate::content::ClimbTuning;
use crate::movement::{Facing, MovementState, PLAYER_COLOR, Player, PlayerBody};
use crate::sprites::layers::{DrawLayer, surface_color, surface_layer};
use crate::sprites::pieces::surface_pieces;

/// How far above the player the camera centres.
pub const CAMERA_LEAD: f32 = 120.0;
/// Exponential follow rate, per second.
pub const CAMERA_FOLLOW_RATE: f32 = 6.0;

/// Marker for sprites drawn from the active geometry.
#[derive(Component)]
pub struct SurfaceSprite;

/// Camera height for a player centred at `player_y`, never looking below
/// the first chunk's middle.
pub fn camera_target(player_y: f32, tuning: &ClimbTuning) -> f32 {
    (player_y + CAMERA_LEAD).max(tuning.world.chunk_height * 0.5)
}

/// Respawn surface sprites whenever the loaded window changes.
pub(crate) fn rebuild_surface_sprites(
    mut commands: Commands,
    chunks: Res<ChunkManager>,
    existing: Query<Entity, With<SurfaceSprite>>,
    mut drawn_revision: Local<Option<u64>>,
) {
    if *drawn_revision == Some(chunks.revision()) {
        return;
    }
    *drawn_revision = Some(chunks.revision());

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let mut count = 0;
    for piece in chunks.active_geometry().iter().flat_map(surface_pieces) {
        commands.spawn((
            SurfaceSprite,
            Sprite {
                color: surface_color(piece.kind),
                custom_size: Some(piece.size),
                ..default()
            },
            Transform::from_translation(piece.center.extend(surface_layer(piece.kind).z()))
                .with_rotation(Quat::from_rotation_z(piece.angle)),
        ));
        count += 1;
    }
    debug!(
        "Rebuilt {} surface sprites for revision {}",
        count,
        chunks.revision()
    );
}

pub(crate) fn sync_player_sprite(
    tuning: Res<ClimbTuning>,
    mut query: Query<(&PlayerBody, &MovementState, &mut Transform, &mut Sprite), With<Player>>,
) {
    for (body, state, mut transform, mut sprite) in &mut query {
        transform.translation = body.center().extend(DrawLayer::Player.z());
        sprite.flip_x = state.facing == Facing::Left;

        let base = PLAYER_COLOR.to_srgba();
        let charge = state.charge_fraction(tuning.jump.max_charge);
        // Charging brightens toward white; stun dims
        let dim = if state.is_stunned() { 0.6 } else { 1.0 };
        sprite.color = Color::srgb(
            (base.red + (1.0 - base.red) * charge * 0.6) * dim,
            (base.green + (1.0 - base.green) * charge * 0.6) * dim,
            (base.blue + (1.0 - base.blue) * charge * 0.6) * dim,
        );
    }
}

pub(crate) fn follow_player(
    time: Res<Time>,
    tuning: Res<ClimbTuning>,
    player_query: Query<&PlayerBody, With<Player>>,
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let Ok(body) = player_query.single() else {
        return;
    };
    let target = camera_target(body.center().y, &tuning);
    let blend = 1.0 - (-CAMERA_FOLLOW_RATE * time.delta_secs()).exp();

    for mut transform in &mut camera_query {
        transform.translation.x = tuning.world.width * 0.5;
        transform.translation.y += (target - transform.translation.y) * blend;
    }
}

/// Jump the camera to the spawn point at the start of a run.
pub(crate) fn snap_camera(
    tuning: Res<ClimbTuning>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let spawn_center = tuning.world.ground_height + tuning.world.player_height * 0.5;
    for mut transform in &mut camera_query {
        transform.translation.x = tuning.world.width * 0.5;
        transform.translation.y = camera_target(spawn_center, &tuning);
    }
}
