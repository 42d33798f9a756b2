//! Movement domain: fixed-step physics and player setup.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::chunks::ChunkManager;
use crate::content::ClimbTuning;
use crate::movement::{
    BonkedEvent, BouncedEvent, JumpedEvent, LandedEvent, MovementInput, MovementState,
    PhysicsBody, Player, PlayerBody, PlayerPhysicsProcessor,
};

pub(crate) const PLAYER_COLOR: Color = Color::srgb(0.95, 0.75, 0.3);

/// Replace any player from a previous run with a fresh one standing on the
/// middle of the ground slab.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<ClimbTuning>,
    existing: Query<Entity, With<Player>>,
    mut input: ResMut<MovementInput>,
) {
    for entity in &existing {
        commands.entity(entity).despawn();
    }
    *input = MovementInput::default();

    let world = &tuning.world;
    let size = Vec2::new(world.player_width, world.player_height);
    let position = Vec2::new((world.width - size.x) * 0.5, world.ground_height);
    let body = PlayerBody::new(position, size);

    commands.spawn((
        Player,
        body,
        PhysicsBody::new(&tuning.body),
        MovementState::grounded(),
        Sprite {
            color: PLAYER_COLOR,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(body.center().extend(10.0)),
    ));

    info!("Player spawned at ({:.0}, {:.0})", position.x, position.y);
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn step_player(
    time: Res<Time>,
    tuning: Res<ClimbTuning>,
    input: Res<MovementInput>,
    chunks: Res<ChunkManager>,
    mut query: Query<(&mut PlayerBody, &mut PhysicsBody, &mut MovementState), With<Player>>,
    mut jumped: MessageWriter<JumpedEvent>,
    mut landed: MessageWriter<LandedEvent>,
    mut bonked: MessageWriter<BonkedEvent>,
    mut bounced: MessageWriter<BouncedEvent>,
) {
    let dt = time.delta_secs();
    let processor = PlayerPhysicsProcessor::new(&tuning);

    for (mut pose, mut body, mut state) in &mut query {
        let report = processor.step(
            &mut pose,
            &mut body,
            &mut state,
            &input,
            chunks.active_geometry(),
            dt,
        );

        if let Some(launch_velocity) = report.jumped {
            jumped.write(JumpedEvent {
                launch_velocity,
                charge_fraction: launch_velocity / tuning.jump.max_charge,
            });
        }
        if report.landed {
            landed.write(LandedEvent {
                foot_y: pose.foot_y(),
            });
        }
        if report.bonked {
            bonked.write(BonkedEvent);
        }
        if report.wall_hit || report.edge_bounce {
            bounced.write(BouncedEvent {
                world_edge: report.edge_bounce,
            });
        }
    }
}
