//! UI domain: run-over overlay and restart button.

use bevy::prelude::*;

use crate::core::{ClimbProgress, GameState};

/// Marker for the run-over overlay
#[derive(Component)]
pub struct RunOverUI;

/// Marker for the restart button on the overlay
#[derive(Component)]
pub struct RestartButton;

pub(crate) fn spawn_run_over_screen(mut commands: Commands, progress: Res<ClimbProgress>) {
    commands
        .spawn((
            RunOverUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("YOU FELL"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.55, 0.2)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(format!(
                    "Best height {:.0}  (chunk {})",
                    progress.best_height, progress.highest_chunk
                )),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
                Node {
                    margin: UiRect::bottom(Val::Px(60.0)),
                    ..default()
                },
            ));

            parent
                .spawn((
                    RestartButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(40.0), Val::Px(16.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.2, 0.25)),
                    BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                ))
                .with_child((
                    Text::new("CLIMB AGAIN"),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.9)),
                ));

            parent.spawn((
                Text::new("Press [Enter] or [R] to restart"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 0.4, 0.45)),
                Node {
                    margin: UiRect::top(Val::Px(20.0)),
                    ..default()
                },
            ));
        });
}

pub(crate) fn handle_restart_button(
    button_query: Query<&Interaction, (With<RestartButton>, Changed<Interaction>)>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if button_query
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed)
    {
        game_state.set(GameState::Climbing);
    }
}

pub(crate) fn despawn_run_over_screen(
    mut commands: Commands,
    screen_query: Query<Entity, With<RunOverUI>>,
) {
    for entity in &screen_query {
        commands.entity(entity).despawn();
    }
}
