//! UI domain: pause overlay with resume and exit buttons.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::{ClimbProgress, PauseState};

/// Marker for the pause overlay
#[derive(Component)]
pub struct PauseUI;

/// What a pause overlay button does when pressed
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseButton {
    Resume,
    Exit,
}

impl PauseButton {
    fn label(self) -> &'static str {
        match self {
            PauseButton::Resume => "RESUME",
            PauseButton::Exit => "EXIT",
        }
    }
}

pub(crate) fn spawn_pause_screen(mut commands: Commands, progress: Res<ClimbProgress>) {
    commands
        .spawn((
            PauseUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.8, 0.8, 0.8, 0.35)),
            ZIndex(90),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.95, 0.95)),
            ));

            parent.spawn((
                Text::new(format!("Height {:.0}", progress.height)),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.2, 0.2, 0.25)),
                Node {
                    margin: UiRect::bottom(Val::Px(24.0)),
                    ..default()
                },
            ));

            for button in [PauseButton::Resume, PauseButton::Exit] {
                parent
                    .spawn((
                        button,
                        Button,
                        Node {
                            width: Val::Px(220.0),
                            justify_content: JustifyContent::Center,
                            padding: UiRect::axes(Val::Px(24.0), Val::Px(12.0)),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.2, 0.2, 0.25)),
                        BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                    ))
                    .with_child((
                        Text::new(button.label()),
                        TextFont {
                            font_size: 26.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.9, 0.9)),
                    ));
            }

            parent.spawn((
                Text::new("Press [Esc] to resume"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.3, 0.3, 0.35)),
            ));
        });
}

pub(crate) fn handle_pause_buttons(
    button_query: Query<(&Interaction, &PauseButton), Changed<Interaction>>,
    mut next_pause: ResMut<NextState<PauseState>>,
    mut exit: MessageWriter<AppExit>,
) {
    for (interaction, button) in &button_query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            PauseButton::Resume => next_pause.set(PauseState::Running),
            PauseButton::Exit => {
                info!("Exit requested from pause menu");
                exit.write(AppExit::Success);
            }
        }
    }
}

pub(crate) fn despawn_pause_screen(
    mut commands: Commands,
    screen_query: Query<Entity, With<PauseUI>>,
) {
    for entity in &screen_query {
        commands.entity(entity).despawn();
    }
}
