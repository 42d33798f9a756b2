//! UI domain: height readout and jump charge bar.

use bevy::prelude::*;

use crate::content::ClimbTuning;
use crate::core::ClimbProgress;
use crate::movement::{MovementState, Player};

pub(crate) const CHARGE_BAR_WIDTH: f32 = 200.0;
pub(crate) const CHARGE_BAR_HEIGHT: f32 = 14.0;
pub(crate) const HUD_PADDING: f32 = 16.0;

/// Marker for the HUD root container
#[derive(Component)]
pub struct ClimbHudUI;

/// Marker for the current/best height text
#[derive(Component)]
pub struct HeightText;

/// Marker for the charge bar fill element
#[derive(Component)]
pub struct ChargeBarFill;

pub(crate) fn spawn_climb_hud(mut commands: Commands) {
    commands
        .spawn((
            ClimbHudUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(HUD_PADDING),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                HeightText,
                Text::new("Height 0"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
            ));

            // Charge bar
            parent
                .spawn((
                    Node {
                        width: Val::Px(CHARGE_BAR_WIDTH),
                        height: Val::Px(CHARGE_BAR_HEIGHT),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
                    BorderColor::all(Color::srgb(0.3, 0.3, 0.3)),
                ))
                .with_child((
                    ChargeBarFill,
                    Node {
                        width: Val::Percent(0.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.3, 0.6, 0.9)),
                ));
        });
}

pub(crate) fn update_height_text(
    progress: Res<ClimbProgress>,
    mut text_query: Query<&mut Text, With<HeightText>>,
) {
    if !progress.is_changed() {
        return;
    }

    for mut text in &mut text_query {
        text.0 = format!(
            "Height {:.0}   Best {:.0}",
            progress.height.max(0.0),
            progress.best_height
        );
    }
}

pub(crate) fn update_charge_bar(
    tuning: Res<ClimbTuning>,
    player_query: Query<&MovementState, With<Player>>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<ChargeBarFill>>,
) {
    let Ok(state) = player_query.single() else {
        return;
    };

    let percent = state.charge_fraction(tuning.jump.max_charge);
    for (mut node, mut bg_color) in &mut fill_query {
        node.width = Val::Percent(percent * 100.0);

        // Blue -> orange as the charge fills
        bg_color.0 = Color::srgb(0.3 + percent * 0.65, 0.6, 0.9 - percent * 0.7);
    }
}
