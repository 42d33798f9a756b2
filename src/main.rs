mod audio;
mod chunks;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod movement;
mod sprites;
mod ui;

use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Girder Climb".to_string(),
            resolution: (800, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins((
        content::ContentPlugin::default(),
        core::CorePlugin::default(),
        chunks::ChunksPlugin,
        movement::MovementPlugin,
        audio::AudioCuePlugin,
        sprites::SpritesPlugin,
        ui::UiPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
