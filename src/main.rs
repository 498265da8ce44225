mod combat;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod movement;
mod session;
mod sound;
mod sprites;
mod ui;
mod web;
mod world;

use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Web Swing".to_string(),
            resolution: (1360, 1024).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    // CorePlugin loads GameConfig, which SpritesPlugin reads at build time
    .add_plugins(core::CorePlugin)
    .add_plugins((
        sprites::SpritesPlugin,
        world::WorldPlugin,
        session::SessionPlugin,
        combat::CombatPlugin,
        web::WebPlugin,
        ui::UiPlugin,
        sound::SoundPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
