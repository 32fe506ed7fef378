//! Tilebound - Entry Point
//!
//! Controls:
//! - Arrow keys: Move
//! - Space: Attack
//! - Left Ctrl: Cast spell
//! - Q / E: Switch weapon / spell
//! - Escape: Pause/Unpause

use bevy::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins; kira handles audio instead of bevy_audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Tilebound".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest())
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Our game plugin
        .add_plugins(tilebound::TileboundPlugin)

        .run();
}
