//! Ledgewalker - Entry Point
//!
//! Controls:
//! - A/D or arrows: Move
//! - W, Up or Space: Jump
//! - Left mouse or J: Attack
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ledgewalker".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics, in meters
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Our game plugin
        .add_plugins(ledgewalker::LedgewalkerPlugin)

        .run();
}
