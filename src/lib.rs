//! Ledgewalker - a 2D side-scroller with patrolling, flying and reviving
//! enemies, built on Bevy and Rapier.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, the deferred callback scheduler
//! - **Sensor**: Ground probing, range queries, collision layers
//! - **Animation**: Animation signals recorded on actors and sprite facing
//! - **Combat**: Health, attack sequencing, damage, death and revive
//! - **Enemies**: Enemy definitions, AI state machine, locomotion
//! - **Player**: Input, platforming movement, area attacks
//! - **World**: Level data, building and teardown
//! - **UI**: Menus and HUD

pub mod animation;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod sensor;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Gameplay plugins without any UI. Useful headless.
pub struct GameplayPlugins;

impl Plugin for GameplayPlugins {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            .add_plugins(animation::AnimationPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(enemies::EnemyPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(world::WorldPlugin);
    }
}

/// Main game plugin that adds all sub-plugins.
pub struct LedgewalkerPlugin;

impl Plugin for LedgewalkerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(GameplayPlugins).add_plugins(ui::UiPlugin);
    }
}
