//! World plugin - level loading, building and teardown.

use bevy::prelude::*;

use crate::core::{GameState, Scheduler};
use crate::enemies::EnemyRegistry;
use crate::player::PlayerConfig;
use crate::sensor::GroundSurfaces;

use super::builder::{build_level, LevelEntity};
use super::data::{load_level_definitions, CurrentLevel, LevelDefinition, LevelRegistry};

/// World plugin - handles level loading and world setup.
///
/// The level is built when play starts from the menu or restarts after
/// game over, and torn down when either of those screens is entered.
/// Pausing leaves it alone.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelRegistry>()
            .init_resource::<CurrentLevel>()
            .add_systems(Startup, load_level_definitions)
            .add_systems(
                OnTransition {
                    exited: GameState::MainMenu,
                    entered: GameState::InGame,
                },
                setup_level,
            )
            .add_systems(
                OnTransition {
                    exited: GameState::GameOver,
                    entered: GameState::InGame,
                },
                setup_level,
            )
            .add_systems(OnEnter(GameState::MainMenu), cleanup_level)
            .add_systems(OnEnter(GameState::GameOver), cleanup_level);
    }
}

/// Set up the current level from data, or the fallback level if it is
/// missing.
pub fn setup_level(
    mut commands: Commands,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    enemy_registry: Res<EnemyRegistry>,
    player_config: Res<PlayerConfig>,
) {
    let fallback;
    let level = match level_registry.get(&current_level.name) {
        Some(level) => level,
        None => {
            warn!(
                "Level '{}' not found, building the fallback level",
                current_level.name
            );
            fallback = LevelDefinition::fallback();
            &fallback
        }
    };

    if let Err(e) = level.validate(&enemy_registry) {
        warn!("{}", e);
    }

    build_level(&mut commands, level, &enemy_registry, &player_config);
}

/// Despawn the level and drop every pending deferred callback with it.
pub fn cleanup_level(
    mut commands: Commands,
    mut scheduler: ResMut<Scheduler>,
    level_query: Query<Entity, With<LevelEntity>>,
) {
    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    scheduler.clear();
    commands.remove_resource::<GroundSurfaces>();
}
