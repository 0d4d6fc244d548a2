//! Player plugin - input, movement and attacks.

use bevy::prelude::*;
use std::path::Path;

use super::attack;
use super::components::*;
use super::movement;
use crate::core::GameplaySet;
use crate::world::{load_ron_file, DataLoadError};

/// Player plugin - handles player input, movement and attacks.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .add_event::<AttackRequested>()
            .add_systems(Startup, load_player_config)
            .add_systems(Update, movement::player_input.in_set(GameplaySet::Input))
            .add_systems(
                Update,
                (movement::player_locomotion, attack::begin_player_attack)
                    .in_set(GameplaySet::Think),
            )
            .add_systems(
                Update,
                (attack::resolve_player_swings, attack::restart_after_death)
                    .in_set(GameplaySet::Resolve),
            );
    }
}

/// Replace the default tuning with `assets/data/player.ron` if it exists.
fn load_player_config(mut config: ResMut<PlayerConfig>) {
    match load_ron_file::<PlayerConfig>(Path::new("assets/data/player.ron")) {
        Ok(loaded) => {
            info!("Loaded player config");
            *config = loaded;
        }
        Err(DataLoadError::FileNotFound(_)) => {
            info!("No player config file, using defaults");
        }
        Err(e) => error!("{}", e),
    }
}
