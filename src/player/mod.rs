//! Player module - player entity, input, movement and attacks.

mod attack;
mod components;
mod movement;
mod plugin;

pub use attack::{begin_player_attack, resolve_player_swings, restart_after_death};
pub use components::*;
pub use movement::{player_input, player_locomotion, spawn_player, spawn_player_camera, PlayerCamera};
pub use plugin::PlayerPlugin;
