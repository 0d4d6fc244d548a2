//! Enemies module - enemy entities, AI, and spawning.

mod ai;
mod components;
pub mod data;
pub mod movement;
mod plugin;
mod spawning;

pub use ai::{ai_think, decide_state};
pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry, MovementDefinition};
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemy;
