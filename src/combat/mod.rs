//! Combat module - attack sequencing, damage, death and revive.

mod components;
mod plugin;
mod resolution;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use resolution::{initiate_attack, take_damage, ComboPolicy, DamageOutcome};
