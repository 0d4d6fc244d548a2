//! Core game module - states, events, scheduling, and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
mod facing;
mod plugin;
mod scheduler;
mod states;
mod tween;

pub use events::*;
pub use facing::Facing;
pub use plugin::{CorePlugin, GameplaySet};
pub use scheduler::*;
pub use states::*;
pub use tween::*;
