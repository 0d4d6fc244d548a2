//! Animation module - named signals sent to whatever plays animations.
//!
//! Gameplay code never waits on an animation. It fires triggers and flags
//! and moves on; timing lives in the deferred scheduler instead.

mod components;
mod plugin;

pub use components::*;
pub use plugin::AnimationPlugin;
