//! UI module - menus and HUD.

mod hud;
mod plugin;

pub use hud::{EnemyCounter, HealthBar, HudRoot};
pub use plugin::UiPlugin;
