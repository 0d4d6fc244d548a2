//! World module - levels and their construction.

mod builder;
mod data;
mod error;
mod plugin;

pub use builder::{build_level, LevelEntity};
pub use data::{
    load_ron_file, CurrentLevel, EnemySpawnDef, LevelDefinition, LevelRegistry, PlatformDef,
};
pub use error::DataLoadError;
pub use plugin::{cleanup_level, setup_level, WorldPlugin};
