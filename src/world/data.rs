//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;
use crate::enemies::EnemyRegistry;

/// Read and parse a RON file.
pub fn load_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(path.display().to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

fn default_platform_color() -> (f32, f32, f32) {
    (0.3, 0.32, 0.36)
}

fn default_background() -> (f32, f32, f32) {
    (0.06, 0.06, 0.09)
}

/// A solid, axis-aligned platform.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlatformDef {
    /// Bottom-left corner
    pub min: (f32, f32),
    /// Top-right corner
    pub max: (f32, f32),
    #[serde(default = "default_platform_color")]
    pub color: (f32, f32, f32),
}

impl PlatformDef {
    pub fn rect(&self) -> Rect {
        Rect::new(self.min.0, self.min.1, self.max.0, self.max.1)
    }
}

/// One enemy placed in a level.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EnemySpawnDef {
    /// Key into the enemy registry (the definition file stem)
    pub enemy_type: String,
    pub position: (f32, f32),
}

/// Complete level definition loaded from RON.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LevelDefinition {
    pub name: String,
    pub player_start: (f32, f32),
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawnDef>,
    #[serde(default = "default_background")]
    pub background: (f32, f32, f32),
}

impl LevelDefinition {
    /// Small fallback level with one of each built-in enemy.
    pub fn fallback() -> Self {
        let platform = |min, max| PlatformDef {
            min,
            max,
            color: default_platform_color(),
        };
        let spawn = |enemy_type: &str, position| EnemySpawnDef {
            enemy_type: enemy_type.to_string(),
            position,
        };

        Self {
            name: "Fallback".to_string(),
            player_start: (0.0, 1.0),
            platforms: vec![
                platform((-6.0, -1.0), (14.0, 0.0)),
                platform((17.0, -1.0), (32.0, 0.0)),
            ],
            enemies: vec![
                spawn("patrol", (9.0, 0.5)),
                spawn("bat", (20.0, 3.0)),
                spawn("golem", (26.0, 0.8)),
            ],
            background: default_background(),
        }
    }

    /// Check that every enemy type the level spawns is defined.
    pub fn validate(&self, enemies: &EnemyRegistry) -> Result<(), DataLoadError> {
        match self
            .enemies
            .iter()
            .find(|spawn| enemies.get(&spawn.enemy_type).is_none())
        {
            Some(spawn) => Err(DataLoadError::UnknownEnemy {
                level: self.name.clone(),
                enemy_type: spawn.enemy_type.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Platform rectangles, for ground probing.
    pub fn surfaces(&self) -> Vec<Rect> {
        self.platforms.iter().map(PlatformDef::rect).collect()
    }
}

/// Registry of all loaded levels.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }
}

/// The level to build when entering the game.
#[derive(Resource)]
pub struct CurrentLevel {
    pub name: String,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            name: "level_01".to_string(),
        }
    }
}

/// Load all level definitions from assets/data/levels/.
pub fn load_level_definitions(mut registry: ResMut<LevelRegistry>) {
    let levels_path = Path::new("assets/data/levels");

    match fs::read_dir(levels_path) {
        Ok(entries) => {
            for entry in entries.flatten() {
                let path = entry.path();
                if !path.extension().is_some_and(|ext| ext == "ron") {
                    continue;
                }
                let Some(level_name) = path.file_stem().map(|s| s.to_string_lossy().to_string())
                else {
                    continue;
                };

                match load_ron_file::<LevelDefinition>(&path) {
                    Ok(level) => {
                        info!("Loaded level: {} ({})", level.name, level_name);
                        registry.levels.insert(level_name, level);
                    }
                    Err(e) => error!("{}", e),
                }
            }
        }
        Err(_) => warn!("Levels directory not found: {:?}", levels_path),
    }

    info!("{} levels loaded", registry.levels.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level() {
        let source = r#"
            (
                name: "Test",
                player_start: (1.0, 2.0),
                platforms: [
                    (min: (-5.0, -1.0), max: (5.0, 0.0)),
                ],
                enemies: [
                    (enemy_type: "bat", position: (3.0, 2.0)),
                ],
            )
        "#;

        let level: LevelDefinition = ron::from_str(source).unwrap();
        assert_eq!(level.player_start, (1.0, 2.0));
        assert_eq!(level.surfaces(), vec![Rect::new(-5.0, -1.0, 5.0, 0.0)]);
        assert_eq!(level.enemies[0].enemy_type, "bat");
        assert_eq!(level.background, default_background());
    }

    #[test]
    fn fallback_level_uses_known_enemies() {
        assert!(LevelDefinition::fallback()
            .validate(&EnemyRegistry::default())
            .is_ok());
    }

    #[test]
    fn unknown_enemy_is_reported() {
        let mut level = LevelDefinition::fallback();
        level.enemies.push(EnemySpawnDef {
            enemy_type: "dragon".to_string(),
            position: (0.0, 0.0),
        });

        let err = level.validate(&EnemyRegistry::default()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::UnknownEnemy { ref enemy_type, .. } if enemy_type == "dragon"
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let result = load_ron_file::<LevelDefinition>(Path::new("does/not/exist.ron"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
    }
}
