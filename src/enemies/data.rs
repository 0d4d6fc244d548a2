//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::{FlightPath, LedgeProbe, Locomotion, PatrolRoute};
use crate::combat::{AttackProfile, ComboPolicy, Revive};
use crate::world::load_ron_file;

/// How an enemy type moves, as written in its definition file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub enum MovementDefinition {
    Walker {
        patrol_distance: f32,
        walk_speed: f32,
        #[serde(default)]
        chase_speed: f32,
        #[serde(default)]
        ledge_probe: Option<LedgeProbe>,
    },
    Flier {
        orbit_radius: f32,
        orbit_speed: f32,
        chase_speed: f32,
        hover_height: f32,
        stop_distance: f32,
    },
}

impl MovementDefinition {
    /// Build runtime locomotion for an enemy spawned at `spawn`.
    pub fn locomotion(&self, spawn: Vec2) -> Locomotion {
        match *self {
            MovementDefinition::Walker {
                patrol_distance,
                walk_speed,
                chase_speed,
                ledge_probe,
            } => Locomotion::Walker(PatrolRoute {
                walk_speed,
                chase_speed,
                ledge_probe,
                ..PatrolRoute::around(spawn.x, patrol_distance)
            }),
            MovementDefinition::Flier {
                orbit_radius,
                orbit_speed,
                chase_speed,
                hover_height,
                stop_distance,
            } => Locomotion::Flier(FlightPath {
                anchor: spawn,
                angle: 0.0,
                orbit_speed,
                // Flattened ellipse, half as tall as it is wide
                orbit_radius: Vec2::new(orbit_radius, orbit_radius * 0.5),
                chase_speed,
                hover_height,
                stop_distance,
            }),
        }
    }
}

/// Placeholder body drawn for an enemy type.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct BodyConfig {
    pub size: (f32, f32),
    pub color: (f32, f32, f32),
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            size: (0.8, 1.0),
            color: (0.8, 0.2, 0.2),
        }
    }
}

fn default_corpse_lifetime() -> f32 {
    2.0
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: i32,
    pub detect_range: f32,
    pub attack: AttackProfile,
    #[serde(default)]
    pub combo: ComboPolicy,
    pub movement: MovementDefinition,
    #[serde(default)]
    pub revive: Option<Revive>,
    #[serde(default = "default_corpse_lifetime")]
    pub corpse_lifetime: f32,
    /// Whether the sprite art is drawn facing left
    #[serde(default)]
    pub faces_left_by_default: bool,
    #[serde(default)]
    pub body: BodyConfig,
}

impl EnemyDefinition {
    /// Ground patroller: walks its route, holds ground and swings when the
    /// player comes close, heavier swing every third attack.
    pub fn patrol() -> Self {
        Self {
            name: "Patroller".to_string(),
            max_health: 3,
            detect_range: 3.0,
            attack: AttackProfile {
                damage: 1,
                range: 1.5,
                cooldown: 1.5,
                windup: 0.3,
                recovery: 0.5,
                reach_tolerance: 1.5,
            },
            combo: ComboPolicy::Finisher { every: 3 },
            movement: MovementDefinition::Walker {
                patrol_distance: 3.0,
                walk_speed: 2.0,
                chase_speed: 0.0,
                ledge_probe: Some(LedgeProbe {
                    offset: 0.5,
                    distance: 3.0,
                }),
            },
            revive: None,
            corpse_lifetime: 2.0,
            faces_left_by_default: false,
            body: BodyConfig {
                size: (0.8, 1.0),
                color: (0.75, 0.3, 0.25),
            },
        }
    }

    /// Flier: circles its spawn point and dives at the player with
    /// alternating attacks.
    pub fn bat() -> Self {
        Self {
            name: "Bat".to_string(),
            max_health: 2,
            detect_range: 5.0,
            attack: AttackProfile {
                damage: 1,
                range: 2.0,
                cooldown: 1.5,
                windup: 0.3,
                recovery: 0.5,
                reach_tolerance: 1.5,
            },
            combo: ComboPolicy::Alternate,
            movement: MovementDefinition::Flier {
                orbit_radius: 2.0,
                orbit_speed: 2.0,
                chase_speed: 3.0,
                hover_height: 1.5,
                stop_distance: 1.5,
            },
            revive: None,
            corpse_lifetime: 1.5,
            faces_left_by_default: true,
            body: BodyConfig {
                size: (0.6, 0.4),
                color: (0.45, 0.25, 0.55),
            },
        }
    }

    /// Heavy walker: chases along its platform, slow hits, gets back up
    /// once after being killed.
    pub fn golem() -> Self {
        Self {
            name: "Golem".to_string(),
            max_health: 5,
            detect_range: 4.0,
            attack: AttackProfile {
                damage: 2,
                range: 1.8,
                cooldown: 2.0,
                windup: 0.5,
                recovery: 1.0,
                reach_tolerance: 1.3,
            },
            combo: ComboPolicy::Single,
            movement: MovementDefinition::Walker {
                patrol_distance: 4.0,
                walk_speed: 1.5,
                chase_speed: 2.5,
                ledge_probe: Some(LedgeProbe {
                    offset: 0.8,
                    distance: 2.0,
                }),
            },
            revive: Some(Revive {
                remaining: 1,
                delay: 2.0,
                rise_duration: 1.0,
                health_after: 3,
            }),
            corpse_lifetime: 2.0,
            faces_left_by_default: false,
            body: BodyConfig {
                size: (1.2, 1.6),
                color: (0.5, 0.5, 0.45),
            },
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl Default for EnemyRegistry {
    /// Registry seeded with the built-in enemy types. Definition files with
    /// the same name replace them.
    fn default() -> Self {
        let definitions = [
            ("patrol", EnemyDefinition::patrol()),
            ("bat", EnemyDefinition::bat()),
            ("golem", EnemyDefinition::golem()),
        ]
        .into_iter()
        .map(|(key, definition)| (key.to_string(), definition))
        .collect();

        Self { definitions }
    }
}

impl EnemyRegistry {
    /// Get an enemy definition by type name.
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    pub fn insert(&mut self, enemy_type: impl Into<String>, definition: EnemyDefinition) {
        self.definitions.insert(enemy_type.into(), definition);
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new("assets/data/enemies");

    if !enemies_dir.exists() {
        warn!(
            "Enemy definitions directory not found: {:?}, using built-in enemies",
            enemies_dir
        );
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }
        let Some(enemy_type) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
        else {
            continue;
        };

        match load_ron_file::<EnemyDefinition>(&path) {
            Ok(definition) => {
                if definition.revive.is_some_and(|r| r.health_after < 1) {
                    warn!(
                        "{}: revive health_after below 1, reviving with 1 health instead",
                        enemy_type
                    );
                }
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                registry.insert(enemy_type, definition);
            }
            Err(e) => error!("{}", e),
        }
    }

    info!("{} enemy definitions available", registry.definitions.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let registry = EnemyRegistry::default();
        assert_eq!(registry.get("patrol"), Some(&EnemyDefinition::patrol()));
        assert_eq!(registry.get("bat"), Some(&EnemyDefinition::bat()));
        assert!(registry.get("golem").is_some_and(|d| d.revive.is_some()));
        assert!(registry.get("dragon").is_none());
    }

    #[test]
    fn parses_walker_definition() {
        let source = r#"
            (
                name: "Sentry",
                max_health: 4,
                detect_range: 3.5,
                attack: (damage: 1, range: 1.2, cooldown: 1.0, windup: 0.2, recovery: 0.4),
                combo: Finisher(every: 2),
                movement: Walker(
                    patrol_distance: 2.0,
                    walk_speed: 1.0,
                    ledge_probe: Some((offset: 0.5, distance: 2.0)),
                ),
            )
        "#;

        let definition: EnemyDefinition = ron::from_str(source).unwrap();
        assert_eq!(definition.combo, ComboPolicy::Finisher { every: 2 });
        assert_eq!(definition.attack.reach_tolerance, 1.0);
        assert_eq!(definition.corpse_lifetime, 2.0);
        assert!(definition.revive.is_none());

        let Locomotion::Walker(route) = definition.movement.locomotion(Vec2::new(10.0, 0.0)) else {
            panic!("expected a walker");
        };
        assert_eq!(route.left_limit, 8.0);
        assert_eq!(route.right_limit, 12.0);
        assert_eq!(route.chase_speed, 0.0);
    }

    #[test]
    fn parses_revive_block() {
        let source = r#"
            (
                name: "Brute",
                max_health: 6,
                detect_range: 4.0,
                attack: (damage: 2, range: 1.8, cooldown: 2.0, windup: 0.5, recovery: 1.0),
                movement: Flier(
                    orbit_radius: 1.0,
                    orbit_speed: 1.0,
                    chase_speed: 2.0,
                    hover_height: 1.0,
                    stop_distance: 1.0,
                ),
                revive: Some((count: 2, delay: 1.0, health_after: 2)),
            )
        "#;

        let definition: EnemyDefinition = ron::from_str(source).unwrap();
        let revive = definition.revive.unwrap();
        assert_eq!(revive.remaining, 2);
        assert_eq!(revive.rise_duration, 1.0);
        assert_eq!(definition.combo, ComboPolicy::Single);
    }

    #[test]
    fn flier_orbit_is_flattened() {
        let Locomotion::Flier(path) = EnemyDefinition::bat().movement.locomotion(Vec2::ONE) else {
            panic!("expected a flier");
        };
        assert_eq!(path.anchor, Vec2::ONE);
        assert_eq!(path.orbit_radius, Vec2::new(2.0, 1.0));
    }
}
