//! Level construction from data definitions.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::data::{LevelDefinition, PlatformDef};
use crate::enemies::{spawn_enemy, EnemyRegistry};
use crate::player::{spawn_player, spawn_player_camera, PlayerConfig};
use crate::sensor::{ground_collision_groups, GroundSurfaces};

/// Marker for everything that belongs to the running level and is
/// despawned when it ends.
#[derive(Component)]
pub struct LevelEntity;

/// Build a level: platforms, the player with its camera, then the
/// enemies, all of which target the player. Returns the player entity.
pub fn build_level(
    commands: &mut Commands,
    level: &LevelDefinition,
    enemy_registry: &EnemyRegistry,
    player_config: &PlayerConfig,
) -> Entity {
    let (r, g, b) = level.background;
    commands.insert_resource(ClearColor(Color::srgb(r, g, b)));
    commands.insert_resource(GroundSurfaces::new(level.surfaces()));

    for platform in &level.platforms {
        spawn_platform(commands, platform);
    }

    let start = Vec2::new(level.player_start.0, level.player_start.1);
    let player = spawn_player(commands, start, player_config);
    let camera = spawn_player_camera(commands, player, start);
    commands.entity(player).insert(LevelEntity);
    commands.entity(camera).insert(LevelEntity);

    for spawn in &level.enemies {
        let Some(definition) = enemy_registry.get(&spawn.enemy_type) else {
            warn!(
                "Skipping unknown enemy type '{}' in level '{}'",
                spawn.enemy_type, level.name
            );
            continue;
        };

        let position = Vec2::new(spawn.position.0, spawn.position.1);
        let enemy = spawn_enemy(commands, &spawn.enemy_type, definition, position, Some(player));
        commands.entity(enemy).insert(LevelEntity);
    }

    info!(
        "Built level '{}': {} platforms, {} enemies",
        level.name,
        level.platforms.len(),
        level.enemies.len()
    );

    player
}

fn spawn_platform(commands: &mut Commands, platform: &PlatformDef) -> Entity {
    let rect = platform.rect();
    let size = rect.size();
    let (r, g, b) = platform.color;

    commands
        .spawn((
            LevelEntity,
            Sprite::from_color(Color::srgb(r, g, b), size),
            Transform::from_translation(rect.center().extend(0.0)),
            RigidBody::Fixed,
            Collider::cuboid(size.x * 0.5, size.y * 0.5),
            ground_collision_groups(),
            Name::new("Platform"),
        ))
        .id()
}
