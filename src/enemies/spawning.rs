//! Enemy spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{AiState, Enemy, EnemyStats, EnemyType};
use super::data::EnemyDefinition;
use crate::animation::{Animator, PlaceholderTint, SpriteOrientation};
use crate::combat::{CombatState, CorpseLifetime, Health, Target};
use crate::core::{Facing, Incarnation};
use crate::sensor::enemy_collision_groups;

/// Spawn one enemy of the given type at `position`, attacking `target`.
pub fn spawn_enemy(
    commands: &mut Commands,
    enemy_type: &str,
    definition: &EnemyDefinition,
    position: Vec2,
    target: Option<Entity>,
) -> Entity {
    let (width, height) = definition.body.size;
    let (r, g, b) = definition.body.color;
    let color = Color::srgb(r, g, b);

    let mut entity = commands.spawn((
        (
            Enemy,
            EnemyType(enemy_type.to_string()),
            AiState::Patrol,
            EnemyStats {
                detect_range: definition.detect_range,
                combo: definition.combo,
            },
            definition.movement.locomotion(position),
        ),
        (
            Health::new(definition.max_health),
            definition.attack,
            CombatState::default(),
            Incarnation::default(),
            CorpseLifetime(definition.corpse_lifetime),
        ),
        (
            Facing::Right,
            Animator::default(),
            SpriteOrientation {
                faces_left_by_default: definition.faces_left_by_default,
            },
            PlaceholderTint::new(color),
            Sprite::from_color(color, Vec2::new(width, height)),
            Transform::from_translation(position.extend(1.0)),
        ),
        (
            RigidBody::KinematicPositionBased,
            Collider::cuboid(width * 0.5, height * 0.5),
            enemy_collision_groups(),
        ),
        Name::new(definition.name.clone()),
    ));

    if let Some(revive) = definition.revive {
        entity.insert(revive);
    }
    if let Some(target) = target {
        entity.insert(Target(target));
    }

    let id = entity.id();
    debug!("Spawned {} ({}) at {:?}", definition.name, enemy_type, position);
    id
}
