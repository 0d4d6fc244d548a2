//! Side-on player movement, input and spawning.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use crate::animation::{AnimFlag, AnimationSignal, Animator, PlaceholderTint, SpriteOrientation};
use crate::combat::{CombatState, CorpseLifetime, Dead, Health};
use crate::core::{Facing, Incarnation, SmoothFollow};
use crate::sensor::{player_collision_groups, GroundProbe, GroundSensor};

/// Marker for the gameplay camera.
#[derive(Component)]
pub struct PlayerCamera;

/// Gap checked below the feet when deciding whether the player can jump.
const GROUND_CHECK_DISTANCE: f32 = 0.1;

/// Read keyboard and mouse into the player's intent.
///
/// A/D or the arrow keys move, W, Up or Space jump, and the left mouse
/// button or J attacks.
pub fn player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut player_query: Query<(Entity, &mut PlayerIntent), (With<Player>, Without<Dead>)>,
    mut attacks: EventWriter<AttackRequested>,
) {
    let Ok((entity, mut intent)) = player_query.get_single_mut() else {
        return;
    };

    let mut move_x = 0.0;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        move_x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        move_x += 1.0;
    }

    intent.move_x = move_x;
    intent.jump = keyboard.any_just_pressed([KeyCode::KeyW, KeyCode::ArrowUp, KeyCode::Space]);

    if mouse.just_pressed(MouseButton::Left) || keyboard.just_pressed(KeyCode::KeyJ) {
        attacks.send(AttackRequested { entity });
    }
}

/// Apply the intent to the physics body: run, turn and jump when grounded.
pub fn player_locomotion(
    config: Res<PlayerConfig>,
    ground: GroundSensor,
    mut player_query: Query<
        (Entity, &Transform, &PlayerIntent, &mut Velocity, &mut Facing),
        (With<Player>, Without<Dead>),
    >,
    mut signals: EventWriter<AnimationSignal>,
) {
    let Ok((entity, transform, intent, mut velocity, mut facing)) = player_query.get_single_mut()
    else {
        return;
    };

    let feet = transform.translation.truncate() - Vec2::new(0.0, config.size.1 * 0.5);
    let grounded = ground
        .probe_ground(feet, Vec2::NEG_Y, GROUND_CHECK_DISTANCE)
        .is_some();

    velocity.linvel.x = intent.move_x * config.move_speed;
    if intent.move_x != 0.0 {
        let turned = Facing::from_sign(intent.move_x);
        if *facing != turned {
            *facing = turned;
        }
    }
    if intent.jump && grounded {
        velocity.linvel.y = config.jump_speed;
    }

    signals.send(AnimationSignal::flag(entity, AnimFlag::Running, intent.move_x != 0.0));
    signals.send(AnimationSignal::flag(entity, AnimFlag::Jumping, !grounded));
}

/// Spawn the player body at `position`.
pub fn spawn_player(commands: &mut Commands, position: Vec2, config: &PlayerConfig) -> Entity {
    let (width, height) = config.size;
    let color = Color::srgb(0.85, 0.85, 0.9);

    commands
        .spawn((
            (
                Player,
                PlayerIntent::default(),
                Health::new(config.max_health),
                config.attack,
                CombatState::default(),
                Incarnation::default(),
                CorpseLifetime(config.restart_delay),
            ),
            (
                Facing::Right,
                Animator::default(),
                SpriteOrientation::default(),
                PlaceholderTint::new(color),
                Sprite::from_color(color, Vec2::new(width, height)),
                Transform::from_translation(position.extend(2.0)),
            ),
            (
                RigidBody::Dynamic,
                Collider::cuboid(width * 0.5, height * 0.5),
                LockedAxes::ROTATION_LOCKED,
                Velocity::zero(),
                Friction::coefficient(0.0),
                player_collision_groups(),
            ),
            Name::new("Player"),
        ))
        .id()
}

/// Spawn the gameplay camera following `player`.
pub fn spawn_player_camera(commands: &mut Commands, player: Entity, position: Vec2) -> Entity {
    commands
        .spawn((
            Camera2d,
            OrthographicProjection {
                // Level units are meters; show roughly 27 x 15 of them at 720p
                scale: 1.0 / 48.0,
                ..OrthographicProjection::default_2d()
            },
            PlayerCamera,
            SmoothFollow::new(player, 4.0).with_offset(Vec2::new(0.0, 1.5)),
            Transform::from_translation(position.extend(10.0)),
        ))
        .id()
}
