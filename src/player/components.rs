//! Player-related components.

use bevy::prelude::*;
use serde::{Deserialize, Deserializer};

use crate::combat::AttackProfile;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// What the player wants to do this tick, filled in from input.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerIntent {
    /// -1.0 left, 0.0 idle, +1.0 right
    pub move_x: f32,
    pub jump: bool,
}

/// Sent when the player presses the attack button.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRequested {
    pub entity: Entity,
}

/// Player tuning, loaded from `assets/data/player.ron` when present.
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal speed in units per second
    pub move_speed: f32,
    /// Upward velocity applied on jump
    pub jump_speed: f32,
    pub max_health: i32,
    /// Any field left out keeps the player's default swing
    #[serde(deserialize_with = "swing_over_defaults")]
    pub attack: AttackProfile,
    /// Distance in front of the body where the swing is centered
    pub attack_offset: f32,
    /// Body size (width, height)
    pub size: (f32, f32),
    /// Delay between dying and the level restarting
    pub restart_delay: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_speed: 7.0,
            max_health: 5,
            attack: PlayerSwing::default().into(),
            attack_offset: 0.75,
            size: (0.8, 1.4),
            restart_delay: 2.0,
        }
    }
}

/// The player's attack as written in `player.ron`, every field optional.
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
struct PlayerSwing {
    damage: i32,
    range: f32,
    cooldown: f32,
    windup: f32,
    recovery: f32,
    reach_tolerance: f32,
}

impl Default for PlayerSwing {
    fn default() -> Self {
        Self {
            damage: 1,
            range: 1.5,
            cooldown: 0.3,
            windup: 0.2,
            recovery: 0.3,
            reach_tolerance: 1.0,
        }
    }
}

impl From<PlayerSwing> for AttackProfile {
    fn from(swing: PlayerSwing) -> Self {
        Self {
            damage: swing.damage,
            range: swing.range,
            cooldown: swing.cooldown,
            windup: swing.windup,
            recovery: swing.recovery,
            reach_tolerance: swing.reach_tolerance,
        }
    }
}

fn swing_over_defaults<'de, D>(deserializer: D) -> Result<AttackProfile, D::Error>
where
    D: Deserializer<'de>,
{
    PlayerSwing::deserialize(deserializer).map(AttackProfile::from)
}

impl PlayerConfig {
    /// Center of the swing for a player at `position` facing `facing_sign`.
    pub fn attack_point(&self, position: Vec2, facing_sign: f32) -> Vec2 {
        position + Vec2::new(facing_sign * self.attack_offset, 0.0)
    }
}
