//! Global events used for cross-system communication.
//!
//! Attackers never touch a defender's health directly. They send a
//! `DamageEvent` and the damage system resolves it, so an actor hit by
//! several attackers in one tick is processed one hit at a time.

use bevy::prelude::*;

/// Sent when an entity should take damage.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage
    pub source: Entity,
    /// Health points to remove
    pub amount: i32,
}

/// Sent when an entity dies for good (no revives left).
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that landed the killing blow (if any)
    pub killed_by: Option<Entity>,
}

/// Sent when a lethal hit lands on an actor that still has a revive left.
#[derive(Event, Debug, Clone, Copy)]
pub struct DownedEvent {
    pub entity: Entity,
}
