//! Combat-related components.

use bevy::prelude::*;
use serde::Deserialize;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DeathEvent, DownedEvent};

/// Component for entities that can take damage.
///
/// Health never leaves `0..=maximum`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub maximum: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            maximum: max,
        }
    }

    /// Remove up to `amount` health and return how much was actually removed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.current);
        self.current -= actual;
        actual
    }

    /// Bring a downed actor back with `value` health. Always at least 1, so
    /// the revived actor can be killed again.
    pub fn revive(&mut self, value: i32) {
        self.current = value.clamp(1, self.maximum);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.maximum as f32
    }
}

/// How an actor attacks: damage, reach and timing.
#[derive(Component, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct AttackProfile {
    pub damage: i32,
    /// Distance at which an attack is started
    pub range: f32,
    /// Minimum time between attack starts
    pub cooldown: f32,
    /// Delay from attack start to damage application
    pub windup: f32,
    /// Delay from attack start until the actor may attack again
    pub recovery: f32,
    /// Multiplier on `range` used when the windup lands
    #[serde(default = "default_reach_tolerance")]
    pub reach_tolerance: f32,
}

fn default_reach_tolerance() -> f32 {
    1.0
}

impl AttackProfile {
    /// Radius the target must still be inside when damage lands.
    pub fn reach(&self) -> f32 {
        self.range * self.reach_tolerance
    }
}

/// Attack bookkeeping for an entity (player or enemy).
#[derive(Component, Debug, Default, Clone, PartialEq)]
pub struct CombatState {
    /// Inside an attack's recovery window
    pub is_attacking: bool,
    /// Game time of the most recent attack start
    pub last_attack_time: Option<f32>,
    /// Counts attacks for combo selection
    pub combo_count: u32,
}

impl CombatState {
    /// An attack may start once the cooldown has elapsed and the previous
    /// attack has recovered.
    pub fn can_attack(&self, now: f32, cooldown: f32) -> bool {
        if self.is_attacking {
            return false;
        }
        self.last_attack_time
            .map_or(true, |last| now - last >= cooldown)
    }

    pub fn begin_attack(&mut self, now: f32) {
        self.is_attacking = true;
        self.last_attack_time = Some(now);
    }

    pub fn end_attack(&mut self) {
        self.is_attacking = false;
    }
}

/// Lets an actor get back up after a lethal hit.
#[derive(Component, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Revive {
    /// Revives left; at zero a lethal hit is final
    #[serde(rename = "count")]
    pub remaining: u32,
    /// Time spent lying down before starting to rise
    pub delay: f32,
    /// Time the rise takes before the actor is back in action
    #[serde(default = "default_rise_duration")]
    pub rise_duration: f32,
    /// Health after getting back up
    pub health_after: i32,
}

fn default_rise_duration() -> f32 {
    1.0
}

impl Revive {
    pub fn available(&self) -> bool {
        self.remaining > 0
    }
}

/// Delay between dying and being removed from the world.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CorpseLifetime(pub f32);

impl Default for CorpseLifetime {
    fn default() -> Self {
        Self(2.0)
    }
}

/// The entity this actor attacks. Injected at spawn time.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target(pub Entity);

/// Marker component for entities that have died for good.
#[derive(Component, Debug)]
pub struct Dead;
