//! Attack sequencing and damage resolution rules.
//!
//! These are plain functions over components so the systems stay thin and
//! the rules can be tested without a running app.

use bevy::prelude::*;
use serde::Deserialize;

use super::components::{AttackProfile, CombatState, Health, Revive};
use crate::animation::AnimTrigger;
use crate::core::{DeferredAction, DeferredCallback, Incarnation, Scheduler};

/// Which attack animation each attack in a sequence uses.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ComboPolicy {
    /// Always the same attack.
    #[default]
    Single,
    /// Attack1, Attack2, Attack1, Attack2, ...
    Alternate,
    /// `every - 1` light attacks followed by one heavy attack, then repeat.
    Finisher { every: u32 },
}

impl ComboPolicy {
    /// Advance the combo counter and pick the trigger for this attack.
    pub fn next_trigger(self, state: &mut CombatState) -> AnimTrigger {
        state.combo_count += 1;

        match self {
            ComboPolicy::Single => AnimTrigger::Attack,
            ComboPolicy::Alternate => {
                if state.combo_count % 2 == 1 {
                    AnimTrigger::Attack1
                } else {
                    AnimTrigger::Attack2
                }
            }
            ComboPolicy::Finisher { every } => {
                if state.combo_count >= every.max(1) {
                    state.combo_count = 0;
                    AnimTrigger::Attack2
                } else {
                    AnimTrigger::Attack1
                }
            }
        }
    }
}

/// Start an attack if the cooldown and recovery allow it.
///
/// Schedules `hit` after the windup and a recovery callback after the
/// recovery time. Returns the animation trigger to fire, or `None` if the
/// attack could not start.
#[allow(clippy::too_many_arguments)]
pub fn initiate_attack(
    entity: Entity,
    now: f32,
    profile: &AttackProfile,
    combo: ComboPolicy,
    state: &mut CombatState,
    incarnation: &Incarnation,
    hit: DeferredAction,
    scheduler: &mut Scheduler,
) -> Option<AnimTrigger> {
    if !state.can_attack(now, profile.cooldown) {
        return None;
    }

    state.begin_attack(now);
    let trigger = combo.next_trigger(state);

    scheduler.schedule(
        now,
        profile.windup,
        DeferredCallback::new(entity, incarnation.0, hit),
    );
    scheduler.schedule(
        now,
        profile.recovery,
        DeferredCallback::new(entity, incarnation.0, DeferredAction::Recover),
    );

    Some(trigger)
}

/// Result of a single hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead or getting back up; nothing changed.
    Ignored,
    /// Took damage and survived.
    Hurt,
    /// Lethal hit, but a revive is available.
    Downed,
    /// Lethal hit with no revive left.
    Killed,
}

/// Apply `amount` damage. `incapacitated` is true while the actor is dead or
/// reviving, in which case nothing happens.
pub fn take_damage(
    health: &mut Health,
    revive: Option<&Revive>,
    incapacitated: bool,
    amount: i32,
) -> DamageOutcome {
    if incapacitated || health.is_dead() {
        return DamageOutcome::Ignored;
    }

    health.take_damage(amount);
    if !health.is_dead() {
        return DamageOutcome::Hurt;
    }

    if revive.is_some_and(Revive::available) {
        DamageOutcome::Downed
    } else {
        DamageOutcome::Killed
    }
}
