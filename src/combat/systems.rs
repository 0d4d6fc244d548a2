//! Combat systems - windup hits, damage, death, revive and corpse removal.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::resolution::{take_damage, DamageOutcome};
use crate::animation::{AnimFlag, AnimTrigger, AnimationSignal};
use crate::core::{DeferredAction, DeferredCallback, GameplaySet, Incarnation, Scheduler};
use crate::enemies::AiState;
use crate::player::Player;

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // Events
        .add_event::<DamageEvent>()
        .add_event::<DeathEvent>()
        .add_event::<DownedEvent>()

        // Deferred callbacks
        .add_systems(
            Update,
            (resolve_strikes, finish_attacks, advance_revives, remove_corpses)
                .in_set(GameplaySet::Resolve),
        )

        // Damage and its consequences
        .add_systems(
            Update,
            (apply_damage, handle_deaths, begin_revives)
                .chain()
                .in_set(GameplaySet::Damage),
        );
}

/// Land single-target hits whose windup has elapsed.
///
/// The target gets re-checked against the attacker's reach because it may
/// have moved during the windup. Out of reach means a miss.
fn resolve_strikes(
    mut callbacks: EventReader<DeferredCallback>,
    attackers: Query<(&Transform, &AttackProfile, &Incarnation, Option<&Target>), Without<Dead>>,
    targets: Query<(&Transform, &Health), Without<Dead>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for callback in callbacks.read() {
        if callback.action != DeferredAction::Strike {
            continue;
        }

        let Ok((transform, profile, incarnation, target)) = attackers.get(callback.entity) else {
            continue;
        };
        if !callback.is_current(incarnation) {
            debug!("Dropping stale strike from {:?}", callback.entity);
            continue;
        }
        let Some(&Target(target)) = target else {
            continue;
        };
        let Ok((target_transform, target_health)) = targets.get(target) else {
            continue;
        };
        if target_health.is_dead() {
            continue;
        }

        let distance = transform
            .translation
            .truncate()
            .distance(target_transform.translation.truncate());

        if distance > profile.reach() {
            debug!(
                "{:?} whiffed: target at {:.2}, reach {:.2}",
                callback.entity,
                distance,
                profile.reach()
            );
            continue;
        }

        damage_events.send(DamageEvent {
            target,
            source: callback.entity,
            amount: profile.damage,
        });
    }
}

/// Clear the attacking flag once recovery is over.
fn finish_attacks(
    mut callbacks: EventReader<DeferredCallback>,
    mut query: Query<&mut CombatState>,
) {
    for callback in callbacks.read() {
        if callback.action != DeferredAction::Recover {
            continue;
        }
        if let Ok(mut combat) = query.get_mut(callback.entity) {
            combat.end_attack();
        }
    }
}

/// Apply damage to entities.
///
/// Each event is resolved against the defender's current state, so several
/// hits on the same defender in one tick are safe: once it is dead or down,
/// the rest are ignored.
fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(
        &mut Health,
        Option<&mut AiState>,
        Option<&Revive>,
        Option<&mut Incarnation>,
        Has<Dead>,
    )>,
    mut death_events: EventWriter<DeathEvent>,
    mut downed_events: EventWriter<DownedEvent>,
    mut signals: EventWriter<AnimationSignal>,
) {
    for event in damage_events.read() {
        let Ok((mut health, ai_state, revive, incarnation, dead)) = health_query.get_mut(event.target)
        else {
            continue;
        };

        let incapacitated = dead || ai_state.as_deref().is_some_and(AiState::is_incapacitated);
        let outcome = take_damage(&mut health, revive, incapacitated, event.amount);

        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt => {
                debug!(
                    "{:?} hit for {} ({}/{})",
                    event.target, event.amount, health.current, health.maximum
                );
                signals.send(AnimationSignal::trigger(event.target, AnimTrigger::Hurt));
            }
            DamageOutcome::Downed => {
                if let Some(mut state) = ai_state {
                    *state = AiState::Reviving;
                }
                if let Some(mut incarnation) = incarnation {
                    incarnation.bump();
                }
                info!("{:?} is down but will get back up", event.target);
                downed_events.send(DownedEvent {
                    entity: event.target,
                });
            }
            DamageOutcome::Killed => {
                if let Some(mut state) = ai_state {
                    *state = AiState::Dead;
                }
                if let Some(mut incarnation) = incarnation {
                    incarnation.bump();
                }
                commands.entity(event.target).insert(Dead);
                death_events.send(DeathEvent {
                    entity: event.target,
                    killed_by: Some(event.source),
                });
            }
        }
    }
}

/// Switch off collision for the dead and schedule their removal.
///
/// Enemies are despawned after their corpse lifetime; the player instead
/// triggers a level restart after the same delay.
fn handle_deaths(
    mut commands: Commands,
    time: Res<Time>,
    mut scheduler: ResMut<Scheduler>,
    mut death_events: EventReader<DeathEvent>,
    mut query: Query<(
        Option<&CorpseLifetime>,
        Option<&Incarnation>,
        Option<&mut Velocity>,
        Option<&mut CombatState>,
        Has<Player>,
    )>,
    mut signals: EventWriter<AnimationSignal>,
) {
    let now = time.elapsed_secs();

    for event in death_events.read() {
        let Ok((lifetime, incarnation, velocity, combat, is_player)) = query.get_mut(event.entity)
        else {
            continue;
        };

        if let Some(mut velocity) = velocity {
            *velocity = Velocity::zero();
        }
        if let Some(mut combat) = combat {
            combat.end_attack();
        }
        commands.entity(event.entity).insert(ColliderDisabled);

        signals.send(AnimationSignal::flag(event.entity, AnimFlag::Walking, false));
        signals.send(AnimationSignal::trigger(event.entity, AnimTrigger::Die));

        let lifetime = lifetime.copied().unwrap_or_default();
        let incarnation = incarnation.copied().unwrap_or_default();
        let action = if is_player {
            info!("Player died (killed by {:?})", event.killed_by);
            DeferredAction::Restart
        } else {
            info!("{:?} died (killed by {:?})", event.entity, event.killed_by);
            DeferredAction::Remove
        };

        scheduler.schedule(
            now,
            lifetime.0,
            DeferredCallback::new(event.entity, incarnation.0, action),
        );
    }
}

/// Lie down after a lethal hit that will be revived.
fn begin_revives(
    mut commands: Commands,
    time: Res<Time>,
    mut scheduler: ResMut<Scheduler>,
    mut downed_events: EventReader<DownedEvent>,
    mut query: Query<(&Revive, &Incarnation, Option<&mut Velocity>, Option<&mut CombatState>)>,
    mut signals: EventWriter<AnimationSignal>,
) {
    let now = time.elapsed_secs();

    for event in downed_events.read() {
        let Ok((revive, incarnation, velocity, combat)) = query.get_mut(event.entity) else {
            continue;
        };

        if let Some(mut velocity) = velocity {
            *velocity = Velocity::zero();
        }
        if let Some(mut combat) = combat {
            combat.end_attack();
        }
        commands.entity(event.entity).insert(ColliderDisabled);

        signals.send(AnimationSignal::flag(event.entity, AnimFlag::Walking, false));
        signals.send(AnimationSignal::trigger(event.entity, AnimTrigger::Die));

        scheduler.schedule(
            now,
            revive.delay,
            DeferredCallback::new(event.entity, incarnation.0, DeferredAction::BeginRise),
        );
    }
}

/// Two-phase revive: after lying down, start rising; after rising, come
/// back with restored health and one revive fewer.
fn advance_revives(
    mut commands: Commands,
    time: Res<Time>,
    mut scheduler: ResMut<Scheduler>,
    mut callbacks: EventReader<DeferredCallback>,
    mut query: Query<(
        &mut Revive,
        &mut Health,
        &mut AiState,
        &mut Incarnation,
        Option<&mut CombatState>,
    )>,
    mut signals: EventWriter<AnimationSignal>,
) {
    let now = time.elapsed_secs();

    for callback in callbacks.read() {
        if !matches!(
            callback.action,
            DeferredAction::BeginRise | DeferredAction::FinishRise
        ) {
            continue;
        }

        let Ok((mut revive, mut health, mut state, mut incarnation, combat)) =
            query.get_mut(callback.entity)
        else {
            continue;
        };
        if !callback.is_current(&incarnation) || *state != AiState::Reviving {
            debug!("Dropping stale revive step for {:?}", callback.entity);
            continue;
        }

        if callback.action == DeferredAction::BeginRise {
            signals.send(AnimationSignal::trigger(callback.entity, AnimTrigger::Revive));
            scheduler.schedule(
                now,
                revive.rise_duration,
                DeferredCallback::new(callback.entity, incarnation.0, DeferredAction::FinishRise),
            );
            continue;
        }

        revive.remaining = revive.remaining.saturating_sub(1);
        health.revive(revive.health_after);
        *state = AiState::Patrol;
        incarnation.bump();
        if let Some(mut combat) = combat {
            combat.end_attack();
        }
        commands.entity(callback.entity).remove::<ColliderDisabled>();

        info!(
            "{:?} revived with {} health ({} revives left)",
            callback.entity, health.current, revive.remaining
        );
    }
}

/// Despawn corpses whose grace period is over.
fn remove_corpses(
    mut commands: Commands,
    mut callbacks: EventReader<DeferredCallback>,
    query: Query<(), With<Dead>>,
) {
    for callback in callbacks.read() {
        if callback.action != DeferredAction::Remove {
            continue;
        }
        if query.get(callback.entity).is_ok() {
            commands.entity(callback.entity).despawn_recursive();
        }
    }
}
