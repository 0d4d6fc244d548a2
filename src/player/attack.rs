//! Player attacks: start a swing on request, hit everything around the
//! attack point once the windup is over.

use bevy::prelude::*;

use super::components::*;
use crate::animation::AnimationSignal;
use crate::combat::{initiate_attack, AttackProfile, CombatState, ComboPolicy, DamageEvent, Dead};
use crate::core::{DeferredAction, DeferredCallback, Facing, GameState, Incarnation, Scheduler};
use crate::enemies::{AiState, Enemy};
use crate::sensor::within_radius;

/// Start a swing for each attack request that passes the cooldown.
pub fn begin_player_attack(
    time: Res<Time>,
    mut scheduler: ResMut<Scheduler>,
    mut requests: EventReader<AttackRequested>,
    mut player_query: Query<
        (&AttackProfile, &mut CombatState, &Incarnation),
        (With<Player>, Without<Dead>),
    >,
    mut signals: EventWriter<AnimationSignal>,
) {
    let now = time.elapsed_secs();

    for request in requests.read() {
        let Ok((profile, mut combat, incarnation)) = player_query.get_mut(request.entity) else {
            continue;
        };

        let Some(trigger) = initiate_attack(
            request.entity,
            now,
            profile,
            ComboPolicy::Single,
            &mut combat,
            incarnation,
            DeferredAction::Sweep,
            &mut scheduler,
        ) else {
            continue;
        };

        signals.send(AnimationSignal::trigger(request.entity, trigger));
    }
}

/// Land a swing: every living enemy within range of the attack point
/// takes the swing's damage.
#[allow(clippy::type_complexity)]
pub fn resolve_player_swings(
    config: Res<PlayerConfig>,
    mut callbacks: EventReader<DeferredCallback>,
    player_query: Query<(&Transform, &Facing, &AttackProfile, &Incarnation), (With<Player>, Without<Dead>)>,
    enemy_query: Query<(Entity, &Transform, &AiState), (With<Enemy>, Without<Dead>)>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for callback in callbacks.read() {
        if callback.action != DeferredAction::Sweep {
            continue;
        }

        let Ok((transform, facing, profile, incarnation)) = player_query.get(callback.entity) else {
            continue;
        };
        if !callback.is_current(incarnation) {
            continue;
        }

        let origin = config.attack_point(transform.translation.truncate(), facing.sign());
        let candidates = enemy_query
            .iter()
            .filter(|(_, _, state)| !state.is_incapacitated())
            .map(|(entity, transform, _)| (entity, transform.translation.truncate()));

        let mut hits = 0;
        for target in within_radius(origin, profile.range, candidates) {
            damage_events.send(DamageEvent {
                target,
                source: callback.entity,
                amount: profile.damage,
            });
            hits += 1;
        }

        debug!("Player swing at {:?} hit {} enemies", origin, hits);
    }
}

/// Once the dead player's corpse lifetime is over, go to game over.
pub fn restart_after_death(
    mut callbacks: EventReader<DeferredCallback>,
    player_query: Query<(), (With<Player>, With<Dead>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for callback in callbacks.read() {
        if callback.action != DeferredAction::Restart {
            continue;
        }
        if player_query.get(callback.entity).is_ok() {
            next_state.set(GameState::GameOver);
        }
    }
}
