//! Enemy AI behavior systems.

use bevy::prelude::*;

use super::components::{AiState, Enemy, EnemyStats, Locomotion};
use super::movement::{chase_flier, chase_walker, hover_flier, orbit_flier, patrol_walker};
use crate::animation::{AnimFlag, AnimationSignal};
use crate::combat::{initiate_attack, AttackProfile, CombatState, Dead, Target};
use crate::core::{DeferredAction, Facing, Incarnation, Scheduler};
use crate::sensor::GroundSensor;

/// Pick the state for this tick from the distance to the target.
///
/// Dead and reviving are sticky here; only damage and the revive sequence
/// move an actor in or out of them. Without a target the enemy patrols.
pub fn decide_state(
    current: AiState,
    distance: Option<f32>,
    detect_range: f32,
    attack_range: f32,
) -> AiState {
    if current.is_incapacitated() {
        return current;
    }

    match distance {
        Some(d) if d <= attack_range => AiState::Attack,
        Some(d) if d <= detect_range => AiState::Chase,
        _ => AiState::Patrol,
    }
}

/// Per-enemy think step: classify, face, move and maybe start an attack.
#[allow(clippy::type_complexity)]
pub fn ai_think(
    time: Res<Time>,
    mut scheduler: ResMut<Scheduler>,
    ground: GroundSensor,
    targets: Query<&Transform, (Without<Enemy>, Without<Dead>)>,
    mut enemies: Query<
        (
            Entity,
            &mut Transform,
            &mut AiState,
            &mut Locomotion,
            &mut Facing,
            &mut CombatState,
            &EnemyStats,
            &AttackProfile,
            &Incarnation,
            Option<&Target>,
        ),
        With<Enemy>,
    >,
    mut signals: EventWriter<AnimationSignal>,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for (
        entity,
        mut transform,
        mut state,
        mut locomotion,
        mut facing,
        mut combat,
        stats,
        profile,
        incarnation,
        target,
    ) in enemies.iter_mut()
    {
        if state.is_incapacitated() {
            continue;
        }

        let position = transform.translation.truncate();
        let target_position = target
            .and_then(|t| targets.get(t.0).ok())
            .map(|t| t.translation.truncate());
        let distance = target_position.map(|p| position.distance(p));

        let next = decide_state(*state, distance, stats.detect_range, profile.range);
        if next != *state {
            debug!("{:?}: {:?} -> {:?}", entity, *state, next);
            *state = next;
        }

        let mut walking = false;
        let new_position = match (next, target_position, &mut *locomotion) {
            (AiState::Attack, Some(goal), Locomotion::Walker(_)) => {
                *facing = Facing::toward(position.x, goal.x);
                position
            }
            (AiState::Attack, Some(goal), Locomotion::Flier(path)) => {
                hover_flier(position, goal, path, &mut facing, dt)
            }
            (AiState::Chase, Some(goal), Locomotion::Walker(route)) => {
                let (moved_to, moved) =
                    chase_walker(position, goal, route, &mut facing, dt, &ground);
                walking = moved;
                moved_to
            }
            (AiState::Chase, Some(goal), Locomotion::Flier(path)) => {
                chase_flier(position, goal, path, &mut facing, dt)
            }
            (_, _, Locomotion::Walker(route)) => {
                walking = true;
                patrol_walker(position, route, &mut facing, dt, &ground)
            }
            (_, _, Locomotion::Flier(path)) => orbit_flier(position, path, &mut facing, dt),
        };

        if new_position != position {
            transform.translation.x = new_position.x;
            transform.translation.y = new_position.y;
        }

        if matches!(*locomotion, Locomotion::Walker(_)) {
            signals.send(AnimationSignal::flag(entity, AnimFlag::Walking, walking));
        }

        if next != AiState::Attack {
            continue;
        }

        if let Some(trigger) = initiate_attack(
            entity,
            now,
            profile,
            stats.combo,
            &mut combat,
            incarnation,
            DeferredAction::Strike,
            &mut scheduler,
        ) {
            debug!("{:?} attacks ({:?})", entity, trigger);
            signals.send(AnimationSignal::trigger(entity, trigger));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_distance() {
        let decide = |d| decide_state(AiState::Patrol, d, 5.0, 2.0);
        assert_eq!(decide(None), AiState::Patrol);
        assert_eq!(decide(Some(6.0)), AiState::Patrol);
        assert_eq!(decide(Some(5.0)), AiState::Chase);
        assert_eq!(decide(Some(2.0)), AiState::Attack);
        assert_eq!(decide(Some(0.0)), AiState::Attack);
    }

    #[test]
    fn backs_off_when_target_leaves() {
        assert_eq!(decide_state(AiState::Attack, Some(3.0), 5.0, 2.0), AiState::Chase);
        assert_eq!(decide_state(AiState::Chase, Some(7.0), 5.0, 2.0), AiState::Patrol);
        assert_eq!(decide_state(AiState::Attack, None, 5.0, 2.0), AiState::Patrol);
    }

    #[test]
    fn incapacitated_states_are_sticky() {
        assert_eq!(decide_state(AiState::Dead, Some(0.5), 5.0, 2.0), AiState::Dead);
        assert_eq!(
            decide_state(AiState::Reviving, Some(0.5), 5.0, 2.0),
            AiState::Reviving
        );
    }
}
