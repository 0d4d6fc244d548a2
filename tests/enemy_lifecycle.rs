//! Death, revive and corpse removal, driven through damage events.

mod common;

use bevy::prelude::*;
use bevy_rapier2d::prelude::ColliderDisabled;

use common::*;
use ledgewalker::animation::AnimTrigger;
use ledgewalker::combat::{DamageEvent, Dead, DeathEvent, Health, Revive};
use ledgewalker::core::Scheduler;
use ledgewalker::enemies::{AiState, EnemyDefinition};

#[test]
fn three_hits_kill_a_patroller_and_the_corpse_goes_away() {
    let mut app = create_test_app();
    let enemy = spawn_test_enemy(&mut app, &dummy(EnemyDefinition::patrol()), Vec2::new(5.0, 0.5), None);

    hit(&mut app, enemy, 1);
    hit(&mut app, enemy, 1);
    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 1);
    assert_eq!(*app.world().get::<AiState>(enemy).unwrap(), AiState::Patrol);

    hit(&mut app, enemy, 1);
    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 0);
    assert_eq!(*app.world().get::<AiState>(enemy).unwrap(), AiState::Dead);
    assert!(app.world().get::<Dead>(enemy).is_some());
    assert!(app.world().get::<ColliderDisabled>(enemy).is_some());

    let log = app.world().resource::<TriggerLog>();
    assert_eq!(
        log.for_entity(enemy),
        vec![AnimTrigger::Hurt, AnimTrigger::Hurt, AnimTrigger::Die]
    );

    // Still around during the corpse lifetime
    advance(&mut app, 1.5);
    assert!(app.world().get::<Health>(enemy).is_some());

    advance(&mut app, 0.6);
    assert!(app.world().get::<Health>(enemy).is_none());
}

#[test]
fn hitting_a_corpse_changes_nothing() {
    let mut app = create_test_app();
    let enemy = spawn_test_enemy(&mut app, &dummy(EnemyDefinition::bat()), Vec2::ZERO, None);

    hit(&mut app, enemy, 5);
    assert_eq!(app.world().resource::<Scheduler>().len(), 1);

    hit(&mut app, enemy, 1);
    hit(&mut app, enemy, 3);

    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 0);
    // Only the one removal is ever scheduled
    assert_eq!(app.world().resource::<Scheduler>().len(), 1);
    let dies = app
        .world()
        .resource::<TriggerLog>()
        .for_entity(enemy)
        .into_iter()
        .filter(|t| *t == AnimTrigger::Die)
        .count();
    assert_eq!(dies, 1);
}

#[test]
fn several_hits_in_one_tick_kill_once() {
    let mut app = create_test_app();
    let enemy = spawn_test_enemy(&mut app, &dummy(EnemyDefinition::patrol()), Vec2::ZERO, None);

    for _ in 0..5 {
        app.world_mut().send_event(DamageEvent {
            target: enemy,
            source: Entity::PLACEHOLDER,
            amount: 1,
        });
    }
    app.update();

    let health = app.world().get::<Health>(enemy).unwrap();
    assert_eq!(health.current, 0);
    assert!(health.current <= health.maximum);
    assert_eq!(app.world().resource::<Scheduler>().len(), 1);
}

#[test]
fn golem_gets_back_up_once() {
    let mut app = create_test_app();
    let golem = spawn_test_enemy(&mut app, &dummy(EnemyDefinition::golem()), Vec2::new(3.0, 0.8), None);

    hit(&mut app, golem, 5);
    assert_eq!(*app.world().get::<AiState>(golem).unwrap(), AiState::Reviving);
    assert!(app.world().get::<Dead>(golem).is_none());
    assert!(app.world().get::<ColliderDisabled>(golem).is_some());

    // Lying down ignores damage
    hit(&mut app, golem, 2);
    assert_eq!(app.world().get::<Health>(golem).unwrap().current, 0);

    advance(&mut app, 2.05);
    assert_eq!(*app.world().get::<AiState>(golem).unwrap(), AiState::Reviving);
    assert_eq!(
        app.world().resource::<TriggerLog>().for_entity(golem).last(),
        Some(&AnimTrigger::Revive)
    );

    advance(&mut app, 1.05);
    assert_eq!(*app.world().get::<AiState>(golem).unwrap(), AiState::Patrol);
    assert_eq!(app.world().get::<Health>(golem).unwrap().current, 3);
    assert_eq!(app.world().get::<Revive>(golem).unwrap().remaining, 0);
    assert!(app.world().get::<ColliderDisabled>(golem).is_none());

    // No revives left, so this one is final
    hit(&mut app, golem, 3);
    assert_eq!(*app.world().get::<AiState>(golem).unwrap(), AiState::Dead);
    assert!(app.world().get::<Dead>(golem).is_some());

    advance(&mut app, 2.1);
    assert!(app.world().get::<Health>(golem).is_none());
}

#[test]
fn golem_revived_with_no_health_can_still_be_killed() {
    let mut app = create_test_app();
    let mut definition = dummy(EnemyDefinition::golem());
    definition.revive = Some(Revive {
        remaining: 1,
        delay: 0.5,
        rise_duration: 0.5,
        health_after: 0,
    });
    let golem = spawn_test_enemy(&mut app, &definition, Vec2::ZERO, None);

    hit(&mut app, golem, 5);
    assert_eq!(*app.world().get::<AiState>(golem).unwrap(), AiState::Reviving);

    advance(&mut app, 1.1);
    assert_eq!(*app.world().get::<AiState>(golem).unwrap(), AiState::Patrol);
    assert_eq!(app.world().get::<Health>(golem).unwrap().current, 1);

    hit(&mut app, golem, 1);
    assert_eq!(*app.world().get::<AiState>(golem).unwrap(), AiState::Dead);
    assert!(app.world().get::<Dead>(golem).is_some());
}

#[test]
fn death_names_the_killer() {
    let mut app = create_test_app();
    let player = spawn_test_player(&mut app, Vec2::new(-10.0, 0.0));
    let enemy = spawn_test_enemy(&mut app, &dummy(EnemyDefinition::bat()), Vec2::ZERO, None);

    app.world_mut().send_event(DamageEvent {
        target: enemy,
        source: player,
        amount: 5,
    });
    app.update();

    let deaths: Vec<_> = app
        .world()
        .resource::<Events<DeathEvent>>()
        .iter_current_update_events()
        .copied()
        .collect();
    assert_eq!(deaths.len(), 1);
    assert_eq!(deaths[0].entity, enemy);
    assert_eq!(deaths[0].killed_by, Some(player));
}

#[test]
fn pending_strike_is_dropped_when_the_attacker_dies() {
    let mut app = create_test_app();
    let player = spawn_test_player(&mut app, Vec2::ZERO);
    let patrol = spawn_test_enemy(
        &mut app,
        &EnemyDefinition::patrol(),
        Vec2::new(1.0, 0.0),
        Some(player),
    );

    // One tick to start the swing, then kill the patroller mid-windup
    app.update();
    assert!(app
        .world()
        .resource::<TriggerLog>()
        .for_entity(patrol)
        .contains(&AnimTrigger::Attack1));
    hit(&mut app, patrol, 3);

    advance(&mut app, 1.0);
    assert_eq!(app.world().get::<Health>(player).unwrap().current, 5);
}
