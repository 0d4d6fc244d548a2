//! Level build, pause, teardown and the restart after the player dies.

mod common;

use bevy::prelude::*;

use common::*;
use ledgewalker::combat::{DamageEvent, Health, Target};
use ledgewalker::core::{GameState, Scheduler};
use ledgewalker::enemies::{Enemy, EnemyDefinition};
use ledgewalker::player::Player;
use ledgewalker::sensor::GroundSurfaces;
use ledgewalker::world::{LevelEntity, PlatformDef};

fn set_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update();
}

fn current_state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

fn players(app: &mut App) -> Vec<Entity> {
    let mut query = app.world_mut().query_filtered::<Entity, With<Player>>();
    query.iter(app.world()).collect()
}

fn enemy_targets(app: &mut App) -> Vec<Option<Entity>> {
    let mut query = app
        .world_mut()
        .query_filtered::<Option<&Target>, With<Enemy>>();
    query.iter(app.world()).map(|t| t.map(|t| t.0)).collect()
}

fn level_entities(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<(), With<LevelEntity>>();
    query.iter(app.world()).count()
}

#[test]
fn starting_from_the_menu_builds_the_level() {
    let mut app = create_test_app_in(GameState::MainMenu);
    assert_eq!(level_entities(&mut app), 0);

    set_state(&mut app, GameState::InGame);

    let players = players(&mut app);
    assert_eq!(players.len(), 1);
    let targets = enemy_targets(&mut app);
    assert!(!targets.is_empty());
    assert!(targets.iter().all(|t| *t == Some(players[0])));
    assert!(app.world().get_resource::<GroundSurfaces>().is_some());
}

#[test]
fn pausing_keeps_the_level_and_the_menu_tears_it_down() {
    let mut app = create_test_app_in(GameState::MainMenu);
    set_state(&mut app, GameState::InGame);
    let built = level_entities(&mut app);
    assert!(built > 0);

    set_state(&mut app, GameState::Paused);
    set_state(&mut app, GameState::InGame);
    assert_eq!(level_entities(&mut app), built);
    assert_eq!(players(&mut app).len(), 1);

    set_state(&mut app, GameState::MainMenu);
    assert_eq!(level_entities(&mut app), 0);
    assert!(app.world().resource::<Scheduler>().is_empty());
    assert!(app.world().get_resource::<GroundSurfaces>().is_none());
}

#[test]
fn player_death_restarts_the_level() {
    let mut app = create_test_app();
    let player = spawn_test_player(&mut app, Vec2::ZERO);
    app.world_mut().entity_mut(player).insert(LevelEntity);

    app.world_mut().send_event(DamageEvent {
        target: player,
        source: Entity::PLACEHOLDER,
        amount: 99,
    });
    app.update();
    assert_eq!(app.world().get::<Health>(player).unwrap().current, 0);

    advance(&mut app, 1.5);
    assert_eq!(current_state(&app), GameState::InGame);
    assert!(app.world().get::<Health>(player).is_some());

    advance(&mut app, 0.6);
    app.update();
    app.update();

    assert_eq!(current_state(&app), GameState::InGame);
    assert!(app.world().get::<Health>(player).is_none());

    let players = players(&mut app);
    assert_eq!(players.len(), 1);
    let health = app.world().get::<Health>(players[0]).unwrap();
    assert_eq!(health.current, health.maximum);
}

#[test]
fn patroller_turns_back_at_the_platform_edge() {
    let mut app = create_test_app();
    let edge = PlatformDef {
        min: (-10.0, -1.0),
        max: (1.0, 0.0),
        color: (0.3, 0.3, 0.3),
    };
    app.world_mut()
        .insert_resource(GroundSurfaces::new(vec![edge.rect()]));
    let patrol = spawn_test_enemy(&mut app, &EnemyDefinition::patrol(), Vec2::new(0.0, 0.5), None);

    let mut max_x = f32::MIN;
    for _ in 0..240 {
        app.update();
        let x = app.world().get::<Transform>(patrol).unwrap().translation.x;
        max_x = max_x.max(x);
    }

    assert!(max_x > 0.0, "patroller never moved");
    assert!(max_x < 1.0, "patroller walked off the edge: {max_x}");
}
