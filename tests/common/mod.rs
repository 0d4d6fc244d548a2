//! Shared helpers for headless gameplay tests.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use ledgewalker::animation::{AnimTrigger, AnimationSignal, Signal};
use ledgewalker::combat::DamageEvent;
use ledgewalker::core::{GameState, GameplaySet};
use ledgewalker::enemies::{spawn_enemy, EnemyDefinition, MovementDefinition};
use ledgewalker::player::{spawn_player, PlayerConfig};
use ledgewalker::GameplayPlugins;

/// Fixed frame time used by every test app.
pub const TICK: f32 = 1.0 / 60.0;

/// Every animation trigger sent, in order. Logged after all gameplay
/// sets so a trigger is visible right after the update that sent it.
#[derive(Resource, Default)]
pub struct TriggerLog(pub Vec<(Entity, AnimTrigger)>);

impl TriggerLog {
    pub fn for_entity(&self, entity: Entity) -> Vec<AnimTrigger> {
        self.0
            .iter()
            .filter(|(e, _)| *e == entity)
            .map(|(_, trigger)| *trigger)
            .collect()
    }
}

fn log_triggers(mut signals: EventReader<AnimationSignal>, mut log: ResMut<TriggerLog>) {
    for event in signals.read() {
        if let Signal::Trigger(trigger) = event.signal {
            log.0.push((event.entity, trigger));
        }
    }
}

/// Gameplay without rendering, physics or a window, already in game.
/// Time advances by exactly `TICK` per update.
pub fn create_test_app() -> App {
    create_test_app_in(GameState::InGame)
}

/// Like `create_test_app`, starting in `state`.
pub fn create_test_app_in(state: GameState) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            TICK,
        )))
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<TriggerLog>()
        .insert_state(state)
        .add_plugins(GameplayPlugins)
        .add_systems(Update, log_triggers.after(GameplaySet::Feedback));

    // The first update only starts the clock
    app.update();
    app
}

/// Run updates until `seconds` of game time have passed.
pub fn advance(app: &mut App, seconds: f32) {
    let ticks = (seconds / TICK).ceil() as usize;
    for _ in 0..ticks {
        app.update();
    }
}

pub fn elapsed(app: &App) -> f32 {
    app.world().resource::<Time>().elapsed_secs()
}

/// Spawn an enemy from `definition` and make it visible to queries at once.
pub fn spawn_test_enemy(
    app: &mut App,
    definition: &EnemyDefinition,
    position: Vec2,
    target: Option<Entity>,
) -> Entity {
    let entity = spawn_enemy(
        &mut app.world_mut().commands(),
        "test",
        definition,
        position,
        target,
    );
    app.world_mut().flush();
    entity
}

pub fn spawn_test_player(app: &mut App, position: Vec2) -> Entity {
    let config = app.world().resource::<PlayerConfig>().clone();
    let entity = spawn_player(&mut app.world_mut().commands(), position, &config);
    app.world_mut().flush();
    entity
}

/// An enemy that never moves and never notices anyone.
pub fn dummy(base: EnemyDefinition) -> EnemyDefinition {
    EnemyDefinition {
        detect_range: 0.0,
        movement: MovementDefinition::Walker {
            patrol_distance: 0.0,
            walk_speed: 0.0,
            chase_speed: 0.0,
            ledge_probe: None,
        },
        ..base
    }
}

pub fn hit(app: &mut App, target: Entity, amount: i32) {
    app.world_mut().send_event(DamageEvent {
        target,
        source: Entity::PLACEHOLDER,
        amount,
    });
    app.update();
}
