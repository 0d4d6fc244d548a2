//! In-game HUD - player health and enemies left.

use bevy::prelude::*;

use crate::combat::{Dead, Health};
use crate::core::{GameState, GameplaySet};
use crate::enemies::Enemy;
use crate::player::Player;
use crate::world::LevelEntity;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for the remaining-enemies counter.
#[derive(Component)]
pub struct EnemyCounter;

/// Setup HUD systems.
///
/// The HUD lives as long as the level does, so it is spawned on the same
/// transitions and tagged for the level teardown.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(
        OnTransition {
            exited: GameState::MainMenu,
            entered: GameState::InGame,
        },
        spawn_hud,
    )
    .add_systems(
        OnTransition {
            exited: GameState::GameOver,
            entered: GameState::InGame,
        },
        spawn_hud,
    )
    .add_systems(
        Update,
        (update_health_bar, update_enemy_counter).in_set(GameplaySet::Feedback),
    );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Top-left corner
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
            LevelEntity,
        ))
        .with_children(|parent| {
            spawn_health_bar(parent);

            parent.spawn((
                Text::new("Enemies: 0"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                EnemyCounter,
            ));
        });
}

fn spawn_health_bar(parent: &mut ChildBuilder) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            margin: UiRect::bottom(Val::Px(5.0)),
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                Text::new("Health"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    width: Val::Px(60.0),
                    ..default()
                },
            ));

            row.spawn((
                Node {
                    width: Val::Px(150.0),
                    height: Val::Px(12.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
            ))
            .with_children(|bg| {
                bg.spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.8, 0.2, 0.2)),
                    HealthBar,
                ));
            });
        });
}

/// Update health bar based on player health.
fn update_health_bar(
    player_query: Query<&Health, (With<Player>, Changed<Health>)>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(health.percentage() * 100.0);
}

fn update_enemy_counter(
    enemies: Query<(), (With<Enemy>, Without<Dead>)>,
    mut counter: Query<&mut Text, With<EnemyCounter>>,
) {
    let Ok(mut text) = counter.get_single_mut() else {
        return;
    };

    let remaining = enemies.iter().count();
    let label = format!("Enemies: {remaining}");
    if text.0 != label {
        text.0 = label;
    }
}
