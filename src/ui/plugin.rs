//! UI plugin - main menu, pause menu and HUD.

use bevy::prelude::*;

use crate::core::GameState;
use super::hud;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);

        app
            // Main menu
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(Update, menu_button_input.run_if(in_state(GameState::MainMenu)))
            .add_systems(OnExit(GameState::MainMenu), despawn_all::<MainMenuUi>)

            // Pause menu
            .add_systems(OnEnter(GameState::Paused), setup_pause_menu)
            .add_systems(Update, menu_button_input.run_if(in_state(GameState::Paused)))
            .add_systems(OnExit(GameState::Paused), despawn_all::<PauseMenuUi>);
    }
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

/// Everything spawned for the title screen, including its camera; the
/// gameplay camera only exists while a level does.
#[derive(Component)]
struct MainMenuUi;

#[derive(Component)]
struct PauseMenuUi;

/// What a menu button does when pressed.
#[derive(Component, Clone, Copy)]
enum MenuButton {
    Start,
    Quit,
    Resume,
    MainMenu,
}

/// Set up the main menu.
fn setup_main_menu(mut commands: Commands) {
    commands.spawn((Camera2d, MainMenuUi));

    commands
        .spawn((
            full_screen_column(),
            BackgroundColor(Color::srgb(0.05, 0.05, 0.08)),
            MainMenuUi,
        ))
        .with_children(|parent| {
            spawn_caption(parent, "LEDGEWALKER", 80.0, Color::srgb(0.8, 0.7, 0.6), 30.0);
            spawn_caption(
                parent,
                "A/D move   W/Space jump   LMB/J attack   Esc pause",
                18.0,
                Color::srgb(0.5, 0.5, 0.55),
                50.0,
            );

            spawn_menu_button(parent, "Start", MenuButton::Start);
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

/// Set up the pause overlay on top of the frozen level.
fn setup_pause_menu(mut commands: Commands) {
    commands
        .spawn((
            full_screen_column(),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            PauseMenuUi,
        ))
        .with_children(|parent| {
            spawn_caption(parent, "PAUSED", 48.0, Color::srgb(0.8, 0.8, 0.85), 40.0);

            spawn_menu_button(parent, "Resume", MenuButton::Resume);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

fn full_screen_column() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

fn spawn_caption(parent: &mut ChildBuilder, text: &str, size: f32, color: Color, margin: f32) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(margin)),
            ..default()
        },
    ));
}

/// Helper to spawn a menu button.
fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Handle menu button interactions for whichever menu is open.
fn menu_button_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                match button {
                    MenuButton::Start | MenuButton::Resume => next_state.set(GameState::InGame),
                    MenuButton::MainMenu => next_state.set(GameState::MainMenu),
                    MenuButton::Quit => {
                        exit.send(AppExit::Success);
                    }
                }
            }
            Interaction::Hovered => *bg_color = BUTTON_HOVERED.into(),
            Interaction::None => *bg_color = BUTTON_IDLE.into(),
        }
    }
}

fn despawn_all<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
