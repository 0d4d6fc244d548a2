//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::events::*;
use super::scheduler::*;
use super::states::*;
use super::tween::*;

/// Per-tick ordering of gameplay systems.
///
/// Every frame runs: read input, let actors think and move, fire due
/// deferred callbacks, resolve what they do, apply the resulting damage,
/// then push feedback (animation signals, HUD) out to the engine.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    Input,
    Think,
    Timers,
    Resolve,
    Damage,
    Feedback,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame, etc.)
/// - Global events (DamageEvent, DeathEvent, etc.)
/// - The deferred callback scheduler
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<DownedEvent>()
            .add_event::<DeferredCallback>()

            .init_resource::<Scheduler>()

            .configure_sets(
                Update,
                (
                    GameplaySet::Input,
                    GameplaySet::Think,
                    GameplaySet::Timers,
                    GameplaySet::Resolve,
                    GameplaySet::Damage,
                    GameplaySet::Feedback,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(Update, fire_due_callbacks.in_set(GameplaySet::Timers))

            // Loading state - data files are read at Startup, so move on
            .add_systems(OnEnter(GameState::Loading), transition_to_main_menu)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused)))
            )
            .add_systems(OnEnter(GameState::Paused), pause_game_clock)
            .add_systems(OnExit(GameState::Paused), resume_game_clock)

            // Dying sends the player here; go straight back into a fresh level
            .add_systems(OnEnter(GameState::GameOver), restart_level)

            .add_systems(Update, update_smooth_follow);
    }
}

/// Immediately transition from Loading to MainMenu.
fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}

/// Cooldowns and deferred callbacks compare against virtual time, so
/// stopping it keeps them frozen while the pause menu is open.
fn pause_game_clock(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_game_clock(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

fn restart_level(mut next_state: ResMut<NextState<GameState>>) {
    info!("Restarting level");
    next_state.set(GameState::InGame);
}
