//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Enemy AI and
//! combat only run in `InGame`, while menu systems only run in `MainMenu`.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` to read data files
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player starts
/// - `Paused` freezes gameplay but keeps the world visible
/// - `GameOver` when the player dies; the level restarts right away
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Title screen
    MainMenu,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// Player has died
    GameOver,
}
