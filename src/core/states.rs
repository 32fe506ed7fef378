//! Game state definitions that control the overall flow of the game.
//!
//! The simulation only advances in `InGame`; pausing freezes virtual time so
//! every cooldown freezes with it.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while data files are read
/// - `InGame` runs the frame loop
/// - `Paused` keeps the world visible but frozen
/// - `GameOver` when the player's health runs out
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    #[default]
    Loading,
    InGame,
    Paused,
    GameOver,
}
