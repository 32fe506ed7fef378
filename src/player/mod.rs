//! Player module - the player controller and its keyboard input.

mod components;
mod controller;
mod plugin;

pub use components::*;
pub use plugin::{read_player_input, InputBindings, PlayerIntent, PlayerPlugin};
