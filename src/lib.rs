//! Tilebound - a top-down, tile-based action game in Bevy.
//!
//! # Architecture
//!
//! The simulation core is plain Rust: [`world::Level`] owns the player, the
//! enemies, the tiles and every transient effect, and advances them one frame
//! at a time. Controllers request changes to the world through
//! [`core::WorldEffects`]; the level applies them between update phases.
//!
//! Bevy provides the shell around it, one plugin per area:
//!
//! - **Core**: Game states, settings, the fixed 60 Hz frame schedule
//! - **Player**: Keyboard bindings and input sampling
//! - **Combat**: Weapon and spell catalogs
//! - **Enemies**: Monster species
//! - **World**: Level data, building, and running the level
//! - **Rendering**: Camera and sprites mirrored from the level's draw calls
//! - **Audio**: Sound cue playback
//! - **UI**: HUD, pause and game over screens

pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod rendering;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct TileboundPlugin;

impl Plugin for TileboundPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Input
            .add_plugins(player::PlayerPlugin)

            // Data catalogs
            .add_plugins(combat::CombatPlugin)
            .add_plugins(enemies::EnemyPlugin)

            // Level and simulation
            .add_plugins(world::WorldPlugin)

            // Presentation
            .add_plugins(rendering::RenderingPlugin)
            .add_plugins(audio::AudioCuePlugin)
            .add_plugins(ui::UiPlugin);
    }
}
