//! Core plugin that sets up game states, events, and the frame schedule.

use bevy::prelude::*;

use super::effects::SoundCueEvent;
use super::settings::load_game_settings;
use super::states::*;

/// Simulation rate of the fixed frame loop.
pub const FRAMES_PER_SECOND: f64 = 60.0;

/// Ordering of the fixed-rate frame: input is sampled before the level runs.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Simulate,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused, GameOver)
/// - The fixed 60 Hz frame schedule
/// - Gameplay settings
/// - Sound cue events
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            .init_state::<GameState>()
            .add_event::<SoundCueEvent>()
            .insert_resource(Time::<Fixed>::from_hz(FRAMES_PER_SECOND))
            .add_systems(Startup, load_game_settings)
            .configure_sets(
                FixedUpdate,
                (FrameSet::Input, FrameSet::Simulate)
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            // Startup has already loaded every data file by the first Update
            .add_systems(Update, finish_loading.run_if(in_state(GameState::Loading)))
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            )
            .add_systems(OnEnter(GameState::Paused), pause_time)
            .add_systems(OnExit(GameState::Paused), resume_time);
    }
}

fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
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

fn pause_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}
