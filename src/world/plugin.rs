//! World plugin - level loading, building, and the fixed-rate frame.

use bevy::prelude::*;
use std::sync::Arc;

use crate::combat::Arsenal;
use crate::core::{FrameSet, GameSettings, GameState, SoundCueEvent};
use crate::enemies::MonsterRegistry;
use crate::player::PlayerIntent;

use super::builder::build_level;
use super::catalog::GameCatalog;
use super::data::{load_level_definitions, CurrentLevel, LevelRegistry};
use super::level::Level;

/// The level currently being played.
#[derive(Resource)]
pub struct ActiveLevel(pub Level);

/// World plugin - handles level loading and the simulation frame.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_level_definitions)
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(FixedUpdate, advance_level.in_set(FrameSet::Simulate))
            .add_systems(OnExit(GameState::GameOver), cleanup_level);
    }
}

/// Build the current level from data. Resuming from pause keeps the
/// running level.
pub fn setup_level(
    mut commands: Commands,
    active: Option<Res<ActiveLevel>>,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    settings: Res<GameSettings>,
    arsenal: Res<Arsenal>,
    monsters: Res<MonsterRegistry>,
    mut exit: EventWriter<AppExit>,
) {
    if active.is_some() {
        return;
    }

    let Some(definition) = level_registry.get(&current_level.name) else {
        error!("Level '{}' not found in registry!", current_level.name);
        exit.send(AppExit::error());
        return;
    };

    info!("Building level: {}", definition.name);

    let catalog = GameCatalog {
        arsenal: arsenal.clone(),
        monsters: monsters.clone(),
    };
    let seed = settings.seed.unwrap_or_else(rand::random);

    match build_level(
        definition,
        Arc::new(settings.clone()),
        Arc::new(catalog),
        seed,
    ) {
        Ok(level) => commands.insert_resource(ActiveLevel(level)),
        Err(e) => {
            error!("Failed to build level '{}': {}", definition.name, e);
            exit.send(AppExit::error());
        }
    }
}

/// Run one simulation frame on virtual time.
fn advance_level(
    time: Res<Time>,
    intent: Res<PlayerIntent>,
    level: Option<ResMut<ActiveLevel>>,
    mut sounds: EventWriter<SoundCueEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(mut level) = level else {
        return;
    };

    let now = time.elapsed().as_millis() as u64;
    let report = level.0.run_frame(&intent.0, now);

    for cue in report.sounds {
        sounds.send(SoundCueEvent(cue));
    }

    if report.player_defeated {
        info!("Game over");
        next_state.set(GameState::GameOver);
    }
}

/// Drop the finished level so the next game starts fresh.
fn cleanup_level(mut commands: Commands) {
    commands.remove_resource::<ActiveLevel>();
}
