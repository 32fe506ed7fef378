//! Audio module - fire-and-forget sound cues.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioPlugin, AudioSource};

use crate::core::SoundCueEvent;

/// Plays every [`SoundCueEvent`] once through kira.
pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .add_systems(Update, play_sound_cues);
    }
}

fn play_sound_cues(
    mut cues: EventReader<SoundCueEvent>,
    asset_server: Res<AssetServer>,
    audio: Res<Audio>,
) {
    for SoundCueEvent(cue) in cues.read() {
        let source: Handle<AudioSource> = asset_server.load(cue.asset_path());
        audio.play(source);
    }
}
