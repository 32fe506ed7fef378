//! Player plugin - keyboard bindings and per-frame input sampling.

use bevy::prelude::*;

use super::components::InputIntent;
use crate::core::FrameSet;

/// Keyboard layout for the logical player keys.
#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub attack: KeyCode,
    pub cast: KeyCode,
    pub switch_weapon: KeyCode,
    pub switch_spell: KeyCode,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            attack: KeyCode::Space,
            cast: KeyCode::ControlLeft,
            switch_weapon: KeyCode::KeyQ,
            switch_spell: KeyCode::KeyE,
        }
    }
}

/// Keys held at the start of the current simulation frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PlayerIntent(pub InputIntent);

/// Player plugin - samples the keyboard before each simulated frame.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputBindings>()
            .init_resource::<PlayerIntent>()
            .add_systems(FixedUpdate, read_player_input.in_set(FrameSet::Input));
    }
}

/// Snapshot held keys into [`PlayerIntent`].
///
/// Held state rather than presses: the controller's own cooldowns decide how
/// often a held key repeats.
pub fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    bindings: Res<InputBindings>,
    mut intent: ResMut<PlayerIntent>,
) {
    intent.0 = InputIntent {
        up: keyboard.pressed(bindings.up),
        down: keyboard.pressed(bindings.down),
        left: keyboard.pressed(bindings.left),
        right: keyboard.pressed(bindings.right),
        attack: keyboard.pressed(bindings.attack),
        cast: keyboard.pressed(bindings.cast),
        switch_weapon: keyboard.pressed(bindings.switch_weapon),
        switch_spell: keyboard.pressed(bindings.switch_spell),
    };
}
