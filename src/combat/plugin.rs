//! Combat plugin - loads the weapon and spell catalogs.

use bevy::prelude::*;

use super::data::{load_arsenal, Arsenal};

/// Combat plugin - makes the arsenal available before a level is built.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Arsenal>()
            .add_systems(Startup, load_arsenal);
    }
}
