//! Enemy plugin - loads the monster species.

use bevy::prelude::*;

use super::data::{load_monster_definitions, MonsterRegistry};

/// Enemy plugin - makes species definitions available before a level is
/// built. Enemies themselves are simulated by the level.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MonsterRegistry>()
            .add_systems(Startup, load_monster_definitions);
    }
}
