//! Weapon and spell catalogs loaded from RON.
//!
//! Order matters: the player selects weapons and spells by index and cycles
//! through them in file order.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::world::DataLoadError;

const ARSENAL_PATH: &str = "assets/data/catalog.ron";

/// A weapon entry.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct WeaponDefinition {
    pub name: String,
    /// Added to the player's base attack cooldown, in ms.
    pub cooldown: u64,
    /// Added to the player's attack stat.
    pub damage: f32,
    /// Hitbox length along the facing direction.
    #[serde(default = "default_reach")]
    pub reach: f32,
    /// Hitbox thickness across the facing direction.
    #[serde(default = "default_width")]
    pub width: f32,
}

fn default_reach() -> f32 {
    40.0
}

fn default_width() -> f32 {
    20.0
}

/// What a spell does when cast.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpellKind {
    Heal,
    Flame,
}

/// A spell entry.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SpellDefinition {
    pub name: String,
    pub kind: SpellKind,
    /// Added to the player's magic stat.
    pub strength: f32,
    /// Mana consumed per cast.
    pub cost: f32,
}

/// Ordered weapon and spell catalogs.
#[derive(Resource, Deserialize, Clone, Debug, Default)]
pub struct Arsenal {
    pub weapons: Vec<WeaponDefinition>,
    pub spells: Vec<SpellDefinition>,
}

impl Arsenal {
    pub fn weapon(&self, index: usize) -> Option<&WeaponDefinition> {
        self.weapons.get(index)
    }

    pub fn spell(&self, index: usize) -> Option<&SpellDefinition> {
        self.spells.get(index)
    }

    pub fn from_ron_str(contents: &str, path: &str) -> Result<Self, DataLoadError> {
        ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(DataLoadError::FileNotFound(display));
        }
        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::from_ron_str(&contents, &display)
    }
}

/// Load the arsenal at startup. Failures leave it empty, which the level
/// builder rejects.
pub fn load_arsenal(mut commands: Commands) {
    let arsenal = match Arsenal::load(Path::new(ARSENAL_PATH)) {
        Ok(arsenal) => {
            info!(
                "Loaded {} weapons and {} spells",
                arsenal.weapons.len(),
                arsenal.spells.len()
            );
            arsenal
        }
        Err(e) => {
            error!("Failed to load arsenal: {}", e);
            Arsenal::default()
        }
    };
    commands.insert_resource(arsenal);
}
