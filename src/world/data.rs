//! Level data structures and RON loading.
//!
//! A level is four equally sized integer grids. `-1` marks an empty cell.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;

const LEVELS_DIR: &str = "assets/data/levels";

/// Marks an empty cell in every layer.
pub const EMPTY_CELL: i32 = -1;

/// What an entity-layer code spawns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum SpawnKind {
    Player,
    /// A monster of the named species.
    Monster(String),
}

/// The spawn legend used when a level does not bring its own.
pub fn default_legend() -> HashMap<i32, SpawnKind> {
    HashMap::from([
        (390, SpawnKind::Monster("bamboo".to_string())),
        (391, SpawnKind::Monster("spirit".to_string())),
        (392, SpawnKind::Monster("raccoon".to_string())),
        (393, SpawnKind::Monster("squid".to_string())),
        (394, SpawnKind::Player),
    ])
}

/// Raw level file as written on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinitionRaw {
    pub name: String,
    pub boundary: Vec<Vec<i32>>,
    pub grass: Vec<Vec<i32>>,
    pub large_objects: Vec<Vec<i32>>,
    pub entities: Vec<Vec<i32>>,
    #[serde(default)]
    pub legend: Option<HashMap<i32, SpawnKind>>,
}

/// A validated level: every layer has the same dimensions.
#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub boundary: Vec<Vec<i32>>,
    pub grass: Vec<Vec<i32>>,
    pub large_objects: Vec<Vec<i32>>,
    pub entities: Vec<Vec<i32>>,
    pub legend: HashMap<i32, SpawnKind>,
}

impl LevelDefinition {
    /// Validate grid dimensions and resolve the legend.
    pub fn from_raw(raw: LevelDefinitionRaw) -> Result<Self, DataLoadError> {
        let height = raw.boundary.len();
        let width = raw.boundary.first().map_or(0, Vec::len);

        for (layer, grid) in [
            ("boundary", &raw.boundary),
            ("grass", &raw.grass),
            ("large_objects", &raw.large_objects),
            ("entities", &raw.entities),
        ] {
            check_dimensions(layer, grid, width, height)?;
        }

        Ok(Self {
            name: raw.name,
            width,
            height,
            boundary: raw.boundary,
            grass: raw.grass,
            large_objects: raw.large_objects,
            entities: raw.entities,
            legend: raw.legend.unwrap_or_else(default_legend),
        })
    }

    pub fn from_ron_str(contents: &str, path: &str) -> Result<Self, DataLoadError> {
        let raw: LevelDefinitionRaw =
            ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
                path: path.to_string(),
                details: e.to_string(),
            })?;
        Self::from_raw(raw)
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

fn check_dimensions(
    layer: &'static str,
    grid: &[Vec<i32>],
    width: usize,
    height: usize,
) -> Result<(), DataLoadError> {
    let mismatch = |actual_width, actual_height| DataLoadError::GridMismatch {
        layer,
        expected_width: width,
        expected_height: height,
        actual_width,
        actual_height,
    };

    if grid.len() != height {
        return Err(mismatch(grid.first().map_or(0, Vec::len), grid.len()));
    }
    if let Some(row) = grid.iter().find(|row| row.len() != width) {
        return Err(mismatch(row.len(), grid.len()));
    }
    Ok(())
}

/// Resource storing all loaded level definitions.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    /// Get a level by name.
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }
}

/// Resource indicating which level to load.
#[derive(Resource)]
pub struct CurrentLevel {
    pub name: String,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            name: "level1".to_string(),
        }
    }
}

/// Load all level definitions from assets/data/levels/.
pub fn load_level_definitions(mut commands: Commands) {
    let mut registry = LevelRegistry::default();
    let levels_path = Path::new(LEVELS_DIR);

    match fs::read_dir(levels_path) {
        Ok(entries) => {
            for entry in entries.flatten() {
                let path = entry.path();
                if !path.extension().is_some_and(|ext| ext == "ron") {
                    continue;
                }
                let Some(stem) = path.file_stem() else {
                    continue;
                };
                let level_name = stem.to_string_lossy().to_string();

                match LevelDefinition::load(&path) {
                    Ok(level) => {
                        info!(
                            "Loaded level: {} ({}x{})",
                            level_name, level.width, level.height
                        );
                        registry.levels.insert(level_name, level);
                    }
                    Err(e) => error!("Failed to load level {:?}: {}", path, e),
                }
            }
        }
        Err(e) => warn!("Levels directory not readable: {:?}: {}", levels_path, e),
    }

    info!("Loaded {} level(s)", registry.levels.len());
    commands.insert_resource(registry);
    commands.insert_resource(CurrentLevel::default());
}
