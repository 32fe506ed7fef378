//! World module - map data, tiles, collisions, and the level coordinator.

mod builder;
mod catalog;
pub mod collision;
mod data;
mod error;
mod level;
mod plugin;
mod tile;

pub use builder::build_level;
pub use catalog::GameCatalog;
pub use data::{
    default_legend, CurrentLevel, LevelDefinition, LevelDefinitionRaw, LevelRegistry, SpawnKind,
    EMPTY_CELL,
};
pub use error::{DataLoadError, LevelBuildError};
pub use level::{FrameReport, Level};
pub use plugin::{setup_level, ActiveLevel, WorldPlugin};
pub use tile::{Tile, TileKind};
