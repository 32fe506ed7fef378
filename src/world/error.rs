//! Error types for data loading and level construction.

use thiserror::Error;

/// Errors that can occur when loading data files.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A field holds a value the game cannot run with.
    #[error("Invalid value in '{path}': {details}")]
    InvalidValue { path: String, details: String },

    /// A layer's dimensions differ from the first layer's.
    #[error("Grid mismatch in layer '{layer}': expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    GridMismatch {
        layer: &'static str,
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },
}

/// Inconsistencies that make a level impossible to build.
#[derive(Debug, Error)]
pub enum LevelBuildError {
    /// An entity cell holds a code missing from the spawn legend.
    #[error("Unknown spawn code {code} at row {row}, column {column}")]
    UnknownSpawnCode { code: i32, row: usize, column: usize },

    /// A boundary or large-object cell holds a code that names no image.
    #[error("Invalid object code {code} at row {row}, column {column}")]
    InvalidObjectCode { code: i32, row: usize, column: usize },

    /// The legend names a species with no catalog entry.
    #[error("Unknown monster species '{species}' at row {row}, column {column}")]
    UnknownSpecies {
        species: String,
        row: usize,
        column: usize,
    },

    #[error("Level has no player spawn")]
    MissingPlayerSpawn,

    #[error("Second player spawn at row {row}, column {column}")]
    DuplicatePlayerSpawn { row: usize, column: usize },

    /// The weapon or spell catalog is empty.
    #[error("The {0} catalog is empty")]
    EmptyCatalog(&'static str),
}
