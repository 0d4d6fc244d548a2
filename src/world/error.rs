//! Error types for data loading.

use thiserror::Error;

/// Errors that can occur when loading level, enemy or player data.
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

    /// A level spawns an enemy type nobody defined.
    #[error("Level '{level}' spawns unknown enemy type '{enemy_type}'")]
    UnknownEnemy { level: String, enemy_type: String },
}
