//! Error types for bracket file operations.

use std::path::PathBuf;

use bracketry_core::{GenerateError, ValidationErrors};
use thiserror::Error;

/// Errors that can occur while loading, saving, or locating bracket files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Failed to parse or serialize JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither `.toml` nor `.json`
    #[error("unsupported bracket file '{0}': expected a .toml or .json extension")]
    UnknownFormat(PathBuf),

    /// Bracket not found by name or path
    #[error("bracket not found: {0}")]
    BracketNotFound(String),

    /// The bracket's matches do not form a valid graph
    #[error("invalid bracket: {0}")]
    InvalidBracket(#[from] ValidationErrors),

    /// Bracket generation rejected its input
    #[error("cannot generate bracket: {0}")]
    Generate(#[from] GenerateError),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
