//! Bracket files and storage paths for bracketry.
//!
//! This crate loads and saves tournament bracket snapshots for the
//! `bracketry-core` engine.
//!
//! # Features
//!
//! - **Bracket files**: Load and save match records as TOML or JSON
//! - **Generation**: Create a fresh single or double elimination bracket file
//! - **Validation**: Convert a file into a validated [`BracketGraph`](bracketry_core::BracketGraph)
//! - **Paths**: Platform-specific user bracket directory
//!
//! # Example
//!
//! ```rust,no_run
//! use bracketry_config::{BracketFile, user_brackets_dir};
//! use bracketry_core::BracketFormat;
//!
//! // Generate and save a bracket
//! let file = BracketFile::generate("Spring Open", 12, BracketFormat::DOUBLE).unwrap();
//! file.save(user_brackets_dir().join("spring_open.toml")).unwrap();
//!
//! // Load it back and validate
//! let graph = BracketFile::find("spring_open").unwrap().into_graph().unwrap();
//! assert_eq!(graph.len(), file.len());
//! ```

mod bracket_file;
mod error;

/// Platform-specific paths for saved brackets.
pub mod paths;

pub use bracket_file::{BracketFile, FileFormat};
pub use error::ConfigError;
pub use paths::{
    bracket_name_from_path, ensure_user_brackets_dir, find_bracket, list_brackets_in_dir,
    list_user_brackets, user_brackets_dir, user_config_dir,
};
