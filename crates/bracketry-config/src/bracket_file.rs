//! Bracket file format and operations.

use std::path::Path;

use bracketry_core::{BracketFormat, BracketGraph, BracketNode, generate_bracket, validate};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths;

/// On-disk encoding of a bracket file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl FileFormat {
    /// Detects the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// A saved tournament bracket.
///
/// Bracket files hold a snapshot of every match record, as produced by the
/// data layer or by [`BracketFile::generate`]. They are stored as TOML or
/// JSON; match fields accept both `snake_case` and `camelCase` names.
///
/// # TOML Format
///
/// ```toml
/// name = "Spring Open"
/// description = "Club championship"
///
/// [format]
/// type = "single_elimination"
/// third_place = false
///
/// [[matches]]
/// id = "W1-1"
/// display_number = 1
/// winner_next_match_id = "W2-1"
///
/// [[matches]]
/// id = "W1-2"
/// display_number = 2
/// winner_next_match_id = "W2-1"
///
/// [[matches]]
/// id = "W2-1"
/// display_number = 3
/// previous_left_id = "W1-1"
/// previous_right_id = "W1-2"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BracketFile {
    /// Name of the bracket.
    pub name: String,

    /// Optional description of the bracket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Format the bracket was generated in, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<BracketFormat>,

    /// Every match record, in display order.
    #[serde(default)]
    pub matches: Vec<BracketNode>,
}

impl BracketFile {
    /// Create a new empty bracket file.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            format: None,
            matches: Vec::new(),
        }
    }

    /// Generate a fresh bracket.
    pub fn generate(
        name: impl Into<String>,
        entrants: u32,
        format: BracketFormat,
    ) -> Result<Self, ConfigError> {
        let matches = generate_bracket(entrants, format)?;
        Ok(Self {
            format: Some(format),
            matches,
            ..Self::new(name)
        })
    }

    /// Create a bracket file from a graph snapshot.
    pub fn from_graph(name: impl Into<String>, graph: BracketGraph) -> Self {
        Self {
            matches: graph.into_nodes(),
            ..Self::new(name)
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the format tag.
    pub fn with_format(mut self, format: BracketFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Add a match.
    pub fn with_match(mut self, node: BracketNode) -> Self {
        self.matches.push(node);
        self
    }

    /// Load a bracket file, choosing TOML or JSON by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format =
            FileFormat::from_path(path).ok_or_else(|| ConfigError::UnknownFormat(path.into()))?;
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::parse(&content, format)
    }

    /// Load a bracket by path or by name from the user brackets directory.
    pub fn find(name: &str) -> Result<Self, ConfigError> {
        let path =
            paths::find_bracket(name).ok_or_else(|| ConfigError::BracketNotFound(name.into()))?;
        Self::load(path)
    }

    /// Parse a bracket file from a string in the given format.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self, ConfigError> {
        match format {
            FileFormat::Toml => Self::from_toml(content),
            FileFormat::Json => Self::from_json(content),
        }
    }

    /// Parse a bracket file from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Parse a bracket file from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Save the bracket file, choosing TOML or JSON by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let format =
            FileFormat::from_path(path).ok_or_else(|| ConfigError::UnknownFormat(path.into()))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.render(format)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize in the given format.
    pub fn render(&self, format: FileFormat) -> Result<String, ConfigError> {
        match format {
            FileFormat::Toml => self.to_toml(),
            FileFormat::Json => self.to_json(),
        }
    }

    /// Convert the bracket file to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Convert the bracket file to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the matches and build the graph.
    pub fn into_graph(self) -> Result<BracketGraph, ConfigError> {
        Ok(validate(&self.matches)?)
    }

    /// Build the graph without validating, for inspecting broken files.
    pub fn to_graph_unchecked(&self) -> BracketGraph {
        BracketGraph::from_nodes(self.matches.iter().cloned())
    }

    /// Get the number of matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Check if the bracket has no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl Default for BracketFile {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
