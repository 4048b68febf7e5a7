//! Shared CLI helpers used across multiple commands.

use std::path::{Path, PathBuf};

use bracketry_config::{BracketFile, find_bracket};
use bracketry_core::{BracketNode, EdgeKind, ValidationErrors};
use clap::ValueEnum;

/// Edge kinds for CLI
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliEdgeKind {
    #[default]
    Winner,
    Loser,
}

impl From<CliEdgeKind> for EdgeKind {
    fn from(kind: CliEdgeKind) -> Self {
        match kind {
            CliEdgeKind::Winner => EdgeKind::Winner,
            CliEdgeKind::Loser => EdgeKind::Loser,
        }
    }
}

/// Locate a bracket by name or path.
pub fn locate_bracket(name: &str) -> anyhow::Result<PathBuf> {
    find_bracket(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Bracket '{}' not found. Use 'bracketry list' to see saved brackets.",
            name
        )
    })
}

/// Locate and load a bracket by name or path.
pub fn load_bracket(name: &str) -> anyhow::Result<(PathBuf, BracketFile)> {
    let path = locate_bracket(name)?;
    let file = BracketFile::load(&path)?;
    tracing::debug!(path = %path.display(), matches = file.len(), "loaded bracket");
    Ok((path, file))
}

/// Save an edited bracket, or report what would be saved.
pub fn store_bracket(file: &BracketFile, path: &Path, dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        println!("(dry run, {} not written)", path.display());
        return Ok(());
    }
    file.save(path)?;
    println!("Saved '{}' to {}", file.name, path.display());
    Ok(())
}

/// Print every validation error, one per line.
pub fn print_errors(errors: &ValidationErrors) {
    println!("{} error(s):", errors.len());
    for (i, error) in errors.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, error);
    }
}

/// `#3 W2-1` style label for a match.
pub fn match_label(node: &BracketNode) -> String {
    format!("#{} {}", node.display_number, node.id)
}
