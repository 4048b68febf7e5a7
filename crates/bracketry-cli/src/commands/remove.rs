//! Match removal command.

use std::path::PathBuf;

use clap::Args;

use super::common::{load_bracket, match_label, store_bracket};

/// Delete a match.
#[derive(Args)]
pub struct RemoveArgs {
    /// Bracket name or path
    pub bracket: String,

    /// Match id to remove
    pub id: String,

    /// Write the result here instead of back to the bracket file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show what would be removed without saving
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the remove command.
pub fn run(args: RemoveArgs) -> anyhow::Result<()> {
    let (path, mut file) = load_bracket(&args.bracket)?;
    let mut graph = file.to_graph_unchecked();

    let removed = graph.remove(&args.id)?;
    println!("Removed {}", match_label(&removed));

    file.matches = graph.into_nodes();
    store_bracket(&file, args.output.as_deref().unwrap_or(&path), args.dry_run)
}
