//! Edge editing command.

use std::path::PathBuf;

use bracketry_core::{EdgeKind, MatchId};
use clap::Args;

use super::common::{CliEdgeKind, load_bracket, print_errors, store_bracket};

/// Retarget a match's winner or loser edge.
#[derive(Args)]
pub struct LinkArgs {
    /// Bracket name or path
    pub bracket: String,

    /// Source match id
    pub source: String,

    /// Which edge of the source to set
    #[arg(value_enum)]
    pub kind: CliEdgeKind,

    /// Target match id; omit to clear the edge
    pub target: Option<String>,

    /// Write the result here instead of back to the bracket file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Check the edit without saving it
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the link command.
pub fn run(args: LinkArgs) -> anyhow::Result<()> {
    let (path, mut file) = load_bracket(&args.bracket)?;
    let mut graph = file.clone().into_graph()?;
    let kind = EdgeKind::from(args.kind);
    let target = args.target.map(MatchId::from);

    if let Err(errors) = graph.link(&args.source, kind, target.clone()) {
        print_errors(&errors);
        anyhow::bail!("cannot link {} {}: {}", args.source, kind, errors.first());
    }

    match &target {
        Some(target) => println!("{} {} -> {}", args.source, kind, target),
        None => println!("{} {} cleared", args.source, kind),
    }

    file.matches = graph.into_nodes();
    store_bracket(&file, args.output.as_deref().unwrap_or(&path), args.dry_run)
}
