//! Next-match candidate listing.

use bracketry_core::EdgeKind;
use clap::Args;

use super::common::{CliEdgeKind, load_bracket, match_label};

/// List the matches a source's edge may legally point at.
#[derive(Args)]
pub struct CandidatesArgs {
    /// Bracket name or path
    pub bracket: String,

    /// Source match id
    pub source: String,

    /// Which edge of the source to retarget
    #[arg(short, long, value_enum, default_value = "winner")]
    pub kind: CliEdgeKind,
}

/// Run the candidates command.
pub fn run(args: CandidatesArgs) -> anyhow::Result<()> {
    let (_, file) = load_bracket(&args.bracket)?;
    let graph = file.to_graph_unchecked();
    let kind = EdgeKind::from(args.kind);

    let Some(source) = graph.get(&args.source) else {
        anyhow::bail!("match '{}' is not in '{}'", args.source, file.name);
    };

    let candidates = graph.candidates(&source.id, kind);
    if candidates.is_empty() {
        println!("No legal {} target for {}", kind, match_label(source));
        return Ok(());
    }

    println!("Legal {} targets for {}:", kind, match_label(source));
    for id in &candidates {
        if let Some(node) = graph.get(id) {
            println!("  {:12} {}", match_label(node), node.lane());
        }
    }
    Ok(())
}
