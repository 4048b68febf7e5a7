//! Round layout command.

use bracketry_core::{BracketView, round_label};
use clap::Args;

use super::common::{load_bracket, match_label};

/// Print a bracket round by round.
#[derive(Args)]
pub struct RoundsArgs {
    /// Bracket name or path
    pub bracket: String,

    /// Lay out the losers bracket instead of the winners bracket
    #[arg(long)]
    pub losers: bool,

    /// Print the round matrix as JSON (null for empty slots)
    #[arg(long)]
    pub json: bool,
}

/// Run the rounds command.
pub fn run(args: RoundsArgs) -> anyhow::Result<()> {
    let (_, file) = load_bracket(&args.bracket)?;
    let name = file.name.clone();
    let graph = file.into_graph()?;
    let view = BracketView::from_losers_toggle(args.losers);
    let rounds = graph.rounds(view);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rounds)?);
        return Ok(());
    }

    if rounds.is_empty() {
        println!("'{}' has no rounds to show", name);
        return Ok(());
    }

    for (index, round) in rounds.iter().enumerate() {
        let title = round_label(index, rounds.len(), view);
        println!("{}", title);
        println!("{}", "-".repeat(title.len()));
        for slot in round {
            match slot.as_ref().and_then(|id| graph.get(id)) {
                Some(node) => println!("  {}", match_label(node)),
                None => println!("  (empty)"),
            }
        }
        println!();
    }
    Ok(())
}
