//! Bracket validation command.

use bracketry_core::validate;
use clap::Args;

use super::common::{load_bracket, print_errors};

/// Check a bracket file.
#[derive(Args)]
pub struct ValidateArgs {
    /// Bracket name or path
    pub bracket: String,

    /// Print the errors as a JSON array of messages
    #[arg(long)]
    pub json: bool,
}

/// Run the validate command.
pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let (_, file) = load_bracket(&args.bracket)?;

    match validate(&file.matches) {
        Ok(graph) => {
            if args.json {
                println!("[]");
            } else {
                println!("'{}' is valid ({} matches)", file.name, graph.len());
            }
            Ok(())
        }
        Err(errors) => {
            if args.json {
                let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
                println!("{}", serde_json::to_string_pretty(&messages)?);
            } else {
                print_errors(&errors);
            }
            anyhow::bail!("'{}' is invalid: {}", file.name, errors.first())
        }
    }
}
