//! Saved bracket listing.

use std::path::PathBuf;

use bracketry_config::{
    BracketFile, bracket_name_from_path, list_brackets_in_dir, user_brackets_dir,
};
use clap::Args;

/// List saved brackets.
#[derive(Args)]
pub struct ListArgs {
    /// Directory to list instead of the user brackets directory
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// Run the list command.
pub fn run(args: ListArgs) -> anyhow::Result<()> {
    let dir = args.dir.unwrap_or_else(user_brackets_dir);
    println!("Brackets in {}:", dir.display());
    println!();

    let paths = list_brackets_in_dir(&dir);
    if paths.is_empty() {
        println!("  (none)");
        println!();
        println!("  Create one with: bracketry generate <entrants> --output <file>");
        return Ok(());
    }

    for path in paths {
        let name = bracket_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
        match BracketFile::load(&path) {
            Ok(file) => {
                let format = file
                    .format
                    .map_or_else(|| "custom".to_string(), |f| f.to_string());
                let desc = file.description.as_deref().unwrap_or("");
                println!("  {:20} {:3} matches  {:28} {}", name, file.len(), format, desc);
            }
            Err(_) => println!("  {:20} (error loading)", name),
        }
    }
    Ok(())
}
