//! Bracketry CLI - Command-line interface for the bracketry bracket engine.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bracketry")]
#[command(author, version, about = "Tournament bracket graph tool", long_about = None)]
struct Cli {
    /// Log engine decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a bracket file for structural errors
    Validate(commands::validate::ValidateArgs),

    /// List legal next-match targets for a match
    Candidates(commands::candidates::CandidatesArgs),

    /// Print the round-by-round layout of a bracket
    Rounds(commands::rounds::RoundsArgs),

    /// Create a fresh single or double elimination bracket
    Generate(commands::generate::GenerateArgs),

    /// Point a match's winner or loser edge at another match
    Link(commands::link::LinkArgs),

    /// Delete a match and clear every reference to it
    Remove(commands::remove::RemoveArgs),

    /// List saved brackets
    List(commands::list::ListArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Candidates(args) => commands::candidates::run(args),
        Commands::Rounds(args) => commands::rounds::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Link(args) => commands::link::run(args),
        Commands::Remove(args) => commands::remove::run(args),
        Commands::List(args) => commands::list::run(args),
    }
}
