//! Fresh bracket generation command.

use std::path::PathBuf;

use bracketry_config::BracketFile;
use bracketry_core::BracketFormat;
use clap::{Args, ValueEnum};

/// Bracket formats for CLI
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliFormat {
    #[default]
    Single,
    Double,
}

/// Generate a bracket.
#[derive(Args)]
pub struct GenerateArgs {
    /// Number of entrants
    pub entrants: u32,

    /// Elimination format
    #[arg(short, long, value_enum, default_value = "single")]
    pub format: CliFormat,

    /// Add a third place match (single elimination)
    #[arg(long)]
    pub third_place: bool,

    /// Skip the grand final reset (double elimination)
    #[arg(long)]
    pub no_reset: bool,

    /// Bracket name (defaults to the output file name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output file (.toml or .json); prints TOML to stdout if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

/// Run the generate command.
pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let format = match args.format {
        CliFormat::Single => {
            if args.no_reset {
                tracing::warn!("--no-reset only applies to double elimination");
            }
            BracketFormat::SingleElimination {
                third_place: args.third_place,
            }
        }
        CliFormat::Double => {
            if args.third_place {
                tracing::warn!("--third-place only applies to single elimination");
            }
            BracketFormat::DoubleElimination {
                grand_final_reset: !args.no_reset,
            }
        }
    };

    let name = args
        .name
        .clone()
        .or_else(|| {
            args.output
                .as_deref()
                .and_then(bracketry_config::bracket_name_from_path)
        })
        .unwrap_or_else(|| format!("{} entrants", args.entrants));

    let file = BracketFile::generate(name, args.entrants, format)?;
    tracing::info!(matches = file.len(), %format, "generated bracket");

    let Some(path) = args.output else {
        print!("{}", file.to_toml()?);
        return Ok(());
    };

    if path.exists() && !args.force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite.",
            path.display()
        );
    }
    file.save(&path)?;
    println!(
        "Generated '{}' ({}, {} matches) at {}",
        file.name,
        format,
        file.len(),
        path.display()
    );
    Ok(())
}
