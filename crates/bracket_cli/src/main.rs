//! Bracket CLI
//!
//! Autofill brackets from reference data, score them against official
//! results, and rebuild the leaderboard.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use bracket_core::{DataPaths, SimConfig};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "bracket")]
#[command(about = "Simulate and score tournament brackets", long_about = None)]
struct Cli {
    /// Team strength CSV (overrides BRACKET_STRENGTHS_PATH)
    #[arg(long, global = true)]
    strengths: Option<PathBuf>,

    /// Historical seed advancement CSV (overrides BRACKET_HISTORY_PATH)
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Field CSV (overrides BRACKET_FIELD_PATH; embedded field otherwise)
    #[arg(long, global = true)]
    field: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Autofill a bracket
    Simulate {
        /// chalk, ranking, random, simulate or seed_odds
        #[arg(long, default_value = "simulate")]
        strategy: String,

        /// Seed-history weight for the simulate strategy
        #[arg(long, default_value_t = bracket_core::config::DEFAULT_WEIGHT)]
        weight: f64,

        /// Fixed RNG seed for a reproducible bracket
        #[arg(long)]
        seed: Option<u64>,

        /// Output JSON file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Score one stored bracket
    Score {
        #[arg(long)]
        bracket: PathBuf,

        /// Official results as a round map
        #[arg(long)]
        results: Option<PathBuf>,

        /// Official results as a game-call log
        #[arg(long)]
        calls: Option<PathBuf>,
    },

    /// Rescore every stored bracket and print the standings
    Rescore {
        #[arg(long)]
        brackets: PathBuf,

        #[arg(long)]
        results: Option<PathBuf>,

        #[arg(long)]
        calls: Option<PathBuf>,

        /// Write standings JSON here as well
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the field by region and seed
    Teams,
}

#[cfg(feature = "cli")]
impl Cli {
    fn data_paths(&self) -> DataPaths {
        let mut paths = DataPaths::from_env();
        if let Some(strengths) = &self.strengths {
            paths.strengths = strengths.clone();
        }
        if let Some(history) = &self.history {
            paths.history = history.clone();
        }
        if self.field.is_some() {
            paths.field = self.field.clone();
        }
        paths
    }
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = cli.data_paths();

    match cli.command {
        Commands::Simulate { strategy, weight, seed, out } => {
            let registry = bracket_core::resolve_teams(&paths).context("Failed to load reference data")?;
            let config = SimConfig { strategy, weight, seed };
            let result = bracket_core::simulate(&registry, &config)?;
            match out {
                Some(path) => {
                    bracket_cli::write_json(&path, &result)?;
                    eprintln!("Bracket written to: {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&result)?),
            }
            if let Some(champion) = &result.champion {
                eprintln!("Champion: {}", champion);
            }
        }

        Commands::Score { bracket, results, calls } => {
            let candidate: serde_json::Value = bracket_cli::read_json(&bracket)?;
            let official = bracket_cli::load_results(results.as_deref(), calls.as_deref())?;
            println!("{}", bracket_core::score_value(&candidate, &official));
        }

        Commands::Rescore { brackets, results, calls, out } => {
            let stored = bracket_cli::load_brackets(&brackets)?;
            let official = bracket_cli::load_results(results.as_deref(), calls.as_deref())?;
            let summary = bracket_core::rescore_all(&stored, &official);
            let table = bracket_core::standings(&summary.scores);

            println!("Brackets scored: {}", summary.brackets_scored);
            println!("Top score:       {}", summary.top_score);
            for row in &table {
                println!("{:>4}  {:<24} {:>4}", row.rank, row.id, row.score);
            }
            if let Some(path) = out {
                bracket_cli::write_json(&path, &table)?;
            }
        }

        Commands::Teams => {
            let registry = bracket_core::resolve_teams(&paths).context("Failed to load reference data")?;
            for entry in registry.roster() {
                println!("{:<8} {:>2}  {}", entry.region, entry.seed, entry.name);
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("bracket CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
