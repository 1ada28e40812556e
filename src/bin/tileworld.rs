//! tileworld CLI - noisy tile-world exploration with uncertainty-driven agents
//!
//! This CLI provides:
//! - Single runs of one agent under a chosen preset, strategy and noise
//! - Sweeps over every noise level and strategy combination

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tileworld")]
#[command(version, about = "Belief-driven agent on a noisy tile world", long_about = None)]
struct Cli {
    /// Emit debug logs for every step
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single simulation
    Run(tileworld::cli::commands::run::RunArgs),

    /// Sweep noise levels and strategies
    Sweep(tileworld::cli::commands::sweep::SweepArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tileworld::cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => tileworld::cli::commands::run::execute(args),
        Commands::Sweep(args) => tileworld::cli::commands::sweep::execute(args),
    }
}
