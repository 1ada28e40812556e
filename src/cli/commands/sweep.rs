//! Sweep command - every (noise level, strategy) pair in turn

use anyhow::Result;
use clap::Parser;

use crate::{
    app::Variant,
    cli::{
        config::{CommonConfig, parse_noise},
        output::{print_kv, print_run_report, print_section},
    },
    pipeline::{ProgressObserver, Sweep, SweepConfig},
    types::NoiseLevel,
};

#[derive(Parser, Debug)]
#[command(about = "Run every noise level and strategy combination")]
pub struct SweepArgs {
    /// Belief model preset
    #[arg(long, value_enum, default_value_t = Variant::Noisy)]
    pub variant: Variant,

    /// Number of tiles in the world
    #[arg(long, short = 'l', default_value_t = 6)]
    pub length: usize,

    /// Steps per run
    #[arg(long, short = 's', default_value_t = 40)]
    pub steps: usize,

    /// Fixed actuation noise for all runs (defaults to each run's observation noise)
    #[arg(long)]
    pub actuation_noise: Option<String>,

    /// New world and agent for every run instead of one accumulating agent
    #[arg(long)]
    pub fresh: bool,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,

    #[command(flatten)]
    pub common: CommonConfig,
}

pub fn execute(args: SweepArgs) -> Result<()> {
    let actuation_noise = match args.actuation_noise.as_deref() {
        Some(raw) => Some(parse_noise(Some(raw), NoiseLevel::NONE)?),
        None => None,
    };

    let config = SweepConfig {
        world_length: args.length,
        steps: args.steps,
        actuation_noise,
        fresh_agent_per_run: args.fresh,
        seed: args.common.seed,
        ..SweepConfig::for_variant(args.variant)
    };

    let mut sweep = Sweep::new(config);
    if args.progress && !args.common.json {
        sweep = sweep.with_observer(Box::new(ProgressObserver::new()));
    }
    let result = sweep.run()?;

    if args.common.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    for report in &result.runs {
        print_section(&format!(
            "Running the simulation with {} strategy and {:.0}% noise",
            report.strategy,
            report.noise_observation * 100.0
        ));
        print_run_report(report, false);
    }
    println!();
    print_kv(
        "Mean accuracy",
        &format!("{:.1}%", result.mean_accuracy() * 100.0),
    );

    Ok(())
}
