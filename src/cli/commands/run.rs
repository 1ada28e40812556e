//! Run command - a single simulation on a fresh random world

use anyhow::Result;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    agent::{Agent, RunConfig},
    app::Variant,
    cli::{
        config::{CommonConfig, parse_noise},
        output::{print_run_report, print_section},
    },
    report::RunReport,
    types::Strategy,
    world::Environment,
};

#[derive(Parser, Debug)]
#[command(about = "Run one agent on a random tile world")]
pub struct RunArgs {
    /// Belief model preset
    #[arg(long, value_enum, default_value_t = Variant::Noisy)]
    pub variant: Variant,

    /// Number of tiles in the world
    #[arg(long, short = 'l', default_value_t = 10)]
    pub length: usize,

    /// Number of simulation steps
    #[arg(long, short = 's', default_value_t = 100)]
    pub steps: usize,

    /// Movement strategy (cautious or adventurous)
    #[arg(long, default_value = "cautious")]
    pub strategy: String,

    /// Observation noise (0.0, 0.1, 0.4 or 0%, 10%, 40%); defaults to the preset
    #[arg(long)]
    pub noise: Option<String>,

    /// Actuation noise; defaults to the preset
    #[arg(long)]
    pub actuation_noise: Option<String>,

    /// Starting tile (random when omitted)
    #[arg(long)]
    pub start: Option<usize>,

    /// Override the preset's exploration budget
    #[arg(long)]
    pub exploration_steps: Option<usize>,

    /// Forbid the belief model from reading the hidden world
    #[arg(long)]
    pub belief_only: bool,

    #[command(flatten)]
    pub common: CommonConfig,
}

impl RunArgs {
    /// Resolve every name and level before anything is simulated.
    fn run_config(&self) -> Result<RunConfig> {
        let strategy: Strategy = self.strategy.parse()?;
        let (default_sense, default_move) = self.variant.default_noise();
        Ok(RunConfig::new(self.steps, strategy)
            .with_observation_noise(parse_noise(self.noise.as_deref(), default_sense)?)
            .with_actuation_noise(parse_noise(
                self.actuation_noise.as_deref(),
                default_move,
            )?))
    }
}

pub fn execute(args: RunArgs) -> Result<()> {
    let run = args.run_config()?;

    let mut agent_config = args.variant.agent_config();
    if let Some(start) = args.start {
        agent_config = agent_config.with_initial_position(start);
    }
    if let Some(steps) = args.exploration_steps {
        agent_config = agent_config.with_exploration_steps(steps);
    }
    if args.belief_only {
        agent_config = agent_config.belief_only();
    }

    let mut rng = match args.common.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let world = Environment::random(args.length, &mut rng)?;
    let mut agent = Agent::new(world, &agent_config, &mut rng)?;
    let summary = agent.run(&run, &mut rng)?;
    let report = RunReport::capture(&agent, &run, summary)?;

    if args.common.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_section(&format!(
            "Running the {} robot with {} strategy",
            args.variant, run.strategy
        ));
        print_run_report(&report, true);
    }

    Ok(())
}
