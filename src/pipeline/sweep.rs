//! Sweep over noise levels and strategies

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    Error, Result,
    agent::{Agent, RunConfig, StepRecord},
    app::{AgentConfig, Variant},
    ports::Observer,
    report::RunReport,
    types::{NoiseLevel, Strategy},
    world::Environment,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Tiles in the world
    pub world_length: usize,

    /// Steps per run
    pub steps: usize,

    /// Agent settings shared by every run
    pub agent: AgentConfig,

    /// Observation noise levels, outer loop
    pub noise_levels: Vec<NoiseLevel>,

    /// Strategies, inner loop
    pub strategies: Vec<Strategy>,

    /// Fixed actuation noise; `None` reuses the run's observation level
    pub actuation_noise: Option<NoiseLevel>,

    /// Build a new world and agent for every run instead of accumulating beliefs
    pub fresh_agent_per_run: bool,

    /// Random seed
    pub seed: Option<u64>,
}

impl SweepConfig {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            agent: variant.agent_config(),
            ..Self::default()
        }
    }

    /// The enumerated run list, noise-major.
    pub fn runs(&self) -> Vec<RunConfig> {
        self.noise_levels
            .iter()
            .flat_map(|&noise| {
                self.strategies.iter().map(move |&strategy| {
                    RunConfig::new(self.steps, strategy)
                        .with_observation_noise(noise)
                        .with_actuation_noise(self.actuation_noise.unwrap_or(noise))
                })
            })
            .collect()
    }

    fn validate(&self) -> Result<()> {
        if self.world_length == 0 {
            return Err(Error::InvalidConfiguration {
                message: "world length must be positive".to_string(),
            });
        }
        if self.noise_levels.is_empty() || self.strategies.is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "a sweep needs at least one noise level and one strategy".to_string(),
            });
        }
        if let Some(position) = self.agent.initial_position
            && position >= self.world_length
        {
            return Err(Error::PositionOutOfBounds {
                position,
                length: self.world_length,
            });
        }
        Ok(())
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            world_length: 6,
            steps: 40,
            agent: AgentConfig::default(),
            noise_levels: NoiseLevel::all().to_vec(),
            strategies: Strategy::ALL.to_vec(),
            actuation_noise: None,
            fresh_agent_per_run: false,
            seed: None,
        }
    }
}

/// Reports of every run in a sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    pub runs: Vec<RunReport>,
}

impl SweepResult {
    pub fn mean_accuracy(&self) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        self.runs.iter().map(RunReport::accuracy).sum::<f64>() / self.runs.len() as f64
    }
}

/// Runs the configuration list against one or more agents
pub struct Sweep {
    config: SweepConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl Sweep {
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the sweep
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Execute every run in order.
    ///
    /// In shared mode one world and one agent carry their state from run to
    /// run; in fresh mode each run starts from a new world and empty beliefs.
    pub fn run(&mut self) -> Result<SweepResult> {
        self.config.validate()?;
        let runs = self.config.runs();
        let mut rng = build_rng(self.config.seed);

        for observer in &mut self.observers {
            observer.on_sweep_start(runs.len())?;
        }

        let mut agent = self.spawn_agent(&mut rng)?;
        let mut reports = Vec::with_capacity(runs.len());

        for (run_index, run) in runs.iter().enumerate() {
            if self.config.fresh_agent_per_run && run_index > 0 {
                agent = self.spawn_agent(&mut rng)?;
            }

            for observer in &mut self.observers {
                observer.on_run_start(run_index, run)?;
            }

            let summary = {
                let mut fanout = Fanout(&mut self.observers);
                agent.run_observed(run, &mut rng, &mut fanout)?
            };

            for observer in &mut self.observers {
                observer.on_run_end(run_index, &summary)?;
            }

            let report = RunReport::capture(&agent, run, summary)?;
            info!(
                run = run_index,
                strategy = %run.strategy,
                noise = %run.noise_observation,
                accuracy = report.accuracy(),
                "sweep run finished"
            );
            reports.push(report);
        }

        for observer in &mut self.observers {
            observer.on_sweep_end()?;
        }

        Ok(SweepResult { runs: reports })
    }

    fn spawn_agent(&self, rng: &mut StdRng) -> Result<Agent> {
        let world = Environment::random(self.config.world_length, rng)?;
        Agent::new(world, &self.config.agent, rng)
    }
}

/// Forwards step events to every registered observer.
struct Fanout<'a>(&'a mut [Box<dyn Observer>]);

impl Observer for Fanout<'_> {
    fn on_step(&mut self, record: &StepRecord) -> Result<()> {
        for observer in self.0.iter_mut() {
            observer.on_step(record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::StepRecorder;

    #[test]
    fn default_run_list_is_noise_major() {
        let config = SweepConfig::default();
        let runs = config.runs();
        assert_eq!(runs.len(), 6);
        assert_eq!(runs[0].strategy, Strategy::Cautious);
        assert_eq!(runs[1].strategy, Strategy::Adventurous);
        assert_eq!(runs[2].noise_observation, NoiseLevel::LOW);
        assert!(runs.iter().all(|r| r.noise_actuation == r.noise_observation));
    }

    #[test]
    fn fixed_actuation_noise_overrides_matching() {
        let config = SweepConfig {
            actuation_noise: Some(NoiseLevel::NONE),
            ..SweepConfig::default()
        };
        assert!(config.runs().iter().all(|r| r.noise_actuation.is_zero()));
    }

    #[test]
    fn shared_sweep_accumulates_history() {
        let config = SweepConfig {
            seed: Some(42),
            steps: 10,
            ..SweepConfig::for_variant(Variant::Beta)
        };
        let result = Sweep::new(config).run().unwrap();
        assert_eq!(result.runs.len(), 6);
        for (i, report) in result.runs.iter().enumerate() {
            assert_eq!(report.history.len(), 10 * (i + 1));
            assert_eq!(report.labels, result.runs[0].labels);
            assert_eq!(report.model, "beta");
        }
    }

    #[test]
    fn fresh_sweep_resets_agent() {
        let config = SweepConfig {
            seed: Some(7),
            steps: 15,
            fresh_agent_per_run: true,
            ..SweepConfig::for_variant(Variant::Noisy)
        };
        let recorder = StepRecorder::new();
        let result = Sweep::new(config)
            .with_observer(Box::new(recorder.clone()))
            .run()
            .unwrap();
        assert!(result.runs.iter().all(|r| r.history.len() == 15));
        assert_eq!(recorder.len(), 6 * 15);
        let last_run = recorder.records().last().map(|(run, _)| *run);
        assert_eq!(last_run, Some(5));
    }

    #[test]
    fn seeded_sweeps_are_reproducible() {
        let config = SweepConfig {
            seed: Some(1234),
            ..SweepConfig::for_variant(Variant::Weighted)
        };
        let first = Sweep::new(config.clone()).run().unwrap();
        let second = Sweep::new(config).run().unwrap();
        for (a, b) in first.runs.iter().zip(&second.runs) {
            assert_eq!(a.history, b.history);
            assert_eq!(a.labels, b.labels);
            assert_eq!(a.summary, b.summary);
        }
    }

    #[test]
    fn empty_run_list_is_rejected() {
        let config = SweepConfig {
            strategies: Vec::new(),
            ..SweepConfig::default()
        };
        assert!(matches!(
            Sweep::new(config).run(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
