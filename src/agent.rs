//! The agent and its sense -> decide -> act loop.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Error, Result,
    app::AgentConfig,
    channel::{ActuationChannel, ObservationChannel},
    policy::{Decision, DecisionReason, PolicyEngine, PolicyPhase},
    ports::{BeliefModel, NoopObserver, Observer},
    types::{Direction, Label, NoiseLevel, Strategy},
    world::Environment,
};

/// Parameters of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub steps: usize,
    pub strategy: Strategy,
    pub noise_observation: NoiseLevel,
    pub noise_actuation: NoiseLevel,
}

impl RunConfig {
    /// Noise-free run.
    pub fn new(steps: usize, strategy: Strategy) -> Self {
        Self {
            steps,
            strategy,
            noise_observation: NoiseLevel::NONE,
            noise_actuation: NoiseLevel::NONE,
        }
    }

    pub fn with_observation_noise(mut self, noise: NoiseLevel) -> Self {
        self.noise_observation = noise;
        self
    }

    pub fn with_actuation_noise(mut self, noise: NoiseLevel) -> Self {
        self.noise_actuation = noise;
        self
    }

    /// Build a run from raw names and probabilities.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStrategy`] for an unknown strategy name and
    /// [`Error::InvalidNoiseLevel`] for an unsupported noise level.
    pub fn parse(
        steps: usize,
        strategy: &str,
        noise_observation: f64,
        noise_actuation: f64,
    ) -> Result<Self> {
        Ok(Self {
            steps,
            strategy: strategy.parse()?,
            noise_observation: NoiseLevel::new(noise_observation)?,
            noise_actuation: NoiseLevel::new(noise_actuation)?,
        })
    }
}

/// Everything that happened during one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub position: usize,
    pub truth: Label,
    pub observed: Label,
    pub decision: Decision,
    pub effective: Direction,
    pub next_position: usize,
}

impl StepRecord {
    pub fn observation_flipped(&self) -> bool {
        self.truth != self.observed
    }

    pub fn actuation_flipped(&self) -> bool {
        self.decision.direction != self.effective
    }
}

/// Aggregate statistics of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: usize,
    pub start_position: usize,
    pub final_position: usize,
    pub observation_flips: usize,
    pub actuation_flips: usize,
    pub decisions: BTreeMap<DecisionReason, usize>,
}

impl RunSummary {
    fn new(start_position: usize) -> Self {
        Self {
            steps: 0,
            start_position,
            final_position: start_position,
            observation_flips: 0,
            actuation_flips: 0,
            decisions: BTreeMap::new(),
        }
    }

    fn record(&mut self, record: &StepRecord) {
        self.steps += 1;
        self.final_position = record.next_position;
        self.observation_flips += usize::from(record.observation_flipped());
        self.actuation_flips += usize::from(record.actuation_flipped());
        *self.decisions.entry(record.decision.reason).or_insert(0) += 1;
    }

    /// How many raw decisions were made for `reason`.
    pub fn decisions_for(&self, reason: DecisionReason) -> usize {
        self.decisions.get(&reason).copied().unwrap_or(0)
    }
}

/// A single agent exploring an [`Environment`].
///
/// The agent exclusively owns its position, history, policy state and belief
/// model; the environment is only read.
#[derive(Debug)]
pub struct Agent {
    environment: Environment,
    position: usize,
    beliefs: Box<dyn BeliefModel>,
    policy: PolicyEngine,
    history: Vec<usize>,
}

impl Agent {
    /// Create an agent; without a configured start it is placed uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionOutOfBounds`] if the configured start lies
    /// outside the world.
    pub fn new<R: Rng + ?Sized>(
        environment: Environment,
        config: &AgentConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let length = environment.len();
        let position = match config.initial_position {
            Some(position) if position >= length => {
                return Err(Error::PositionOutOfBounds { position, length });
            }
            Some(position) => position,
            None => rng.random_range(0..length),
        };
        let beliefs = config.model.build(&environment);
        Ok(Self {
            environment,
            position,
            beliefs,
            policy: PolicyEngine::new(config.exploration_steps, config.weighting),
            history: Vec::new(),
        })
    }

    /// Run `config.steps` iterations of sense -> update -> decide -> act.
    pub fn run<R: Rng + ?Sized>(&mut self, config: &RunConfig, rng: &mut R) -> Result<RunSummary> {
        self.run_observed(config, rng, &mut NoopObserver)
    }

    /// Like [`Agent::run`], reporting every step to `observer`.
    pub fn run_observed<R: Rng + ?Sized>(
        &mut self,
        config: &RunConfig,
        rng: &mut R,
        observer: &mut dyn Observer,
    ) -> Result<RunSummary> {
        let sensor = ObservationChannel::new(config.noise_observation);
        let motor = ActuationChannel::new(config.noise_actuation);
        let mut summary = RunSummary::new(self.position);

        for step in 0..config.steps {
            let record = self.step(step, config.strategy, &sensor, &motor, rng);
            debug!(
                step,
                position = record.position,
                observed = record.observed.bit(),
                direction = record.decision.direction.offset(),
                reason = ?record.decision.reason,
                effective = record.effective.offset(),
                "step"
            );
            summary.record(&record);
            observer.on_step(&record)?;
        }

        info!(
            strategy = %config.strategy,
            steps = summary.steps,
            final_position = summary.final_position,
            observation_flips = summary.observation_flips,
            actuation_flips = summary.actuation_flips,
            model = self.beliefs.name(),
            "run complete"
        );
        Ok(summary)
    }

    /// String-based entry point; every argument is validated before any state changes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStrategy`] or [`Error::InvalidNoiseLevel`].
    pub fn run_named<R: Rng + ?Sized>(
        &mut self,
        steps: usize,
        strategy: &str,
        noise_observation: f64,
        noise_actuation: f64,
        rng: &mut R,
    ) -> Result<RunSummary> {
        let config = RunConfig::parse(steps, strategy, noise_observation, noise_actuation)?;
        self.run(&config, rng)
    }

    fn step<R: Rng + ?Sized>(
        &mut self,
        step: usize,
        strategy: Strategy,
        sensor: &ObservationChannel,
        motor: &ActuationChannel,
        rng: &mut R,
    ) -> StepRecord {
        let position = self.position;
        let truth = self.environment.label(position);
        let observed = sensor.observe(truth, rng);
        self.beliefs.update(position, observed);
        self.history.push(position);

        let decision = self
            .policy
            .decide(self.beliefs.as_ref(), position, strategy, rng);
        let effective = motor.act(decision.direction, rng);
        self.position = effective.apply(position, self.environment.len());

        StepRecord {
            step,
            position,
            truth,
            observed,
            decision,
            effective,
            next_position: self.position,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Positions sensed so far, one per step, across all runs.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn beliefs(&self) -> &dyn BeliefModel {
        self.beliefs.as_ref()
    }

    pub fn policy_phase(&self) -> PolicyPhase {
        self.policy.phase()
    }

    /// Probability that the tile at `position` is white.
    pub fn belief_mean(&self, position: usize) -> f64 {
        self.beliefs.mean(position)
    }

    /// Decision signal at `position`; `+inf` off the strip.
    pub fn belief_uncertainty(&self, position: isize) -> f64 {
        self.beliefs.uncertainty_at(position)
    }

    /// Reporting variance at `position`.
    pub fn belief_variance(&self, position: usize) -> f64 {
        self.beliefs.variance(position)
    }
}
