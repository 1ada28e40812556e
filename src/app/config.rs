//! Configuration types for agent creation.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    beliefs::{ModelKind, OracleMode},
    policy::NeighborWeighting,
    types::NoiseLevel,
};

/// Exploration budget used by the histogram preset.
pub const DEFAULT_EXPLORATION_STEPS: usize = 30;

/// Configuration for creating an [`crate::agent::Agent`].
///
/// # Examples
///
/// ```
/// use tileworld::app::AgentConfig;
/// use tileworld::beliefs::ModelKind;
/// use tileworld::policy::NeighborWeighting;
///
/// let config = AgentConfig::new(ModelKind::Certainty)
///     .with_initial_position(3)
///     .with_exploration_steps(30)
///     .with_weighting(NeighborWeighting::DEFAULT_BLEND);
/// assert_eq!(config.exploration_steps, 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Belief representation and estimator family
    pub model: ModelKind,
    /// Starting tile; `None` draws one uniformly
    pub initial_position: Option<usize>,
    /// Random moves before uncertainty-driven ones
    pub exploration_steps: usize,
    /// How neighbour signals are combined
    pub weighting: NeighborWeighting,
}

impl AgentConfig {
    /// Create a configuration with the given belief family.
    ///
    /// Uses default values for other parameters:
    /// - Initial position: random
    /// - Exploration: none
    /// - Weighting: independent neighbours
    pub fn new(model: ModelKind) -> Self {
        Self {
            model,
            initial_position: None,
            exploration_steps: 0,
            weighting: NeighborWeighting::Independent,
        }
    }

    pub fn with_initial_position(mut self, position: usize) -> Self {
        self.initial_position = Some(position);
        self
    }

    pub fn with_exploration_steps(mut self, steps: usize) -> Self {
        self.exploration_steps = steps;
        self
    }

    pub fn with_weighting(mut self, weighting: NeighborWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Remove any ground-truth access from the belief model.
    pub fn belief_only(mut self) -> Self {
        self.model = self.model.belief_only();
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Variant::default().agent_config()
    }
}

/// Named presets pairing a belief family with policy defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Count histogram with max-count certainty and a 30-step random exploration phase
    Histogram,
    /// Count histogram with Beta-posterior variance
    #[default]
    Noisy,
    /// Binomial variance scaled by the hidden truth, 0.6/0.4 neighbour blending
    Weighted,
    /// Beta(alpha, beta) parameters with exact Beta variance
    Beta,
}

impl Variant {
    pub fn agent_config(self) -> AgentConfig {
        match self {
            Variant::Histogram => AgentConfig::new(ModelKind::Certainty)
                .with_exploration_steps(DEFAULT_EXPLORATION_STEPS),
            Variant::Noisy => AgentConfig::new(ModelKind::PosteriorVariance),
            Variant::Weighted => AgentConfig::new(ModelKind::Binomial {
                oracle: OracleMode::GroundTruthScaled,
            })
            .with_weighting(NeighborWeighting::DEFAULT_BLEND),
            Variant::Beta => AgentConfig::new(ModelKind::Beta),
        }
    }

    /// Noise levels a single run uses when none are given: `(observation, actuation)`.
    pub fn default_noise(self) -> (NoiseLevel, NoiseLevel) {
        match self {
            Variant::Histogram => (NoiseLevel::NONE, NoiseLevel::NONE),
            Variant::Noisy => (NoiseLevel::NONE, NoiseLevel::NONE),
            Variant::Weighted => (NoiseLevel::LOW, NoiseLevel::LOW),
            Variant::Beta => (NoiseLevel::LOW, NoiseLevel::NONE),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Variant::Histogram => "histogram",
            Variant::Noisy => "noisy",
            Variant::Weighted => "weighted",
            Variant::Beta => "beta",
        };
        f.write_str(label)
    }
}
