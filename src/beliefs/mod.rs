//! Belief models over tile colours.
//!
//! Two representations implement [`BeliefModel`]:
//! - [`CountBeliefs`]: black/white observation histograms with a choice of
//!   estimator family (binomial variance, Beta-posterior variance, or
//!   max-count certainty)
//! - [`BetaBeliefs`]: Beta(alpha, beta) parameters starting from the uniform
//!   prior
//!
//! [`ModelKind`] picks one family per agent; families are never mixed within
//! a run.

pub mod beta;
pub mod counts;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use beta::BetaBeliefs;
pub use counts::{CountBeliefs, CountEstimator, OracleMode};

use crate::{ports::BeliefModel, world::Environment};

/// Selector for the belief representation and estimator family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "family")]
pub enum ModelKind {
    /// Count form, `mean*(1-mean)/max(1,n)`, optionally scaled by the hidden truth.
    Binomial { oracle: OracleMode },
    /// Count form, variance of the Beta(w+1, b+1) posterior mean proxy.
    PosteriorVariance,
    /// Count form, `max(b,w)/n` certainty.
    Certainty,
    /// Beta form, exact Beta variance.
    Beta,
}

impl ModelKind {
    /// Build an empty belief model sized for `environment`.
    ///
    /// The environment is only retained when the binomial family runs with
    /// [`OracleMode::GroundTruthScaled`].
    pub fn build(&self, environment: &Environment) -> Box<dyn BeliefModel> {
        let length = environment.len();
        match *self {
            ModelKind::Binomial { oracle } => {
                let beliefs = CountBeliefs::new(length, CountEstimator::Binomial);
                match oracle {
                    OracleMode::BeliefOnly => Box::new(beliefs),
                    OracleMode::GroundTruthScaled => {
                        Box::new(beliefs.with_oracle(environment.clone()))
                    }
                }
            }
            ModelKind::PosteriorVariance => Box::new(CountBeliefs::new(
                length,
                CountEstimator::PosteriorVariance,
            )),
            ModelKind::Certainty => {
                Box::new(CountBeliefs::new(length, CountEstimator::Certainty))
            }
            ModelKind::Beta => Box::new(BetaBeliefs::new(length)),
        }
    }

    /// Drop oracle access, leaving every other choice untouched.
    pub fn belief_only(self) -> Self {
        match self {
            ModelKind::Binomial { .. } => ModelKind::Binomial {
                oracle: OracleMode::BeliefOnly,
            },
            other => other,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ModelKind::Binomial {
                oracle: OracleMode::BeliefOnly,
            } => "binomial",
            ModelKind::Binomial {
                oracle: OracleMode::GroundTruthScaled,
            } => "binomial-oracle",
            ModelKind::PosteriorVariance => "posterior-variance",
            ModelKind::Certainty => "certainty",
            ModelKind::Beta => "beta",
        };
        f.write_str(label)
    }
}
