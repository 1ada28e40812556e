//! Belief port - capability interface for per-cell colour estimates
//!
//! Every belief representation (count histograms, Beta parameters) exposes
//! the same three capabilities: accumulate an observation, report the mean
//! probability that a cell is white, and report a scalar decision signal
//! derived only from the current per-cell state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Label;

/// Upper bound of the variance-style signals, returned for unobserved cells.
pub const MAX_UNCERTAINTY: f64 = 0.25;

/// Certainty reported for a cell that has never been observed.
pub const UNOBSERVED_CERTAINTY: f64 = 0.5;

/// How the policy should read the decision signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Larger values mean a less reliable belief.
    Uncertainty,
    /// Larger values mean a more reliable belief.
    Certainty,
}

/// Observation evidence accumulated for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    pub black: u64,
    pub white: u64,
}

impl CellCounts {
    pub fn total(&self) -> u64 {
        self.black + self.white
    }
}

/// Per-cell belief state plus the estimators derived from it.
///
/// Implementations only ever increment their state; `mean`, `uncertainty`
/// and `variance` are pure functions of it.
pub trait BeliefModel: Send + fmt::Debug {
    /// Number of cells tracked.
    fn len(&self) -> usize;

    /// Record one observed label. Out-of-range positions are ignored.
    fn update(&mut self, position: usize, observed: Label);

    /// Observation counts behind a cell's belief.
    fn counts(&self, position: usize) -> CellCounts;

    /// Probability that the cell is white.
    fn mean(&self, position: usize) -> f64;

    /// Decision signal for an in-range cell; see [`BeliefModel::signal`] for its sense.
    fn uncertainty(&self, position: usize) -> f64;

    /// Spread of the estimate for reporting.
    fn variance(&self, position: usize) -> f64 {
        self.uncertainty(position)
    }

    /// Sense of the value returned by [`BeliefModel::uncertainty`].
    fn signal(&self) -> Signal {
        Signal::Uncertainty
    }

    /// Short name of the estimator family.
    fn name(&self) -> &'static str;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decision signal for a possibly off-strip neighbour; `+inf` off either end.
    fn uncertainty_at(&self, position: isize) -> f64 {
        match usize::try_from(position) {
            Ok(index) if index < self.len() => self.uncertainty(index),
            _ => f64::INFINITY,
        }
    }

    /// Total observations folded into the model.
    fn total_observations(&self) -> u64 {
        (0..self.len()).map(|position| self.counts(position).total()).sum()
    }
}
