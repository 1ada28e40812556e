//! Histogram beliefs: black/white observation counts per cell.

use serde::{Deserialize, Serialize};

use crate::{
    ports::{
        BeliefModel, CellCounts, Signal,
        belief::{MAX_UNCERTAINTY, UNOBSERVED_CERTAINTY},
    },
    types::Label,
    world::Environment,
};

/// Estimator family applied to the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountEstimator {
    /// `mean*(1-mean)/max(1,n)` around the empirical mean.
    Binomial,
    /// `m*(1-m)/(n+1)` with `m` the Beta(w+1, b+1) posterior mean.
    PosteriorVariance,
    /// `max(b,w)/n`, higher meaning more certain.
    Certainty,
}

/// Whether the binomial signal may look at the hidden world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OracleMode {
    /// Signal depends on observation counts only.
    #[default]
    BeliefOnly,
    /// Signal is scaled by `|truth - mean|`, reading the ground truth directly.
    GroundTruthScaled,
}

/// Count-form belief model.
#[derive(Debug, Clone)]
pub struct CountBeliefs {
    cells: Vec<CellCounts>,
    estimator: CountEstimator,
    oracle: Option<Environment>,
}

impl CountBeliefs {
    /// Empty histograms for `length` cells.
    pub fn new(length: usize, estimator: CountEstimator) -> Self {
        Self {
            cells: vec![CellCounts::default(); length],
            estimator,
            oracle: None,
        }
    }

    /// Let the binomial signal read the hidden labels of `environment`.
    ///
    /// This gives the policy information a real sensor could not provide;
    /// it only affects [`CountEstimator::Binomial`].
    pub fn with_oracle(mut self, environment: Environment) -> Self {
        self.oracle = Some(environment);
        self
    }

    pub fn estimator(&self) -> CountEstimator {
        self.estimator
    }

    pub fn oracle_mode(&self) -> OracleMode {
        match (&self.oracle, self.estimator) {
            (Some(_), CountEstimator::Binomial) => OracleMode::GroundTruthScaled,
            _ => OracleMode::BeliefOnly,
        }
    }

    fn cell(&self, position: usize) -> CellCounts {
        self.cells.get(position).copied().unwrap_or_default()
    }

    fn binomial_variance(&self, position: usize) -> f64 {
        let mean = self.mean(position);
        let total = self.cell(position).total().max(1) as f64;
        mean * (1.0 - mean) / total
    }
}

impl BeliefModel for CountBeliefs {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn update(&mut self, position: usize, observed: Label) {
        if let Some(cell) = self.cells.get_mut(position) {
            match observed {
                Label::Black => cell.black += 1,
                Label::White => cell.white += 1,
            }
        }
    }

    fn counts(&self, position: usize) -> CellCounts {
        self.cell(position)
    }

    fn mean(&self, position: usize) -> f64 {
        let cell = self.cell(position);
        match cell.total() {
            0 => 0.5,
            total => cell.white as f64 / total as f64,
        }
    }

    fn uncertainty(&self, position: usize) -> f64 {
        let cell = self.cell(position);
        match self.estimator {
            CountEstimator::Binomial => {
                let variance = self.binomial_variance(position);
                match &self.oracle {
                    Some(world) if position < world.len() => {
                        let truth = f64::from(world.label(position).bit());
                        variance * (truth - self.mean(position)).abs()
                    }
                    _ => variance,
                }
            }
            CountEstimator::PosteriorVariance => {
                if cell.total() == 0 {
                    return MAX_UNCERTAINTY;
                }
                let n = cell.total() as f64;
                let posterior_mean = (cell.white as f64 + 1.0) / (n + 2.0);
                posterior_mean * (1.0 - posterior_mean) / (n + 1.0)
            }
            CountEstimator::Certainty => match cell.total() {
                0 => UNOBSERVED_CERTAINTY,
                total => cell.black.max(cell.white) as f64 / total as f64,
            },
        }
    }

    fn variance(&self, position: usize) -> f64 {
        match self.estimator {
            CountEstimator::Certainty => self.binomial_variance(position),
            _ => self.uncertainty(position),
        }
    }

    fn signal(&self) -> Signal {
        match self.estimator {
            CountEstimator::Certainty => Signal::Certainty,
            _ => Signal::Uncertainty,
        }
    }

    fn name(&self) -> &'static str {
        match (self.estimator, self.oracle_mode()) {
            (CountEstimator::Binomial, OracleMode::GroundTruthScaled) => "binomial-oracle",
            (CountEstimator::Binomial, OracleMode::BeliefOnly) => "binomial",
            (CountEstimator::PosteriorVariance, _) => "posterior-variance",
            (CountEstimator::Certainty, _) => "certainty",
        }
    }
}
