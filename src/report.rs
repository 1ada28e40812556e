//! Snapshots of an agent's final belief state for reporting collaborators.
//!
//! Nothing here renders or writes files: the reports are plain serde data
//! that printers and plotting tools consume.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use statrs::distribution::{Beta, ContinuousCDF};

use crate::{
    Error, Result,
    agent::{Agent, RunConfig, RunSummary},
    ports::{BeliefModel, CellCounts},
    types::{Label, Strategy},
};

/// Variance substituted for zero when drawing plotting samples.
pub const MIN_SAMPLE_VARIANCE: f64 = 1e-4;

/// Mass of the reported equal-tailed credible interval.
pub const CREDIBLE_MASS: f64 = 0.95;

/// Final belief about one tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellReport {
    pub position: usize,
    pub truth: Label,
    pub black: u64,
    pub white: u64,
    pub mean: f64,
    pub variance: f64,
    /// 95% interval of the Beta(w + 1, b + 1) posterior over "white"
    pub credible_interval: (f64, f64),
}

impl CellReport {
    /// Colour the belief leans toward; `None` when the mean is exactly 0.5.
    pub fn predicted(&self) -> Option<Label> {
        if self.mean > 0.5 {
            Some(Label::White)
        } else if self.mean < 0.5 {
            Some(Label::Black)
        } else {
            None
        }
    }

    pub fn is_correct(&self) -> bool {
        self.predicted() == Some(self.truth)
    }
}

/// Everything a reporter needs about one finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub model: String,
    pub strategy: Strategy,
    pub noise_observation: f64,
    pub noise_actuation: f64,
    pub labels: Vec<u8>,
    pub history: Vec<usize>,
    pub summary: RunSummary,
    pub cells: Vec<CellReport>,
}

impl RunReport {
    /// Snapshot `agent` after a run described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Distribution`] if a posterior cannot be built.
    pub fn capture(agent: &Agent, config: &RunConfig, summary: RunSummary) -> Result<Self> {
        let environment = agent.environment();
        let cells = (0..environment.len())
            .map(|position| cell_report(agent.beliefs(), position, environment.label(position)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            model: agent.beliefs().name().to_string(),
            strategy: config.strategy,
            noise_observation: config.noise_observation.probability(),
            noise_actuation: config.noise_actuation.probability(),
            labels: environment.bits(),
            history: agent.history().to_vec(),
            summary,
            cells,
        })
    }

    /// Share of tiles whose belief leans toward the true colour.
    pub fn accuracy(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        let correct = self.cells.iter().filter(|cell| cell.is_correct()).count();
        correct as f64 / self.cells.len() as f64
    }

    /// Tiles the agent never sensed.
    pub fn unvisited(&self) -> Vec<usize> {
        self.cells
            .iter()
            .filter(|cell| cell.black + cell.white == 0)
            .map(|cell| cell.position)
            .collect()
    }
}

fn cell_report(beliefs: &dyn BeliefModel, position: usize, truth: Label) -> Result<CellReport> {
    let CellCounts { black, white } = beliefs.counts(position);
    Ok(CellReport {
        position,
        truth,
        black,
        white,
        mean: beliefs.mean(position),
        variance: beliefs.variance(position),
        credible_interval: credible_interval(black, white)?,
    })
}

/// Equal-tailed [`CREDIBLE_MASS`] interval of Beta(white + 1, black + 1).
///
/// # Errors
///
/// Returns [`Error::Distribution`] if statrs rejects the parameters.
pub fn credible_interval(black: u64, white: u64) -> Result<(f64, f64)> {
    let posterior = Beta::new(white as f64 + 1.0, black as f64 + 1.0).map_err(|e| {
        Error::Distribution {
            message: e.to_string(),
        }
    })?;
    let tail = (1.0 - CREDIBLE_MASS) / 2.0;
    Ok((posterior.inverse_cdf(tail), posterior.inverse_cdf(1.0 - tail)))
}

/// Normal samples around a belief, for density plots of the final estimates.
///
/// A zero variance is widened to [`MIN_SAMPLE_VARIANCE`] so the density stays drawable.
///
/// # Errors
///
/// Returns [`Error::Distribution`] for a negative or non-finite variance.
pub fn predictive_samples<R: Rng + ?Sized>(
    mean: f64,
    variance: f64,
    size: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let variance = if variance == 0.0 {
        MIN_SAMPLE_VARIANCE
    } else {
        variance
    };
    let normal = Normal::new(mean, variance.sqrt()).map_err(|e| Error::Distribution {
        message: e.to_string(),
    })?;
    Ok((0..size).map(|_| normal.sample(rng)).collect())
}
