//! Beta-parameter beliefs.
//!
//! Each cell carries a Beta(alpha, beta) posterior over "the tile is white",
//! starting from the uniform prior Beta(1, 1). White readings increment
//! `alpha`, black readings increment `beta`, so the posterior mean
//! `alpha / (alpha + beta)` equals `(w + 1) / (n + 2)`.

use serde::{Deserialize, Serialize};

use crate::{
    ports::{BeliefModel, CellCounts, belief::MAX_UNCERTAINTY},
    types::Label,
};

/// Posterior parameters for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaParams {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaParams {
    /// Uniform prior.
    pub const PRIOR: BetaParams = BetaParams {
        alpha: 1.0,
        beta: 1.0,
    };

    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Variance of the Beta distribution.
    pub fn variance(&self) -> f64 {
        let sum = self.alpha + self.beta;
        (self.alpha * self.beta) / (sum * sum * (sum + 1.0))
    }

    /// Observations folded into the prior.
    pub fn observations(&self) -> u64 {
        (self.alpha + self.beta - 2.0).round() as u64
    }
}

impl Default for BetaParams {
    fn default() -> Self {
        Self::PRIOR
    }
}

/// Beta-form belief model.
#[derive(Debug, Clone)]
pub struct BetaBeliefs {
    cells: Vec<BetaParams>,
}

impl BetaBeliefs {
    pub fn new(length: usize) -> Self {
        Self {
            cells: vec![BetaParams::PRIOR; length],
        }
    }

    /// Posterior parameters of a cell; the prior for out-of-range positions.
    pub fn params(&self, position: usize) -> BetaParams {
        self.cells.get(position).copied().unwrap_or_default()
    }
}

impl BeliefModel for BetaBeliefs {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn update(&mut self, position: usize, observed: Label) {
        if let Some(cell) = self.cells.get_mut(position) {
            match observed {
                Label::White => cell.alpha += 1.0,
                Label::Black => cell.beta += 1.0,
            }
        }
    }

    fn counts(&self, position: usize) -> CellCounts {
        let params = self.params(position);
        CellCounts {
            black: (params.beta - 1.0).round() as u64,
            white: (params.alpha - 1.0).round() as u64,
        }
    }

    fn mean(&self, position: usize) -> f64 {
        self.params(position).mean()
    }

    fn uncertainty(&self, position: usize) -> f64 {
        let params = self.params(position);
        if params.observations() == 0 {
            return MAX_UNCERTAINTY;
        }
        params.variance()
    }

    fn name(&self) -> &'static str {
        "beta"
    }
}
