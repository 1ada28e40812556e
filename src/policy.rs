//! Movement policy driven by neighbour uncertainty.
//!
//! The engine is a small state machine:
//!
//! - edge forcing: at either end of the strip the only legal move points
//!   inward; this overrides everything else, including exploration
//! - exploring: while an exploration budget remains, move uniformly at random
//!   and spend one unit of budget per such step
//! - normal: compare the two neighbours' decision signals under the run's
//!   [`Strategy`], breaking ties with a fair coin
//!
//! Once the exploration budget is spent the engine stays in the normal phase
//! for the rest of the agent's life.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    ports::{BeliefModel, Signal},
    types::{Direction, Strategy},
};

/// How each neighbour's score is formed from the two raw neighbour signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode")]
pub enum NeighborWeighting {
    /// Each side is scored by its own signal.
    #[default]
    Independent,
    /// Each side is scored `near * own + far * other`.
    Blended { near: f64, far: f64 },
}

impl NeighborWeighting {
    /// The 0.6/0.4 blend favouring the side being evaluated.
    pub const DEFAULT_BLEND: NeighborWeighting = NeighborWeighting::Blended {
        near: 0.6,
        far: 0.4,
    };

    fn score(&self, own: f64, other: f64) -> f64 {
        match *self {
            NeighborWeighting::Independent => own,
            NeighborWeighting::Blended { near, far } => near * own + far * other,
        }
    }
}

/// Current phase of the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyPhase {
    Exploring { remaining: usize },
    Normal,
}

/// Why a direction was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    EdgeForced,
    Exploring,
    Preferred,
    TieBreak,
}

/// Raw decision, before actuation noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub direction: Direction,
    pub reason: DecisionReason,
}

/// Decision rule shared by every belief family.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyEngine {
    weighting: NeighborWeighting,
    phase: PolicyPhase,
}

impl PolicyEngine {
    /// Engine with `exploration_steps` random moves before belief-driven ones.
    pub fn new(exploration_steps: usize, weighting: NeighborWeighting) -> Self {
        let phase = if exploration_steps > 0 {
            PolicyPhase::Exploring {
                remaining: exploration_steps,
            }
        } else {
            PolicyPhase::Normal
        };
        Self { weighting, phase }
    }

    pub fn phase(&self) -> PolicyPhase {
        self.phase
    }

    pub fn weighting(&self) -> NeighborWeighting {
        self.weighting
    }

    /// Choose a raw direction for an agent at `position`.
    pub fn decide<R: Rng + ?Sized>(
        &mut self,
        beliefs: &dyn BeliefModel,
        position: usize,
        strategy: Strategy,
        rng: &mut R,
    ) -> Decision {
        let length = beliefs.len();
        if position == 0 {
            return Decision {
                direction: Direction::Right,
                reason: DecisionReason::EdgeForced,
            };
        }
        if position + 1 >= length {
            return Decision {
                direction: Direction::Left,
                reason: DecisionReason::EdgeForced,
            };
        }

        if let PolicyPhase::Exploring { remaining } = self.phase {
            let remaining = remaining.saturating_sub(1);
            self.phase = if remaining == 0 {
                PolicyPhase::Normal
            } else {
                PolicyPhase::Exploring { remaining }
            };
            return Decision {
                direction: coin_flip(rng),
                reason: DecisionReason::Exploring,
            };
        }

        self.compare_neighbors(beliefs, position, strategy, rng)
    }

    fn compare_neighbors<R: Rng + ?Sized>(
        &self,
        beliefs: &dyn BeliefModel,
        position: usize,
        strategy: Strategy,
        rng: &mut R,
    ) -> Decision {
        let here = position as isize;
        let left_raw = beliefs.uncertainty_at(here - 1);
        let right_raw = beliefs.uncertainty_at(here + 1);

        // Edge forcing in `decide` keeps both neighbours on the strip.
        debug_assert!(left_raw.is_finite() && right_raw.is_finite());

        let left = self.weighting.score(left_raw, right_raw);
        let right = self.weighting.score(right_raw, left_raw);

        // Normalise to "risk": larger means less known.
        let (left_risk, right_risk) = match beliefs.signal() {
            Signal::Uncertainty => (left, right),
            Signal::Certainty => (-left, -right),
        };

        let toward_lower = if left_risk < right_risk {
            Some(Direction::Left)
        } else if right_risk < left_risk {
            Some(Direction::Right)
        } else {
            None
        };

        match (toward_lower, strategy) {
            (Some(direction), Strategy::Cautious) => preferred(direction),
            (Some(direction), Strategy::Adventurous) => preferred(direction.reversed()),
            (None, _) => Decision {
                direction: coin_flip(rng),
                reason: DecisionReason::TieBreak,
            },
        }
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new(0, NeighborWeighting::Independent)
    }
}

fn preferred(direction: Direction) -> Decision {
    Decision {
        direction,
        reason: DecisionReason::Preferred,
    }
}

/// Fair coin over the two directions; heads moves left.
pub fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    if rng.random_bool(0.5) {
        Direction::Left
    } else {
        Direction::Right
    }
}
