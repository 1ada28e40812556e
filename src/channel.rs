//! Noisy sensing and actuation channels.

use rand::Rng;

use crate::types::{Direction, Label, NoiseLevel};

/// Corrupts ground-truth reads: with the configured probability the colour is flipped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ObservationChannel {
    noise: NoiseLevel,
}

impl ObservationChannel {
    pub fn new(noise: NoiseLevel) -> Self {
        Self { noise }
    }

    pub fn noise(&self) -> NoiseLevel {
        self.noise
    }

    /// Observe `truth` through the channel. Draws exactly once from `rng`.
    pub fn observe<R: Rng + ?Sized>(&self, truth: Label, rng: &mut R) -> Label {
        if rng.random_bool(self.noise.probability()) {
            truth.flipped()
        } else {
            truth
        }
    }
}

/// Corrupts chosen moves: with the configured probability the direction is reversed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActuationChannel {
    noise: NoiseLevel,
}

impl ActuationChannel {
    pub fn new(noise: NoiseLevel) -> Self {
        Self { noise }
    }

    pub fn noise(&self) -> NoiseLevel {
        self.noise
    }

    /// Effective direction after actuation noise. Draws exactly once from `rng`.
    pub fn act<R: Rng + ?Sized>(&self, direction: Direction, rng: &mut R) -> Direction {
        if rng.random_bool(self.noise.probability()) {
            direction.reversed()
        } else {
            direction
        }
    }
}
