//! The hidden tile world the agent explores.

use std::sync::Arc;

use rand::Rng;
use serde::{Serialize, Serializer};

use crate::{Error, Result, types::Label};

/// Immutable strip of black and white tiles.
///
/// Labels are shared behind an `Arc`, so clones are cheap and several agents
/// (or an oracle-scaled belief model) can read the same ground truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    labels: Arc<[Label]>,
}

impl Environment {
    /// Draw `length` independent uniform labels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `length` is zero.
    pub fn random<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Result<Self> {
        if length == 0 {
            return Err(Error::InvalidConfiguration {
                message: "world length must be positive".to_string(),
            });
        }
        let labels: Vec<Label> = (0..length)
            .map(|_| if rng.random::<bool>() { Label::White } else { Label::Black })
            .collect();
        Ok(Self {
            labels: labels.into(),
        })
    }

    /// Build a world from explicit labels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `labels` is empty.
    pub fn from_labels(labels: Vec<Label>) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "world length must be positive".to_string(),
            });
        }
        Ok(Self {
            labels: labels.into(),
        })
    }

    /// Build a world from a 0/1 encoding.
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        Self::from_labels(bits.iter().copied().map(Label::from_bit).collect())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the strip has no tiles; construction rejects that case.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Ground-truth label of a tile. Panics on an out-of-range index.
    pub fn label(&self, position: usize) -> Label {
        self.labels[position]
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Labels as 0/1 bits, the form the reporting side prints.
    pub fn bits(&self) -> Vec<u8> {
        self.labels.iter().map(|label| label.bit()).collect()
    }
}

impl Serialize for Environment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.bits().serialize(serializer)
    }
}
