//! Newtype wrappers and small enums shared across the simulation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Colour of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Black,
    White,
}

impl Label {
    /// Build a label from its binary encoding (0 = black, anything else = white).
    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 { Label::Black } else { Label::White }
    }

    /// Binary encoding of the label.
    pub fn bit(self) -> u8 {
        match self {
            Label::Black => 0,
            Label::White => 1,
        }
    }

    /// The opposite colour.
    pub fn flipped(self) -> Self {
        match self {
            Label::Black => Label::White,
            Label::White => Label::Black,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bit())
    }
}

/// A unit move along the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Signed offset applied to the position.
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Apply the move to `position`, clamping to `[0, length - 1]`.
    pub fn apply(self, position: usize, length: usize) -> usize {
        let last = length.saturating_sub(1);
        match self {
            Direction::Left => position.saturating_sub(1),
            Direction::Right => (position + 1).min(last),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.offset())
    }
}

/// Movement strategy applied to neighbour uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Head toward the better-known neighbour.
    Cautious,
    /// Head toward the least-known neighbour.
    Adventurous,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Cautious, Strategy::Adventurous];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Strategy::Cautious => "cautious",
            Strategy::Adventurous => "adventurous",
        };
        f.write_str(label)
    }
}

impl FromStr for Strategy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cautious" => Ok(Strategy::Cautious),
            "adventurous" => Ok(Strategy::Adventurous),
            _ => Err(crate::Error::InvalidStrategy {
                name: s.to_string(),
            }),
        }
    }
}

/// Noise levels the simulation accepts for sensing and actuation.
pub const SUPPORTED_NOISE_LEVELS: [f64; 3] = [0.0, 0.1, 0.4];

/// Flip probability for a noisy channel, restricted to [`SUPPORTED_NOISE_LEVELS`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct NoiseLevel(f64);

impl NoiseLevel {
    pub const NONE: NoiseLevel = NoiseLevel(0.0);
    pub const LOW: NoiseLevel = NoiseLevel(0.1);
    pub const HIGH: NoiseLevel = NoiseLevel(0.4);

    /// Create a noise level, validating it against the supported set.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidNoiseLevel`] for any other value.
    pub fn new(value: f64) -> Result<Self, crate::Error> {
        SUPPORTED_NOISE_LEVELS
            .iter()
            .find(|&&level| (level - value).abs() < 1e-9)
            .map(|&level| NoiseLevel(level))
            .ok_or(crate::Error::InvalidNoiseLevel { value })
    }

    /// All supported levels in ascending order.
    pub fn all() -> [NoiseLevel; 3] {
        [NoiseLevel::NONE, NoiseLevel::LOW, NoiseLevel::HIGH]
    }

    /// Probability of flipping a reading or a move.
    pub fn probability(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for NoiseLevel {
    fn default() -> Self {
        NoiseLevel::NONE
    }
}

impl TryFrom<f64> for NoiseLevel {
    type Error = crate::Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        NoiseLevel::new(value)
    }
}

impl From<NoiseLevel> for f64 {
    fn from(level: NoiseLevel) -> Self {
        level.0
    }
}

impl FromStr for NoiseLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = match trimmed.strip_suffix('%') {
            Some(percent) => percent.trim().parse::<f64>().map(|p| p / 100.0),
            None => trimmed.parse::<f64>(),
        }
        .map_err(|_| crate::Error::InvalidConfiguration {
            message: format!("noise level '{s}' is not a number"),
        })?;
        NoiseLevel::new(value)
    }
}

impl fmt::Display for NoiseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("cautious".parse::<Strategy>().unwrap(), Strategy::Cautious);
        assert_eq!(
            " Adventurous ".parse::<Strategy>().unwrap(),
            Strategy::Adventurous
        );
        let err = "greedy".parse::<Strategy>().unwrap_err();
        assert!(
            matches!(err, crate::Error::InvalidStrategy { ref name } if name == "greedy"),
            "unexpected error {err:?}"
        );
    }

    #[test]
    fn test_noise_level_validation() {
        assert!(NoiseLevel::new(0.0).is_ok());
        assert!(NoiseLevel::new(0.1).is_ok());
        assert!(NoiseLevel::new(0.4).is_ok());
        assert!(matches!(
            NoiseLevel::new(0.2),
            Err(crate::Error::InvalidNoiseLevel { .. })
        ));
        assert!(NoiseLevel::new(f64::NAN).is_err());
        assert_eq!("40%".parse::<NoiseLevel>().unwrap(), NoiseLevel::HIGH);
        assert_eq!("0.1".parse::<NoiseLevel>().unwrap(), NoiseLevel::LOW);
        assert!("loud".parse::<NoiseLevel>().is_err());
    }

    #[test]
    fn test_direction_apply_clamps() {
        assert_eq!(Direction::Left.apply(0, 4), 0);
        assert_eq!(Direction::Right.apply(3, 4), 3);
        assert_eq!(Direction::Right.apply(1, 4), 2);
        assert_eq!(Direction::Left.reversed(), Direction::Right);
    }

    #[test]
    fn test_label_flip() {
        assert_eq!(Label::from_bit(0), Label::Black);
        assert_eq!(Label::from_bit(1).flipped(), Label::Black);
        assert_eq!(Label::White.bit(), 1);
    }
}
