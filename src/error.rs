//! Error types for the tileworld crate

use thiserror::Error;

/// Main error type for the tileworld crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("unknown strategy '{name}' (expected 'cautious' or 'adventurous')")]
    InvalidStrategy { name: String },

    #[error("noise level {value} is not supported (expected one of 0.0, 0.1, 0.4)")]
    InvalidNoiseLevel { value: f64 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("position {position} is out of bounds for a world of length {length}")]
    PositionOutOfBounds { position: usize, length: usize },

    #[error("distribution error: {message}")]
    Distribution { message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
