//! Shared configuration types for CLI commands

use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::types::NoiseLevel;

/// Common configuration shared across commands
#[derive(Args, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonConfig {
    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Parse an optional noise flag such as `0.1` or `40%`.
pub(crate) fn parse_noise(value: Option<&str>, fallback: NoiseLevel) -> Result<NoiseLevel> {
    match value {
        Some(raw) => Ok(raw.parse::<NoiseLevel>()?),
        None => Ok(fallback),
    }
}
