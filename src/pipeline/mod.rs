//! Batch execution of simulation runs
//!
//! This module provides:
//! - A sweep over the enumerated (noise level x strategy) configuration list
//! - Observer adapters for progress display and step recording

pub mod observers;
pub mod sweep;

pub use observers::{ProgressObserver, StepRecorder};
pub use sweep::{Sweep, SweepConfig, SweepResult};

pub use crate::ports::Observer;
