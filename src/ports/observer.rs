//! Observer port - hooks into simulation runs
//!
//! Observers see every step of a run without the loop knowing how the data is
//! used (progress bars, structured logs, recorded trajectories).
//!
//! # Event Sequence
//!
//! 1. `on_sweep_start(total_runs)` - once, when driven by a sweep
//! 2. For each run:
//!    - `on_run_start(run_index, config)`
//!    - `on_step(record)` - once per simulation step
//!    - `on_run_end(run_index, summary)`
//! 3. `on_sweep_end()` - once, when driven by a sweep

use crate::{
    Result,
    agent::{RunConfig, RunSummary, StepRecord},
};

/// Observer trait for monitoring simulation runs
///
/// # Examples
///
/// ```
/// use tileworld::{agent::StepRecord, ports::Observer};
///
/// struct CountingObserver {
///     steps: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_step(&mut self, _record: &StepRecord) -> tileworld::Result<()> {
///         self.steps += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before a sweep of runs starts.
    fn on_sweep_start(&mut self, _total_runs: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a run starts.
    fn on_run_start(&mut self, _run_index: usize, _config: &RunConfig) -> Result<()> {
        Ok(())
    }

    /// Called after each step has moved the agent.
    fn on_step(&mut self, _record: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called when a run completes.
    fn on_run_end(&mut self, _run_index: usize, _summary: &RunSummary) -> Result<()> {
        Ok(())
    }

    /// Called once after the last run of a sweep.
    fn on_sweep_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {}
