//! Observer adapters for simulation runs

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Error, Result,
    agent::{RunConfig, RunSummary, StepRecord},
    ports::Observer,
};

/// Progress bar observer - shows how many runs of a sweep are done
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    observation_flips: usize,
    actuation_flips: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            observation_flips: 0,
            actuation_flips: 0,
        }
    }

    fn message(&self) -> String {
        format!(
            "sense flips {} / move flips {}",
            self.observation_flips, self.actuation_flips
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_sweep_start(&mut self, total_runs: usize) -> Result<()> {
        let pb = ProgressBar::new(total_runs as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} runs ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_run_start(&mut self, _run_index: usize, config: &RunConfig) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!(
                "{} @ {} noise",
                config.strategy, config.noise_observation
            ));
        }
        Ok(())
    }

    fn on_run_end(&mut self, run_index: usize, summary: &RunSummary) -> Result<()> {
        self.observation_flips += summary.observation_flips;
        self.actuation_flips += summary.actuation_flips;
        if let Some(pb) = &self.progress_bar {
            pb.set_position(run_index as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_sweep_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Records every step, tagged with the run it belongs to.
///
/// Cloning shares the underlying buffer, so a clone can be handed to a
/// sweep while the original is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct StepRecorder {
    records: Arc<Mutex<Vec<(usize, StepRecord)>>>,
    current_run: usize,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(run_index, step)` pairs in order.
    ///
    /// Steps pushed before a writer panicked are still returned.
    pub fn records(&self) -> Vec<(usize, StepRecord)> {
        self.buffer().clone()
    }

    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<(usize, StepRecord)>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Observer for StepRecorder {
    fn on_run_start(&mut self, run_index: usize, _config: &RunConfig) -> Result<()> {
        self.current_run = run_index;
        Ok(())
    }

    fn on_step(&mut self, record: &StepRecord) -> Result<()> {
        let mut records = self.records.lock().map_err(|_| Error::InvalidConfiguration {
            message: format!(
                "step recorder failed to lock its buffer at run {}, step {}",
                self.current_run, record.step
            ),
        })?;
        records.push((self.current_run, *record));
        Ok(())
    }
}
