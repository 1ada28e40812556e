//! Belief-driven exploration of a noisy one-dimensional tile world
//!
//! This crate provides:
//! - A hidden strip of black and white tiles and noisy sensing/moving channels
//! - Count-histogram and Beta-parameter belief models behind one trait
//! - An uncertainty-driven movement policy with cautious and adventurous strategies
//! - Sweeps over noise levels and strategies with observer hooks
//! - Report snapshots (means, variances, credible intervals) for printing or plotting

pub mod agent;
pub mod app;
pub mod beliefs;
pub mod channel;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod ports;
pub mod report;
pub mod types;
pub mod world;

pub use agent::{Agent, RunConfig, RunSummary, StepRecord};
pub use app::{AgentConfig, Variant};
pub use beliefs::ModelKind;
pub use error::{Error, Result};
pub use types::{Direction, Label, NoiseLevel, Strategy};
pub use world::Environment;
