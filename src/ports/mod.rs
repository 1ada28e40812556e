//! Ports (trait boundaries) between the simulation loop and its collaborators.
//!
//! Belief estimators and run observers are owned by the domain as traits and
//! implemented by the concrete models in [`crate::beliefs`] and the adapters
//! in [`crate::pipeline`].

pub mod belief;
pub mod observer;

pub use belief::{BeliefModel, CellCounts, Signal};
pub use observer::{NoopObserver, Observer};
