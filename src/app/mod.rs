//! Application layer: agent configuration and named presets.
//!
//! # Usage
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use tileworld::{
//!     agent::{Agent, RunConfig},
//!     app::Variant,
//!     types::{NoiseLevel, Strategy},
//!     world::Environment,
//! };
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let world = Environment::random(10, &mut rng)?;
//! let config = Variant::Beta.agent_config().with_initial_position(4);
//! let mut agent = Agent::new(world, &config, &mut rng)?;
//!
//! let run = RunConfig::new(100, Strategy::Adventurous)
//!     .with_observation_noise(NoiseLevel::LOW);
//! agent.run(&run, &mut rng)?;
//! assert_eq!(agent.history().len(), 100);
//! # Ok::<(), tileworld::Error>(())
//! ```

pub mod config;

pub use config::{AgentConfig, Variant};
