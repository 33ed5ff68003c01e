//! Thompson sampling simulator for Bernoulli multi-armed bandit experiments.
//!
//! Each bandit arm has a fixed, unknown success probability. The experiment
//! keeps a Beta posterior per arm under the `1 + init + observed` convention,
//! samples every posterior each round, plays the arm with the highest draw
//! (lowest index on ties), observes a Bernoulli reward, and folds the
//! damped observation back into the posterior. Results land in a
//! [`RunHistory`] of per-step arrays plus cumulative aggregates.
//!
//! ```
//! use thompson_bandit::{BanditExperiment, ExperimentConfig};
//!
//! # fn main() -> thompson_bandit::Result<()> {
//! let config = ExperimentConfig {
//!     steps: 200,
//!     ..ExperimentConfig::new([0.1, 0.5, 0.9])
//! };
//! let mut experiment = BanditExperiment::new(config)?;
//! let history = experiment.run()?;
//! assert_eq!(history.steps(), 200);
//! # Ok(())
//! # }
//! ```
//!
//! Every operation that consumes randomness is generic over [`rand::Rng`],
//! so seeded generators drop in for reproducible runs.

pub mod config;
pub mod error;
pub mod experiment;
pub mod history;
pub mod posterior;
pub mod test_utils;

pub use config::ExperimentConfig;
pub use error::{BanditError, Result};
pub use experiment::{BanditExperiment, Reward};
pub use history::{ExperimentSummary, RunHistory};
pub use posterior::BetaPosterior;
