//! Experiment orchestration
//!
//! The [`ExperimentRunner`] repeats allocation processes over many
//! independent trials and sweep points and returns the aggregates as plain
//! values. A single random source is threaded through the whole run: it is
//! never reset between trials or sweep points, so every trial sees a fresh
//! part of the same stream.
//!
//! # Sweeps
//!
//! - **Noise** ([`noise`]): incremental two-sample process, one sweep point
//!   per strategy parameter (`g` or `sigma`), repeated per bin count
//! - **Batched** ([`batched`]): batched two-choice process, one sweep point
//!   per batch size; also records the gap after the first round
//!
//! # Example
//!
//! ```
//! use gapsim::config::NoiseSweepConfig;
//! use gapsim::experiment::ExperimentRunner;
//! use gapsim::random::xoshiro::XoshiroSource;
//! use gapsim::strategy::StrategyFamily;
//!
//! let config = NoiseSweepConfig {
//!     families: vec![StrategyFamily::GMyopic],
//!     bins: vec![50],
//!     balls_per_bin: 10,
//!     params: vec![0.0, 2.0],
//!     ..NoiseSweepConfig::default()
//! };
//!
//! let mut rng = XoshiroSource::with_seed(1);
//! let mut runner = ExperimentRunner::new(&mut rng, 10);
//! let results = runner.run_noise_sweep(&config)?;
//! assert_eq!(results[0].points.len(), 2);
//! assert_eq!(results[0].points[0].stats.trials(), 10);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod batched;
pub mod noise;

pub use batched::{BatchedPoint, BatchedSweepResult};
pub use noise::{NoiseSweepResult, SweepPoint};

use crate::config::{BatchedSweepConfig, ExperimentConfig, NoiseSweepConfig};
use crate::error::SimError;
use crate::process::AllocationProcess;
use crate::random::RandomSource;
use crate::Result;

/// Named list of `(x, y)` plot coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub num_bins: usize,
    pub coordinates: Vec<(f64, f64)>,
}

/// Finished results of one run
#[derive(Debug, Clone)]
pub enum ExperimentReport {
    /// One result per bin count
    Noise(Vec<NoiseSweepResult>),
    Batched(BatchedSweepResult),
}

impl ExperimentReport {
    /// All plot series of the run, in output order
    pub fn series(&self) -> Vec<Series> {
        match self {
            Self::Noise(results) => results.iter().map(NoiseSweepResult::series).collect(),
            Self::Batched(result) => vec![result.one_choice_series(), result.two_choice_series()],
        }
    }
}

/// Runs trials and sweeps against one random source
pub struct ExperimentRunner<'a, R: RandomSource + ?Sized> {
    rng: &'a mut R,
    trials: u64,
}

impl<'a, R: RandomSource + ?Sized> ExperimentRunner<'a, R> {
    /// Create a runner performing `trials` trials per sweep point
    pub fn new(rng: &'a mut R, trials: u64) -> Self {
        Self { rng, trials }
    }

    /// Trials per sweep point
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Run the configured sweep
    pub fn run(&mut self, experiment: &ExperimentConfig) -> Result<ExperimentReport> {
        match experiment {
            ExperimentConfig::Noise(config) => Ok(ExperimentReport::Noise(self.run_noise_sweep(config)?)),
            ExperimentConfig::Batched(config) => {
                Ok(ExperimentReport::Batched(self.run_batched_sweep(config)?))
            }
        }
    }

    /// Noise sweep over every bin count and parameter value
    pub fn run_noise_sweep(&mut self, config: &NoiseSweepConfig) -> Result<Vec<NoiseSweepResult>> {
        noise::run_sweep(config, self.trials, &mut *self.rng)
    }

    /// Batched sweep over every batch size
    pub fn run_batched_sweep(&mut self, config: &BatchedSweepConfig) -> Result<BatchedSweepResult> {
        batched::run_sweep(config, self.trials, &mut *self.rng)
    }
}

/// Advance a process by `steps` steps
pub fn run_steps<P, R>(process: &mut P, steps: u64, rng: &mut R) -> std::result::Result<(), SimError>
where
    P: AllocationProcess,
    R: RandomSource + ?Sized,
{
    for _ in 0..steps {
        process.step(rng)?;
    }
    Ok(())
}
