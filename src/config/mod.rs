//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! A run is fully described by a [`Config`]: which sweep to perform, how many
//! trials per sweep point, the seed, and where to send the results.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::stats::GapRounding;
use crate::strategy::StrategyFamily;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Complete experiment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub experiment: ExperimentConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_kind(ExperimentKind::Noise)
    }
}

impl Config {
    /// Default configuration for one experiment kind
    pub fn for_kind(kind: ExperimentKind) -> Self {
        Self {
            experiment: ExperimentConfig::for_kind(kind),
            runtime: RuntimeConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Which sweep to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperimentKind {
    Noise,
    Batched,
}

impl fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noise => write!(f, "noise"),
            Self::Batched => write!(f, "batched"),
        }
    }
}

/// Sweep definition, tagged by `kind` in TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ExperimentConfig {
    Noise(NoiseSweepConfig),
    Batched(BatchedSweepConfig),
}

impl ExperimentConfig {
    pub fn for_kind(kind: ExperimentKind) -> Self {
        match kind {
            ExperimentKind::Noise => Self::Noise(NoiseSweepConfig::default()),
            ExperimentKind::Batched => Self::Batched(BatchedSweepConfig::default()),
        }
    }

    pub fn kind(&self) -> ExperimentKind {
        match self {
            Self::Noise(_) => ExperimentKind::Noise,
            Self::Batched(_) => ExperimentKind::Batched,
        }
    }
}

/// Incremental two-sample process swept over a strategy parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseSweepConfig {
    /// Strategy families swept one after another on the same random source
    #[serde(default = "default_families")]
    pub families: Vec<StrategyFamily>,
    /// Bin counts; the full parameter sweep runs once per entry
    #[serde(default = "default_noise_bins")]
    pub bins: Vec<usize>,
    /// Balls placed per trial, as a multiple of the bin count
    #[serde(default = "default_balls_per_bin")]
    pub balls_per_bin: u64,
    /// Parameter values (`g` or `sigma`)
    #[serde(default = "default_params")]
    pub params: Vec<f64>,
    /// How final gaps are rounded into histogram keys
    #[serde(default = "default_noise_rounding")]
    pub rounding: GapRounding,
}

impl Default for NoiseSweepConfig {
    fn default() -> Self {
        Self {
            families: default_families(),
            bins: default_noise_bins(),
            balls_per_bin: default_balls_per_bin(),
            params: default_params(),
            rounding: default_noise_rounding(),
        }
    }
}

fn default_families() -> Vec<StrategyFamily> {
    vec![
        StrategyFamily::SigmaNoisy,
        StrategyFamily::GBounded,
        StrategyFamily::GMyopic,
    ]
}

fn default_noise_bins() -> Vec<usize> {
    vec![10_000, 50_000, 100_000]
}

fn default_balls_per_bin() -> u64 {
    1_000
}

fn default_params() -> Vec<f64> {
    (1..=20).map(f64::from).collect()
}

fn default_noise_rounding() -> GapRounding {
    GapRounding::Truncate
}

/// Batched two-choice process swept over the batch size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchedSweepConfig {
    #[serde(default = "default_batched_bins")]
    pub num_bins: usize,
    #[serde(default = "default_batch_sizes")]
    pub batch_sizes: Vec<u64>,
    /// Fixed number of rounds per trial; derived from the factors when unset
    #[serde(default)]
    pub rounds: Option<u64>,
    /// Balls per bin when the batch is smaller than the bin count
    #[serde(default = "default_small_batch_factor")]
    pub small_batch_factor: u64,
    /// Balls per bin when the batch is at least the bin count
    #[serde(default = "default_large_batch_factor")]
    pub large_batch_factor: u64,
    /// How gaps are rounded into histogram keys
    #[serde(default = "default_batched_rounding")]
    pub rounding: GapRounding,
}

impl BatchedSweepConfig {
    /// Rounds per trial for a batch size
    ///
    /// `factor * num_bins / batch_size`, with the large factor once the batch
    /// covers all bins. Always at least one round.
    pub fn rounds_for(&self, batch_size: u64) -> u64 {
        if let Some(rounds) = self.rounds {
            return rounds.max(1);
        }
        let n = self.num_bins as u64;
        let factor = if batch_size >= n {
            self.large_batch_factor
        } else {
            self.small_batch_factor
        };
        (factor * n / batch_size.max(1)).max(1)
    }
}

impl Default for BatchedSweepConfig {
    fn default() -> Self {
        Self {
            num_bins: default_batched_bins(),
            batch_sizes: default_batch_sizes(),
            rounds: None,
            small_batch_factor: default_small_batch_factor(),
            large_batch_factor: default_large_batch_factor(),
            rounding: default_batched_rounding(),
        }
    }
}

fn default_batched_bins() -> usize {
    10_000
}

fn default_batch_sizes() -> Vec<u64> {
    vec![5, 10, 50, 100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000]
}

fn default_small_batch_factor() -> u64 {
    50
}

fn default_large_batch_factor() -> u64 {
    1_000
}

fn default_batched_rounding() -> GapRounding {
    GapRounding::Ceil
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Independent trials per sweep point
    #[serde(default = "default_trials")]
    pub trials: u64,
    /// Seed for the random source; entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
    /// Validate and print the configuration without simulating
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            seed: None,
            dry_run: false,
        }
    }
}

fn default_trials() -> u64 {
    100
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Render histogram lines as LaTeX table cells
    #[serde(default)]
    pub latex: bool,
    /// JSON report path
    #[serde(default)]
    pub json_output: Option<PathBuf>,
    /// CSV coordinates path
    #[serde(default)]
    pub csv_output: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            latex: false,
            json_output: None,
            csv_output: None,
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_noise_sweep() {
        let config = Config::default();
        assert_eq!(config.experiment.kind(), ExperimentKind::Noise);
        assert_eq!(config.runtime.trials, 100);
        assert_eq!(config.output.log_level, "info");

        if let ExperimentConfig::Noise(noise) = &config.experiment {
            assert_eq!(
                noise.families,
                vec![StrategyFamily::SigmaNoisy, StrategyFamily::GBounded, StrategyFamily::GMyopic]
            );
            assert_eq!(noise.params.len(), 20);
            assert_eq!(noise.params[0], 1.0);
            assert_eq!(noise.rounding, GapRounding::Truncate);
        }
    }

    #[test]
    fn test_rounds_for_uses_factor_rule() {
        let config = BatchedSweepConfig {
            num_bins: 10_000,
            ..BatchedSweepConfig::default()
        };
        // 50 * 10000 / 5
        assert_eq!(config.rounds_for(5), 100_000);
        // 50 * 10000 / 5000
        assert_eq!(config.rounds_for(5_000), 100);
        // batch >= n: 1000 * 10000 / 10000
        assert_eq!(config.rounds_for(10_000), 1_000);
        // 1000 * 10000 / 500000
        assert_eq!(config.rounds_for(500_000), 20);
    }

    #[test]
    fn test_rounds_for_at_least_one() {
        let config = BatchedSweepConfig {
            num_bins: 10,
            large_batch_factor: 1,
            ..BatchedSweepConfig::default()
        };
        assert_eq!(config.rounds_for(1_000), 1);

        let fixed = BatchedSweepConfig {
            rounds: Some(0),
            ..BatchedSweepConfig::default()
        };
        assert_eq!(fixed.rounds_for(5), 1);
    }

    #[test]
    fn test_fixed_rounds_override() {
        let config = BatchedSweepConfig {
            rounds: Some(42),
            ..BatchedSweepConfig::default()
        };
        assert_eq!(config.rounds_for(5), 42);
        assert_eq!(config.rounds_for(500_000), 42);
    }
}
