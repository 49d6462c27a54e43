//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Experiment to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExperimentKind {
    /// Incremental two-sample process, sweeping g or sigma
    Noise,
    /// Batched two-choice process, sweeping the batch size
    Batched,
}

/// Decision strategy family (noise experiments)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    /// Less loaded of two samples (parameter ignored)
    TwoChoice,
    /// Reverse the decision when loads differ by at most g
    #[value(name = "g-bounded")]
    GBounded,
    /// Flip a coin when loads differ by at most g
    #[value(name = "g-myopic")]
    GMyopic,
    /// Compare loads observed with N(0, sigma) noise
    SigmaNoisy,
}

/// gapsim - Balls-into-bins gap simulator
#[derive(Parser, Debug)]
#[command(name = "gapsim")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file (CLI flags override its values)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Experiment to run (default: noise, or the kind in --config)
    #[arg(short = 'e', long, value_enum)]
    pub experiment: Option<ExperimentKind>,

    // === Noise Experiment Options ===
    /// Strategy families, comma-separated, run one after another (e.g., sigma-noisy,g-bounded)
    #[arg(short = 's', long, value_enum, value_delimiter = ',')]
    pub strategy: Option<Vec<StrategyType>>,

    /// Bin counts, comma-separated (e.g., 10k,50k,100k); a single value for batched runs
    #[arg(short = 'n', long)]
    pub bins: Option<String>,

    /// Balls per trial as a multiple of the bin count
    #[arg(short = 'm', long)]
    pub balls_per_bin: Option<u64>,

    /// Parameter values: numbers and ranges (e.g., 1..=20, 0..2:0.25, 1,2,5)
    #[arg(short = 'p', long)]
    pub params: Option<String>,

    // === Batched Experiment Options ===
    /// Batch sizes, comma-separated (e.g., 5,10,50,1k,500k)
    #[arg(short = 'b', long)]
    pub batch_sizes: Option<String>,

    /// Fixed number of rounds per trial (default: derived from batch size)
    #[arg(long)]
    pub rounds: Option<u64>,

    // === Runtime Options ===
    /// Independent trials per sweep point
    #[arg(short = 't', long)]
    pub trials: Option<u64>,

    /// Seed for the random source (default: OS entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Validate and print the configuration, then exit
    #[arg(long)]
    pub dry_run: bool,

    // === Output Options ===
    /// Render histogram lines as LaTeX table cells
    #[arg(long)]
    pub latex: bool,

    /// Write a JSON report to this path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Write plot coordinates as CSV to this path
    #[arg(long)]
    pub csv_output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, env = "GAPSIM_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(trials) = self.trials {
            if trials == 0 {
                anyhow::bail!("trials must be at least 1");
            }
        }

        if let Some(m) = self.balls_per_bin {
            if m == 0 {
                anyhow::bail!("balls_per_bin must be at least 1");
            }
        }

        if self.experiment == Some(ExperimentKind::Batched) {
            if self.strategy.is_some() || self.params.is_some() || self.balls_per_bin.is_some() {
                anyhow::bail!(
                    "--strategy, --params and --balls-per-bin only apply to noise experiments"
                );
            }
        }

        if self.experiment == Some(ExperimentKind::Noise) {
            if self.batch_sizes.is_some() || self.rounds.is_some() {
                anyhow::bail!("--batch-sizes and --rounds only apply to batched experiments");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gapsim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_noise_flags() {
        let cli = parse(&["-e", "noise", "-s", "g-myopic", "-n", "1k,2k", "-p", "1..=5", "-t", "10"]);
        assert_eq!(cli.experiment, Some(ExperimentKind::Noise));
        assert_eq!(cli.strategy, Some(vec![StrategyType::GMyopic]));
        assert_eq!(cli.bins.as_deref(), Some("1k,2k"));
        assert_eq!(cli.params.as_deref(), Some("1..=5"));
        assert_eq!(cli.trials, Some(10));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_parse_batched_flags() {
        let cli = parse(&["--experiment", "batched", "--batch-sizes", "5,10", "--rounds", "3", "--latex"]);
        assert_eq!(cli.experiment, Some(ExperimentKind::Batched));
        assert_eq!(cli.rounds, Some(3));
        assert!(cli.latex);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_parse_strategy_list() {
        let cli = parse(&["-s", "sigma-noisy,g-bounded,g-myopic"]);
        assert_eq!(
            cli.strategy,
            Some(vec![StrategyType::SigmaNoisy, StrategyType::GBounded, StrategyType::GMyopic])
        );
        assert!(Cli::try_parse_from(["gapsim", "-s", "g-bounded,three-choice"]).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_trials() {
        assert!(parse(&["--trials", "0"]).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_mismatched_flags() {
        assert!(parse(&["-e", "batched", "-s", "g-bounded"]).validate().is_err());
        assert!(parse(&["-e", "noise", "--batch-sizes", "5"]).validate().is_err());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let result = Cli::try_parse_from(["gapsim", "--strategy", "three-choice"]);
        assert!(result.is_err());
    }
}
