//! TOML configuration file parsing

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::{
    convert_experiment_kind, convert_strategy_type, parse_bins, parse_count_list, parse_param_list,
};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Build the run configuration from CLI arguments
///
/// Starts from `--config` when given, otherwise from the defaults of the
/// selected experiment kind, then applies CLI overrides.
pub fn build_config(cli: &Cli) -> Result<Config> {
    let base = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => {
            let kind = cli
                .experiment
                .map(convert_experiment_kind)
                .unwrap_or(ExperimentKind::Noise);
            Config::for_kind(kind)
        }
    };

    merge_cli_with_config(cli, base)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // A different experiment kind on the CLI replaces the file's sweep
    if let Some(kind) = cli.experiment.map(convert_experiment_kind) {
        if kind != config.experiment.kind() {
            config.experiment = ExperimentConfig::for_kind(kind);
        }
    }

    match &mut config.experiment {
        ExperimentConfig::Noise(noise) => {
            if cli.batch_sizes.is_some() || cli.rounds.is_some() {
                anyhow::bail!("--batch-sizes and --rounds only apply to batched experiments");
            }
            if let Some(ref strategies) = cli.strategy {
                noise.families = strategies.iter().copied().map(convert_strategy_type).collect();
            }
            if let Some(ref bins) = cli.bins {
                noise.bins = parse_bins(bins).context("Invalid --bins")?;
            }
            if let Some(m) = cli.balls_per_bin {
                noise.balls_per_bin = m;
            }
            if let Some(ref params) = cli.params {
                noise.params = parse_param_list(params).context("Invalid --params")?;
            }
        }
        ExperimentConfig::Batched(batched) => {
            if cli.strategy.is_some() || cli.params.is_some() || cli.balls_per_bin.is_some() {
                anyhow::bail!(
                    "--strategy, --params and --balls-per-bin only apply to noise experiments"
                );
            }
            if let Some(ref bins) = cli.bins {
                let bins = parse_bins(bins).context("Invalid --bins")?;
                match bins.as_slice() {
                    [n] => batched.num_bins = *n,
                    _ => anyhow::bail!("batched experiments take exactly one --bins value"),
                }
            }
            if let Some(ref sizes) = cli.batch_sizes {
                batched.batch_sizes = parse_count_list(sizes).context("Invalid --batch-sizes")?;
            }
            if let Some(rounds) = cli.rounds {
                batched.rounds = Some(rounds);
            }
        }
    }

    // Override runtime settings
    if let Some(trials) = cli.trials {
        config.runtime.trials = trials;
    }
    if let Some(seed) = cli.seed {
        config.runtime.seed = Some(seed);
    }
    if cli.dry_run {
        config.runtime.dry_run = true;
    }

    // Override output settings
    if cli.latex {
        config.output.latex = true;
    }
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if let Some(ref path) = cli.csv_output {
        config.output.csv_output = Some(path.clone());
    }
    if let Some(ref level) = cli.log_level {
        config.output.log_level = level.clone();
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::GapRounding;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gapsim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_noise_toml() {
        let toml = r#"
            [experiment]
            kind = "noise"
            families = ["g-bounded"]
            bins = [1000, 2000]
            balls_per_bin = 50
            params = [0, 1, 2]

            [runtime]
            trials = 20
            seed = 7
        "#;

        let config = parse_toml_string(toml).unwrap();
        assert_eq!(config.runtime.trials, 20);
        assert_eq!(config.runtime.seed, Some(7));
        assert!(!config.output.latex);

        match config.experiment {
            ExperimentConfig::Noise(noise) => {
                assert_eq!(noise.families, vec![StrategyFamily::GBounded]);
                assert_eq!(noise.bins, vec![1000, 2000]);
                assert_eq!(noise.balls_per_bin, 50);
                assert_eq!(noise.params, vec![0.0, 1.0, 2.0]);
                assert_eq!(noise.rounding, GapRounding::Truncate);
            }
            other => panic!("expected noise experiment, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_batched_toml_defaults() {
        let toml = r#"
            [experiment]
            kind = "batched"
            num_bins = 100
            batch_sizes = [5, 50]

            [output]
            latex = true
        "#;

        let config = parse_toml_string(toml).unwrap();
        assert_eq!(config.runtime.trials, 100);
        assert!(config.output.latex);

        match config.experiment {
            ExperimentConfig::Batched(batched) => {
                assert_eq!(batched.num_bins, 100);
                assert_eq!(batched.batch_sizes, vec![5, 50]);
                assert_eq!(batched.rounds, None);
                assert_eq!(batched.small_batch_factor, 50);
                assert_eq!(batched.large_batch_factor, 1000);
                assert_eq!(batched.rounding, GapRounding::Ceil);
            }
            other => panic!("expected batched experiment, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml() {
        assert!(parse_toml_string("[experiment]\nkind = \"parallel\"").is_err());
        assert!(parse_toml_string("not toml at all [").is_err());
    }

    #[test]
    fn test_parse_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[experiment]\nkind = \"batched\"\nnum_bins = 64").unwrap();

        let config = parse_toml_file(file.path()).unwrap();
        assert_eq!(config.experiment.kind(), ExperimentKind::Batched);
    }

    #[test]
    fn test_missing_file() {
        let err = parse_toml_file(Path::new("/nonexistent/gapsim.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_build_config_from_flags() {
        let config = build_config(&cli(&[
            "-s", "g-myopic", "-n", "1k", "-m", "10", "-p", "0..=4", "-t", "5", "--seed", "9",
        ]))
        .unwrap();

        assert_eq!(config.runtime.trials, 5);
        assert_eq!(config.runtime.seed, Some(9));
        match config.experiment {
            ExperimentConfig::Noise(noise) => {
                assert_eq!(noise.families, vec![StrategyFamily::GMyopic]);
                assert_eq!(noise.bins, vec![1_000]);
                assert_eq!(noise.balls_per_bin, 10);
                assert_eq!(noise.params, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
            }
            other => panic!("expected noise experiment, got {:?}", other),
        }
    }

    #[test]
    fn test_build_batched_config_from_flags() {
        let config = build_config(&cli(&["-e", "batched", "-n", "500", "-b", "5,1k", "--rounds", "3"]))
            .unwrap();

        match config.experiment {
            ExperimentConfig::Batched(batched) => {
                assert_eq!(batched.num_bins, 500);
                assert_eq!(batched.batch_sizes, vec![5, 1_000]);
                assert_eq!(batched.rounds, Some(3));
            }
            other => panic!("expected batched experiment, got {:?}", other),
        }
    }

    #[test]
    fn test_batched_rejects_multiple_bins() {
        assert!(build_config(&cli(&["-e", "batched", "-n", "5,10"])).is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let base = parse_toml_string(
            "[experiment]\nkind = \"noise\"\nfamilies = [\"g-bounded\"]\n[runtime]\ntrials = 20",
        )
        .unwrap();

        let merged = merge_cli_with_config(&cli(&["-s", "sigma-noisy,g-myopic", "-t", "3", "--latex"]), base).unwrap();
        assert_eq!(merged.runtime.trials, 3);
        assert!(merged.output.latex);
        match merged.experiment {
            ExperimentConfig::Noise(noise) => {
                assert_eq!(noise.families, vec![StrategyFamily::SigmaNoisy, StrategyFamily::GMyopic])
            }
            other => panic!("expected noise experiment, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_kind_replaces_file_kind() {
        let base = Config::for_kind(ExperimentKind::Noise);
        let merged = merge_cli_with_config(&cli(&["-e", "batched"]), base).unwrap();
        assert_eq!(merged.experiment, ExperimentConfig::for_kind(ExperimentKind::Batched));
    }

    #[test]
    fn test_flags_for_other_kind_rejected() {
        let base = Config::for_kind(ExperimentKind::Batched);
        assert!(merge_cli_with_config(&cli(&["-p", "1..=3"]), base).is_err());

        let base = Config::for_kind(ExperimentKind::Noise);
        assert!(merge_cli_with_config(&cli(&["--rounds", "4"]), base).is_err());
    }
}
