//! gapsim CLI entry point

use anyhow::{Context, Result};
use gapsim::config::{cli::Cli, toml::build_config, validator, Config, ExperimentConfig};
use gapsim::experiment::ExperimentRunner;
use gapsim::output::{csv, json, text};
use gapsim::random::xoshiro::XoshiroSource;
use std::time::Instant;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    cli.validate()?;

    let config = build_config(&cli).context("Failed to build configuration")?;
    gapsim::logging::init_logging(&config.output.log_level);

    validator::validate_config(&config).context("Configuration validation failed")?;

    if config.runtime.dry_run {
        print_configuration(&config);
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    run(&config)
}

fn run(config: &Config) -> Result<()> {
    let mut rng = XoshiroSource::from_seed_option(config.runtime.seed);
    info!(
        kind = %config.experiment.kind(),
        trials = config.runtime.trials,
        seed = ?config.runtime.seed,
        "starting experiment"
    );

    let start = Instant::now();
    let report = ExperimentRunner::new(&mut rng, config.runtime.trials)
        .run(&config.experiment)
        .context("Experiment failed")?;
    info!(elapsed_secs = start.elapsed().as_secs_f64(), "experiment finished");

    let style = text::HistogramStyle::from_latex_flag(config.output.latex);
    text::print_report(&report, style).context("Failed to write report")?;

    if let Some(path) = &config.output.json_output {
        json::write_json_output(path, &report, config)
            .with_context(|| format!("Failed to write JSON output to {}", path.display()))?;
        info!(path = %path.display(), "wrote JSON report");
    }

    if let Some(path) = &config.output.csv_output {
        csv::write_csv_output(path, &report)
            .with_context(|| format!("Failed to write CSV output to {}", path.display()))?;
        info!(path = %path.display(), "wrote CSV report");
    }

    Ok(())
}

fn print_configuration(config: &Config) {
    println!("Configuration:");
    println!("  Experiment: {}", config.experiment.kind());
    match &config.experiment {
        ExperimentConfig::Noise(noise) => {
            let families: Vec<&str> = noise.families.iter().map(|f| f.name()).collect();
            println!("  Strategies: {}", families.join(", "));
            println!("  Bins: {:?}", noise.bins);
            println!("  Balls per bin: {}", noise.balls_per_bin);
            println!("  Parameter values: {:?}", noise.params);
        }
        ExperimentConfig::Batched(batched) => {
            println!("  Bins: {}", batched.num_bins);
            for &b in &batched.batch_sizes {
                println!("  Batch size {}: {} rounds", b, batched.rounds_for(b));
            }
        }
    }
    println!("  Trials: {}", config.runtime.trials);
    match config.runtime.seed {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: from entropy"),
    }
    if let Some(path) = &config.output.json_output {
        println!("  JSON output: {}", path.display());
    }
    if let Some(path) = &config.output.csv_output {
        println!("  CSV output: {}", path.display());
    }
}
