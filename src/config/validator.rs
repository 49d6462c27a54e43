//! Configuration validation
//!
//! Everything that would make a process constructor fail is rejected here,
//! before any trial runs, so a long sweep never aborts halfway through.

use super::*;
use anyhow::{Context, Result};

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    match &config.experiment {
        ExperimentConfig::Noise(noise) => validate_noise(noise)?,
        ExperimentConfig::Batched(batched) => validate_batched(batched)?,
    }
    validate_runtime(&config.runtime)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate a noise sweep
pub fn validate_noise(noise: &NoiseSweepConfig) -> Result<()> {
    if noise.bins.is_empty() {
        anyhow::bail!("bins must contain at least one bin count");
    }
    if let Some(index) = noise.bins.iter().position(|&n| n == 0) {
        anyhow::bail!("bins[{}] must be at least 1", index);
    }

    if noise.balls_per_bin == 0 {
        anyhow::bail!("balls_per_bin must be at least 1");
    }
    for &n in &noise.bins {
        (n as u64)
            .checked_mul(noise.balls_per_bin)
            .ok_or_else(|| anyhow::anyhow!("balls_per_bin * {} overflows", n))?;
    }

    if noise.families.is_empty() {
        anyhow::bail!("families must contain at least one strategy family");
    }
    if noise.params.is_empty() {
        anyhow::bail!("params must contain at least one value");
    }
    for &family in &noise.families {
        for (index, &param) in noise.params.iter().enumerate() {
            family
                .with_param(param)
                .with_context(|| format!("params[{}] is invalid for {}", index, family))?;
        }
    }

    Ok(())
}

/// Validate a batched sweep
pub fn validate_batched(batched: &BatchedSweepConfig) -> Result<()> {
    if batched.num_bins == 0 {
        anyhow::bail!("num_bins must be at least 1");
    }

    if batched.batch_sizes.is_empty() {
        anyhow::bail!("batch_sizes must contain at least one batch size");
    }
    if let Some(index) = batched.batch_sizes.iter().position(|&b| b == 0) {
        anyhow::bail!("batch_sizes[{}] must be at least 1", index);
    }

    if batched.rounds.is_none() {
        if batched.small_batch_factor == 0 || batched.large_batch_factor == 0 {
            anyhow::bail!("small_batch_factor and large_batch_factor must be at least 1");
        }
        let n = batched.num_bins as u64;
        n.checked_mul(batched.small_batch_factor.max(batched.large_batch_factor))
            .ok_or_else(|| anyhow::anyhow!("batch factor * num_bins overflows"))?;
    } else if batched.rounds == Some(0) {
        anyhow::bail!("rounds must be at least 1");
    }

    for &b in &batched.batch_sizes {
        if b > (batched.num_bins as u64).saturating_mul(1_000) {
            tracing::warn!(
                batch_size = b,
                num_bins = batched.num_bins,
                "batch size far exceeds the bin count; each trial runs a single huge round"
            );
        }
    }

    Ok(())
}

/// Validate runtime configuration
pub fn validate_runtime(runtime: &RuntimeConfig) -> Result<()> {
    if runtime.trials == 0 {
        anyhow::bail!("trials must be at least 1");
    }
    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if !LEVELS.contains(&output.log_level.to_lowercase().as_str()) {
        anyhow::bail!(
            "log_level must be one of {}, got '{}'",
            LEVELS.join(", "),
            output.log_level
        );
    }

    if let (Some(json), Some(csv)) = (&output.json_output, &output.csv_output) {
        if json == csv {
            anyhow::bail!("json_output and csv_output must be different files");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::StrategyFamily;

    fn noise() -> NoiseSweepConfig {
        NoiseSweepConfig {
            families: vec![StrategyFamily::GBounded],
            bins: vec![10],
            balls_per_bin: 10,
            params: vec![0.0, 1.0],
            ..NoiseSweepConfig::default()
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&Config::for_kind(ExperimentKind::Noise)).is_ok());
        assert!(validate_config(&Config::for_kind(ExperimentKind::Batched)).is_ok());
    }

    #[test]
    fn test_noise_rejections() {
        assert!(validate_noise(&noise()).is_ok());

        let mut config = noise();
        config.bins = vec![10, 0];
        assert!(validate_noise(&config).is_err());

        let mut config = noise();
        config.bins.clear();
        assert!(validate_noise(&config).is_err());

        let mut config = noise();
        config.balls_per_bin = 0;
        assert!(validate_noise(&config).is_err());

        let mut config = noise();
        config.params.clear();
        assert!(validate_noise(&config).is_err());

        let mut config = noise();
        config.families.clear();
        assert!(validate_noise(&config).is_err());
    }

    #[test]
    fn test_noise_param_domains() {
        let mut config = noise();
        config.params = vec![1.5];
        let err = validate_noise(&config).unwrap_err();
        assert!(err.to_string().contains("params[0]"));

        config.families = vec![StrategyFamily::SigmaNoisy];
        assert!(validate_noise(&config).is_ok());

        // Every family must accept every value
        config.families = vec![StrategyFamily::SigmaNoisy, StrategyFamily::GMyopic];
        let err = validate_noise(&config).unwrap_err();
        assert!(err.to_string().contains("g-myopic"));

        config.families = vec![StrategyFamily::SigmaNoisy];
        config.params = vec![1.0, -2.0];
        assert!(validate_noise(&config).is_err());
    }

    #[test]
    fn test_noise_overflow() {
        let mut config = noise();
        config.balls_per_bin = u64::MAX;
        assert!(validate_noise(&config).is_err());
    }

    #[test]
    fn test_batched_rejections() {
        let mut config = BatchedSweepConfig::default();
        config.num_bins = 0;
        assert!(validate_batched(&config).is_err());

        let mut config = BatchedSweepConfig::default();
        config.batch_sizes = vec![5, 0];
        assert!(validate_batched(&config).is_err());

        let mut config = BatchedSweepConfig::default();
        config.batch_sizes.clear();
        assert!(validate_batched(&config).is_err());

        let mut config = BatchedSweepConfig::default();
        config.small_batch_factor = 0;
        assert!(validate_batched(&config).is_err());

        // Factors are irrelevant once rounds are fixed
        config.rounds = Some(10);
        assert!(validate_batched(&config).is_ok());

        config.rounds = Some(0);
        assert!(validate_batched(&config).is_err());
    }

    #[test]
    fn test_runtime_rejections() {
        let runtime = RuntimeConfig {
            trials: 0,
            ..RuntimeConfig::default()
        };
        assert!(validate_runtime(&runtime).is_err());
    }

    #[test]
    fn test_output_rejections() {
        let mut output = OutputConfig::default();
        output.log_level = "verbose".to_string();
        assert!(validate_output(&output).is_err());

        let mut output = OutputConfig::default();
        output.log_level = "DEBUG".to_string();
        assert!(validate_output(&output).is_ok());

        output.json_output = Some("out.txt".into());
        output.csv_output = Some("out.txt".into());
        assert!(validate_output(&output).is_err());
    }
}
