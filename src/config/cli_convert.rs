//! CLI to Config conversion utilities

use crate::config::cli;
use crate::config::ExperimentKind;
use crate::strategy::StrategyFamily;
use anyhow::{Context, Result};

/// Upper bound on the values a single parameter range may expand to
pub const MAX_RANGE_VALUES: usize = 100_000;

/// Parse a count string (e.g., "500", "10k", "1m", "10_000")
///
/// Suffixes are decimal: `k` = 1,000 and `m` = 1,000,000.
pub fn parse_count(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase().replace('_', "");

    let (num_str, multiplier) = if let Some(num) = s.strip_suffix('k') {
        (num, 1_000u64)
    } else if let Some(num) = s.strip_suffix('m') {
        (num, 1_000_000)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .parse()
        .with_context(|| format!("Invalid count format: {}", s))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Count too large: {}", s))
}

/// Parse a comma-separated list of counts (e.g., "5,10,1k")
pub fn parse_count_list(s: &str) -> Result<Vec<u64>> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_count)
        .collect()
}

/// Parse a comma-separated list of parameter values and ranges
///
/// Each item is a number, an inclusive range `a..=b`, or a half-open range
/// `a..b`. Ranges take an optional step after a colon (`0..=2:0.5`); the
/// default step is 1. A range may expand to at most [`MAX_RANGE_VALUES`]
/// values.
pub fn parse_param_list(s: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();

    for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        if item.contains("..") {
            values.extend(parse_param_range(item)?);
        } else {
            let value: f64 = item
                .parse()
                .with_context(|| format!("Invalid parameter value: {}", item))?;
            values.push(value);
        }
    }

    Ok(values)
}

/// Expand one `a..b[:step]` or `a..=b[:step]` range
fn parse_param_range(item: &str) -> Result<Vec<f64>> {
    let (range, step) = match item.split_once(':') {
        Some((range, step)) => {
            let step: f64 = step
                .trim()
                .parse()
                .with_context(|| format!("Invalid range step: {}", item))?;
            (range, step)
        }
        None => (item, 1.0),
    };

    if !step.is_finite() || step <= 0.0 {
        anyhow::bail!("Range step must be positive: {}", item);
    }

    let (start, end, inclusive) = if let Some((start, end)) = range.split_once("..=") {
        (start, end, true)
    } else if let Some((start, end)) = range.split_once("..") {
        (start, end, false)
    } else {
        anyhow::bail!("Invalid range: {}", item);
    };

    let start: f64 = start
        .trim()
        .parse()
        .with_context(|| format!("Invalid range start: {}", item))?;
    let end: f64 = end
        .trim()
        .parse()
        .with_context(|| format!("Invalid range end: {}", item))?;

    if !start.is_finite() || !end.is_finite() {
        anyhow::bail!("Range bounds must be finite: {}", item);
    }

    // Multiply instead of accumulating so steps like 0.1 do not drift
    let tolerance = step * 1e-9;
    let mut values = Vec::new();
    for k in 0u64.. {
        let value = start + k as f64 * step;
        let in_range = if inclusive {
            value <= end + tolerance
        } else {
            value < end - tolerance
        };
        if !in_range {
            break;
        }
        if values.len() == MAX_RANGE_VALUES {
            anyhow::bail!(
                "Range expands to more than {} values: {}",
                MAX_RANGE_VALUES,
                item
            );
        }
        values.push(value);
    }

    Ok(values)
}

/// Parse a bin count list into `usize` values
pub fn parse_bins(s: &str) -> Result<Vec<usize>> {
    parse_count_list(s)?
        .into_iter()
        .map(|n| usize::try_from(n).with_context(|| format!("Bin count too large: {}", n)))
        .collect()
}

/// Convert CLI StrategyType to StrategyFamily
pub fn convert_strategy_type(cli_type: cli::StrategyType) -> StrategyFamily {
    match cli_type {
        cli::StrategyType::TwoChoice => StrategyFamily::TwoChoice,
        cli::StrategyType::GBounded => StrategyFamily::GBounded,
        cli::StrategyType::GMyopic => StrategyFamily::GMyopic,
        cli::StrategyType::SigmaNoisy => StrategyFamily::SigmaNoisy,
    }
}

/// Convert CLI ExperimentKind to config ExperimentKind
pub fn convert_experiment_kind(cli_kind: cli::ExperimentKind) -> ExperimentKind {
    match cli_kind {
        cli::ExperimentKind::Noise => ExperimentKind::Noise,
        cli::ExperimentKind::Batched => ExperimentKind::Batched,
    }
}
