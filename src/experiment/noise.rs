//! Noise sweep: incremental two-sample process under a strategy family

use super::{run_steps, Series};
use crate::config::NoiseSweepConfig;
use crate::process::{AllocationProcess, TwoSampleProcess};
use crate::random::RandomSource;
use crate::stats::{GapRounding, GapStats};
use crate::strategy::{DecisionStrategy, StrategyFamily};
use crate::Result;
use anyhow::Context;
use tracing::{debug, info};

/// Aggregate for one parameter value
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub param: f64,
    pub stats: GapStats,
}

/// All sweep points for one bin count
#[derive(Debug, Clone)]
pub struct NoiseSweepResult {
    pub family: StrategyFamily,
    pub num_bins: usize,
    /// Balls placed per trial
    pub balls: u64,
    pub points: Vec<SweepPoint>,
}

impl NoiseSweepResult {
    /// `(param, mean gap)` series for plotting
    pub fn series(&self) -> Series {
        Series {
            name: format!("{} n={}", self.family, self.num_bins),
            num_bins: self.num_bins,
            coordinates: self
                .points
                .iter()
                .map(|point| (point.param, point.stats.mean()))
                .collect(),
        }
    }
}

/// Run the full sweep, one result per family and bin count
///
/// Families run one after another in configuration order, all drawing from
/// the same random source.
pub fn run_sweep<R>(config: &NoiseSweepConfig, trials: u64, rng: &mut R) -> Result<Vec<NoiseSweepResult>>
where
    R: RandomSource + ?Sized,
{
    let mut results = Vec::with_capacity(config.families.len() * config.bins.len());

    for &family in &config.families {
        for &num_bins in &config.bins {
            results.push(run_family(config, family, num_bins, trials, rng)?);
        }
    }

    Ok(results)
}

/// Sweep every parameter value of one family at one bin count
fn run_family<R>(
    config: &NoiseSweepConfig,
    family: StrategyFamily,
    num_bins: usize,
    trials: u64,
    rng: &mut R,
) -> Result<NoiseSweepResult>
where
    R: RandomSource + ?Sized,
{
    let balls = (num_bins as u64)
        .checked_mul(config.balls_per_bin)
        .ok_or_else(|| anyhow::anyhow!("balls_per_bin * {} overflows", num_bins))?;
    info!(
        %family,
        num_bins,
        balls,
        points = config.params.len(),
        "starting noise sweep"
    );

    let mut points = Vec::with_capacity(config.params.len());
    for &param in &config.params {
        let strategy = family
            .with_param(param)
            .with_context(|| format!("Invalid {} parameter {}", family, param))?;
        let stats = run_point(strategy, num_bins, balls, trials, config.rounding, rng)?;
        info!(
            %strategy,
            num_bins,
            mean_gap = stats.mean(),
            "sweep point complete"
        );
        points.push(SweepPoint { param, stats });
    }

    Ok(NoiseSweepResult {
        family,
        num_bins,
        balls,
        points,
    })
}

/// Run `trials` fresh processes of `balls` steps each and aggregate final gaps
pub fn run_point<R>(
    strategy: DecisionStrategy,
    num_bins: usize,
    balls: u64,
    trials: u64,
    rounding: GapRounding,
    rng: &mut R,
) -> Result<GapStats>
where
    R: RandomSource + ?Sized,
{
    let mut stats = GapStats::new();

    for trial in 0..trials {
        let mut process = TwoSampleProcess::new(num_bins, strategy)?;
        run_steps(&mut process, balls, rng)?;

        let gap = process.gap();
        let rounded = stats.record(gap, rounding);
        debug!(trial, gap, rounded, max_load = process.max_load(), "trial complete");
    }

    Ok(stats)
}
