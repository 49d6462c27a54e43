//! Batched sweep: batched two-choice process over a range of batch sizes
//!
//! Besides the final gap, each trial records the gap after its first round.
//! A single round allocates every ball against the all-zero snapshot, where
//! every bin looks equally loaded, so that measurement serves as the
//! One-Choice baseline next to the Two-Choice series.

use super::Series;
use crate::config::BatchedSweepConfig;
use crate::process::{AllocationProcess, BatchedProcess};
use crate::random::RandomSource;
use crate::stats::{GapRounding, GapStats};
use crate::Result;
use tracing::{debug, info};

/// Aggregates for one batch size
#[derive(Debug, Clone)]
pub struct BatchedPoint {
    pub batch_size: u64,
    pub rounds: u64,
    /// Gaps after the first round
    pub one_choice: GapStats,
    /// Gaps after the last round
    pub two_choice: GapStats,
}

/// All sweep points of a batched sweep
#[derive(Debug, Clone)]
pub struct BatchedSweepResult {
    pub num_bins: usize,
    pub points: Vec<BatchedPoint>,
}

impl BatchedSweepResult {
    /// `(batch size, mean first-round gap)` series
    pub fn one_choice_series(&self) -> Series {
        Series {
            name: "One-Choice".to_string(),
            num_bins: self.num_bins,
            coordinates: self
                .points
                .iter()
                .map(|p| (p.batch_size as f64, p.one_choice.mean()))
                .collect(),
        }
    }

    /// `(batch size, mean final gap)` series
    pub fn two_choice_series(&self) -> Series {
        Series {
            name: "Two-Choice".to_string(),
            num_bins: self.num_bins,
            coordinates: self
                .points
                .iter()
                .map(|p| (p.batch_size as f64, p.two_choice.mean()))
                .collect(),
        }
    }
}

/// Run the full sweep over the configured batch sizes
pub fn run_sweep<R>(config: &BatchedSweepConfig, trials: u64, rng: &mut R) -> Result<BatchedSweepResult>
where
    R: RandomSource + ?Sized,
{
    info!(
        num_bins = config.num_bins,
        points = config.batch_sizes.len(),
        "starting batched sweep"
    );

    let mut points = Vec::with_capacity(config.batch_sizes.len());
    for &batch_size in &config.batch_sizes {
        let rounds = config.rounds_for(batch_size);
        let point = run_point(config.num_bins, batch_size, rounds, trials, config.rounding, rng)?;
        info!(
            batch_size,
            rounds,
            one_choice_mean = point.one_choice.mean(),
            two_choice_mean = point.two_choice.mean(),
            "sweep point complete"
        );
        points.push(point);
    }

    Ok(BatchedSweepResult {
        num_bins: config.num_bins,
        points,
    })
}

/// Run `trials` fresh batched processes of `rounds` rounds each
pub fn run_point<R>(
    num_bins: usize,
    batch_size: u64,
    rounds: u64,
    trials: u64,
    rounding: GapRounding,
    rng: &mut R,
) -> Result<BatchedPoint>
where
    R: RandomSource + ?Sized,
{
    let rounds = rounds.max(1);
    let mut one_choice = GapStats::new();
    let mut two_choice = GapStats::new();

    for trial in 0..trials {
        let mut process = BatchedProcess::new(num_bins, batch_size)?;

        process.step(rng)?;
        let first = one_choice.record(process.gap(), rounding);

        for _ in 1..rounds {
            process.step(rng)?;
        }
        let last = two_choice.record(process.gap(), rounding);
        debug!(trial, first_round_gap = first, final_gap = last, "trial complete");
    }

    Ok(BatchedPoint {
        batch_size,
        rounds,
        one_choice,
        two_choice,
    })
}
