//! Gap statistics
//!
//! Each trial contributes one rounded gap. A [`GapStats`] accumulator collects
//! them into a mean, an exact histogram (rounded gap → number of trials) and
//! quantiles. Accumulators are plain values: every sweep point builds its own
//! and hands it back to the caller.
//!
//! # Example
//!
//! ```
//! use gapsim::stats::{GapRounding, GapStats};
//!
//! let mut stats = GapStats::new();
//! stats.record(2.4, GapRounding::Ceil);
//! stats.record(1.0, GapRounding::Ceil);
//!
//! assert_eq!(stats.trials(), 2);
//! assert_eq!(stats.mean(), 2.0);
//! assert_eq!(stats.percentages(), vec![(1, 50), (3, 50)]);
//! ```

pub mod histogram;

use histogram::GapQuantiles;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a real-valued gap is turned into a histogram key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GapRounding {
    /// Smallest integer not below the gap (batched experiments)
    Ceil,
    /// Drop the fractional part (noise experiments)
    Truncate,
}

impl GapRounding {
    #[inline]
    pub fn apply(self, gap: f64) -> i64 {
        match self {
            Self::Ceil => gap.ceil() as i64,
            Self::Truncate => gap.trunc() as i64,
        }
    }
}

/// Accumulator of rounded gaps over independent trials
#[derive(Debug, Clone, Default)]
pub struct GapStats {
    trials: u64,
    sum: i64,
    counts: BTreeMap<i64, u64>,
    quantiles: GapQuantiles,
}

impl GapStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Round a gap and record it
    pub fn record(&mut self, gap: f64, rounding: GapRounding) -> i64 {
        let rounded = rounding.apply(gap);
        self.record_rounded(rounded);
        rounded
    }

    /// Record an already rounded gap
    pub fn record_rounded(&mut self, gap: i64) {
        self.trials += 1;
        self.sum += gap;
        *self.counts.entry(gap).or_insert(0) += 1;
        self.quantiles.record(gap);
    }

    /// Number of recorded trials
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Mean rounded gap, `0.0` without trials
    pub fn mean(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.sum as f64 / self.trials as f64
        }
    }

    /// Rounded gap → number of trials, in ascending gap order
    pub fn histogram(&self) -> &BTreeMap<i64, u64> {
        &self.counts
    }

    /// Rounded gap → whole percentage of trials (`count * 100 / trials`)
    ///
    /// Integer division, so the entries sum to at most 100 and fall short by
    /// less than one per histogram entry.
    pub fn percentages(&self) -> Vec<(i64, u64)> {
        if self.trials == 0 {
            return Vec::new();
        }
        self.counts
            .iter()
            .map(|(&gap, &count)| (gap, count * 100 / self.trials))
            .collect()
    }

    /// Rounded gap at a percentile (0.0 - 100.0), `None` without trials
    pub fn percentile(&self, percentile: f64) -> Option<u64> {
        self.quantiles.percentile(percentile)
    }
}
