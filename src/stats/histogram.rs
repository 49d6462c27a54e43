//! Gap quantiles using HdrHistogram
//!
//! Rounded gaps are small non-negative integers, so an auto-resizing
//! histogram with 3 significant digits records them exactly. Quantiles are
//! reported next to the exact per-value histogram in machine-readable output.

use hdrhistogram::Histogram;

/// Quantile tracker for rounded gap values
#[derive(Debug, Clone)]
pub struct GapQuantiles {
    histogram: Histogram<u64>,
}

impl GapQuantiles {
    /// Create an empty, auto-resizing tracker
    pub fn new() -> Self {
        let histogram = Histogram::new(3)
            .expect("Failed to create histogram with 3 significant digits");
        Self { histogram }
    }

    /// Record one rounded gap
    ///
    /// Negative values cannot occur for a valid gap and are clamped to zero.
    #[inline]
    pub fn record(&mut self, gap: i64) {
        let value = gap.max(0) as u64;
        // Auto-resizing histogram: recording cannot go out of range
        let _ = self.histogram.record(value);
    }

    /// Value at the given percentile (0.0 - 100.0), `None` when empty
    pub fn percentile(&self, percentile: f64) -> Option<u64> {
        if self.is_empty() {
            return None;
        }
        Some(self.histogram.value_at_quantile(percentile / 100.0))
    }

    /// Number of recorded gaps
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.len() == 0
    }
}

impl Default for GapQuantiles {
    fn default() -> Self {
        Self::new()
    }
}
