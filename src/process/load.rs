//! Load vector shared by all allocation processes

use crate::error::SimError;

/// Per-bin loads plus the running counters derived from them
///
/// Invariants maintained by every mutating method:
/// - `sum(loads) == total_balls`
/// - `max_load == max(loads)`
/// - `num_bins` never changes after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadVector {
    loads: Vec<u64>,
    total_balls: u64,
    max_load: u64,
}

impl LoadVector {
    /// Create an all-zero load vector
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `num_bins == 0`.
    pub fn new(num_bins: usize) -> Result<Self, SimError> {
        if num_bins == 0 {
            return Err(SimError::invalid("num_bins must be at least 1"));
        }
        Ok(Self {
            loads: vec![0; num_bins],
            total_balls: 0,
            max_load: 0,
        })
    }

    /// Place one ball into `index`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `index >= num_bins`.
    #[inline]
    pub fn increment(&mut self, index: usize) -> Result<(), SimError> {
        let num_bins = self.loads.len();
        let load = self
            .loads
            .get_mut(index)
            .ok_or(SimError::OutOfRange { index, num_bins })?;
        *load += 1;
        self.total_balls += 1;
        self.max_load = self.max_load.max(*load);
        Ok(())
    }

    /// Add a per-bin count buffer into the loads and zero the buffer
    ///
    /// The buffer is zeroed even when it is rejected, so its contents never
    /// carry over into a later round.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the buffer length differs from `num_bins`.
    pub fn absorb(&mut self, buffer: &mut [u64]) -> Result<(), SimError> {
        if buffer.len() != self.loads.len() {
            let index = buffer.len();
            buffer.fill(0);
            return Err(SimError::OutOfRange {
                index,
                num_bins: self.loads.len(),
            });
        }

        for (load, pending) in self.loads.iter_mut().zip(buffer.iter_mut()) {
            *load += *pending;
            self.total_balls += *pending;
            self.max_load = self.max_load.max(*load);
            *pending = 0;
        }
        Ok(())
    }

    /// Number of bins
    pub fn num_bins(&self) -> usize {
        self.loads.len()
    }

    /// Total number of balls placed
    pub fn total_balls(&self) -> u64 {
        self.total_balls
    }

    /// Current maximum load
    pub fn max_load(&self) -> u64 {
        self.max_load
    }

    /// Load of a single bin, `None` if out of range
    pub fn load(&self, index: usize) -> Option<u64> {
        self.loads.get(index).copied()
    }

    /// Current gap: `max_load - total_balls / num_bins`
    ///
    /// Well defined for the empty vector, where it is `0.0`.
    pub fn gap(&self) -> f64 {
        self.max_load as f64 - self.total_balls as f64 / self.loads.len() as f64
    }

    /// Borrow the loads for decision rules
    pub fn as_slice(&self) -> &[u64] {
        &self.loads
    }

    /// Copy of the loads
    pub fn to_vec(&self) -> Vec<u64> {
        self.loads.clone()
    }
}
