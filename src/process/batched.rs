//! Batched two-choice process
//!
//! Models the b-Batched setting: in each round `b` balls are allocated in
//! parallel, every decision made with the load information available at the
//! start of the round. Balls of the current round are collected in a buffer
//! and only become visible once the round completes.

use super::{AllocationProcess, LoadVector};
use crate::error::SimError;
use crate::random::RandomSource;
use crate::strategy::{DecisionRule, TwoChoice};

/// Two-choice process where each step is a round of `batch_size` balls
#[derive(Debug, Clone)]
pub struct BatchedProcess {
    loads: LoadVector,

    /// Balls allocated in the current round, zero between rounds
    buffer: Vec<u64>,

    batch_size: u64,
}

impl BatchedProcess {
    /// Create an empty batched process
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `num_bins == 0` or `batch_size == 0`.
    pub fn new(num_bins: usize, batch_size: u64) -> Result<Self, SimError> {
        if batch_size == 0 {
            return Err(SimError::invalid("batch_size must be at least 1"));
        }
        let loads = LoadVector::new(num_bins)?;
        Ok(Self {
            loads,
            buffer: vec![0; num_bins],
            batch_size,
        })
    }

    /// Balls placed per round
    pub fn batch_size(&self) -> u64 {
        self.batch_size
    }
}

impl AllocationProcess for BatchedProcess {
    fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<(), SimError> {
        let n = self.loads.num_bins();
        let snapshot = self.loads.as_slice();

        for _ in 0..self.batch_size {
            let i1 = rng.uniform_index(n);
            let i2 = rng.uniform_index(n);
            let chosen = TwoChoice.decide(snapshot, i1, i2, rng);
            match self.buffer.get_mut(chosen) {
                Some(count) => *count += 1,
                None => {
                    self.buffer.fill(0);
                    return Err(SimError::OutOfRange { index: chosen, num_bins: n });
                }
            }
        }

        self.loads.absorb(&mut self.buffer)
    }

    fn loads(&self) -> &LoadVector {
        &self.loads
    }
}
