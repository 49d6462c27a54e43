//! `sigma`-Noisy rule
//!
//! Each sampled load is observed with independent Gaussian noise of standard
//! deviation `sigma`. The noisy estimates are truncated toward zero to whole
//! numbers before comparison, and ties go to the first sample.
//!
//! Estimates are computed in `f64`, so loads above 2^53 lose resolution and
//! neighbouring loads can compare as equal. Estimates beyond the `i64` range
//! saturate. Realistic runs stay far below either limit.

use super::{lighter, DecisionRule};
use crate::error::SimError;
use crate::random::RandomSource;

/// TwoChoice on loads perturbed by N(0, sigma) noise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaNoisy {
    sigma: f64,
}

impl SigmaNoisy {
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a negative or non-finite sigma.
    pub fn new(sigma: f64) -> Result<Self, SimError> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(SimError::invalid(format!(
                "sigma must be finite and non-negative, got {}",
                sigma
            )));
        }
        Ok(Self { sigma })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl DecisionRule for SigmaNoisy {
    #[inline]
    fn decide<R: RandomSource + ?Sized>(&self, loads: &[u64], i1: usize, i2: usize, rng: &mut R) -> usize {
        // Without noise the estimates are the loads themselves
        if self.sigma == 0.0 {
            return lighter(loads, i1, i2);
        }

        let estimate_1 = (loads[i1] as f64 + rng.normal(self.sigma)).trunc() as i64;
        let estimate_2 = (loads[i2] as f64 + rng.normal(self.sigma)).trunc() as i64;
        if estimate_1 <= estimate_2 {
            i1
        } else {
            i2
        }
    }
}
