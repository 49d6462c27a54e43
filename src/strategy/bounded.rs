//! `g`-Bounded rule
//!
//! Models an adversarial process that sabotages balance once the two sampled
//! loads are already close: within distance `g` the TwoChoice decision is
//! reversed, beyond it TwoChoice is applied as usual.

use super::{heavier, lighter, DecisionRule};
use crate::random::RandomSource;

/// TwoChoice that allocates to the heavier bin when loads differ by at most `g`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GBounded {
    g: u64,
}

impl GBounded {
    pub fn new(g: u64) -> Self {
        Self { g }
    }

    pub fn g(&self) -> u64 {
        self.g
    }
}

impl DecisionRule for GBounded {
    #[inline]
    fn decide<R: RandomSource + ?Sized>(&self, loads: &[u64], i1: usize, i2: usize, _rng: &mut R) -> usize {
        if loads[i1].abs_diff(loads[i2]) > self.g {
            lighter(loads, i1, i2)
        } else {
            heavier(loads, i1, i2)
        }
    }
}
