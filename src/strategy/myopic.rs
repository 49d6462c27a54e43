//! `g`-Myopic rule
//!
//! Models a process that cannot see small load differences: when the two
//! samples are within distance `g` the ball goes to either with probability
//! one half.

use super::{lighter, DecisionRule};
use crate::random::RandomSource;

/// TwoChoice that flips a fair coin when loads differ by at most `g`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GMyopic {
    g: u64,
}

impl GMyopic {
    pub fn new(g: u64) -> Self {
        Self { g }
    }

    pub fn g(&self) -> u64 {
        self.g
    }
}

impl DecisionRule for GMyopic {
    #[inline]
    fn decide<R: RandomSource + ?Sized>(&self, loads: &[u64], i1: usize, i2: usize, rng: &mut R) -> usize {
        if loads[i1].abs_diff(loads[i2]) <= self.g {
            if rng.bernoulli(0.5) {
                i1
            } else {
                i2
            }
        } else {
            lighter(loads, i1, i2)
        }
    }
}
