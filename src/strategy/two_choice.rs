//! Plain two-choice rule ("power of two choices")

use super::{lighter, DecisionRule};
use crate::random::RandomSource;

/// Allocate to the less loaded of the two samples, ties to the first
///
/// Consumes no randomness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoChoice;

impl DecisionRule for TwoChoice {
    #[inline(always)]
    fn decide<R: RandomSource + ?Sized>(&self, loads: &[u64], i1: usize, i2: usize, _rng: &mut R) -> usize {
        lighter(loads, i1, i2)
    }
}
