//! Incremental two-sample process

use super::{AllocationProcess, LoadVector};
use crate::error::SimError;
use crate::random::RandomSource;
use crate::strategy::{DecisionRule, DecisionStrategy};

/// Places one ball per step into one of two uniformly sampled bins
///
/// The two samples are drawn independently and may coincide; the decision
/// rule always sees the live loads, including every ball placed so far.
#[derive(Debug, Clone)]
pub struct TwoSampleProcess<D = DecisionStrategy> {
    loads: LoadVector,
    decider: D,
}

impl<D: DecisionRule> TwoSampleProcess<D> {
    /// Create an empty process over `num_bins` bins
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `num_bins == 0`.
    pub fn new(num_bins: usize, decider: D) -> Result<Self, SimError> {
        Ok(Self {
            loads: LoadVector::new(num_bins)?,
            decider,
        })
    }

    /// The decision rule in use
    pub fn decider(&self) -> &D {
        &self.decider
    }
}

impl<D: DecisionRule> AllocationProcess for TwoSampleProcess<D> {
    #[inline]
    fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<(), SimError> {
        let n = self.loads.num_bins();
        let i1 = rng.uniform_index(n);
        let i2 = rng.uniform_index(n);
        let chosen = self.decider.decide(self.loads.as_slice(), i1, i2, rng);
        self.loads.increment(chosen)
    }

    fn loads(&self) -> &LoadVector {
        &self.loads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::scripted::ScriptedSource;
    use crate::random::xoshiro::XoshiroSource;
    use crate::strategy::StrategyFamily;

    fn check_invariants<P: AllocationProcess>(process: &P) {
        let loads = process.load_vector();
        assert_eq!(loads.iter().sum::<u64>(), process.total_balls());
        assert_eq!(loads.iter().copied().max().unwrap_or(0), process.max_load());
    }

    #[test]
    fn test_zero_bins_rejected() {
        assert!(TwoSampleProcess::new(0, DecisionStrategy::TwoChoice).is_err());
    }

    #[test]
    fn test_scripted_ties_go_to_first_sample() {
        // Every pair is tied when drawn, so each ball lands on its first sample
        let mut rng = ScriptedSource::from_pairs(&[(0, 1), (2, 3), (0, 2), (1, 3)]);
        let mut process = TwoSampleProcess::new(4, DecisionStrategy::TwoChoice).unwrap();

        for _ in 0..4 {
            process.step(&mut rng).unwrap();
        }

        assert_eq!(process.load_vector(), vec![2, 1, 1, 0]);
        assert_eq!(process.max_load(), 2);
        assert_eq!(process.total_balls(), 4);
        assert_eq!(process.gap(), 1.0);
    }

    #[test]
    fn test_scripted_two_choice_balances_four_bins() {
        let mut rng = ScriptedSource::from_pairs(&[(0, 1), (2, 3), (1, 2), (3, 0)]);
        let mut process = TwoSampleProcess::new(4, DecisionStrategy::TwoChoice).unwrap();

        for _ in 0..4 {
            process.step(&mut rng).unwrap();
        }

        assert_eq!(process.load_vector(), vec![1, 1, 1, 1]);
        assert_eq!(process.max_load(), 1);
        assert_eq!(process.total_balls(), 4);
        assert_eq!(process.gap(), 0.0);
    }

    #[test]
    fn test_coinciding_samples_are_kept() {
        let mut rng = ScriptedSource::from_pairs(&[(2, 2)]);
        let mut process = TwoSampleProcess::new(3, DecisionStrategy::TwoChoice).unwrap();

        for _ in 0..3 {
            process.step(&mut rng).unwrap();
        }
        assert_eq!(process.load_vector(), vec![0, 0, 3]);
        assert_eq!(process.gap(), 2.0);
    }

    #[test]
    fn test_single_bin_gap_always_zero() {
        let mut rng = XoshiroSource::with_seed(5);
        for family in [
            StrategyFamily::TwoChoice,
            StrategyFamily::GBounded,
            StrategyFamily::GMyopic,
            StrategyFamily::SigmaNoisy,
        ] {
            let mut process = TwoSampleProcess::new(1, family.with_param(2.0).unwrap()).unwrap();
            for _ in 0..50 {
                process.step(&mut rng).unwrap();
                assert_eq!(process.gap(), 0.0);
            }
        }
    }

    #[test]
    fn test_invariants_hold_for_every_strategy() {
        let mut rng = XoshiroSource::with_seed(2024);
        for family in [
            StrategyFamily::TwoChoice,
            StrategyFamily::GBounded,
            StrategyFamily::GMyopic,
            StrategyFamily::SigmaNoisy,
        ] {
            let mut process = TwoSampleProcess::new(16, family.with_param(3.0).unwrap()).unwrap();
            for _ in 0..500 {
                process.step(&mut rng).unwrap();
                check_invariants(&process);
            }
            assert_eq!(process.total_balls(), 500);
        }
    }

    #[test]
    fn test_two_choice_beats_bounded_on_average() {
        let mut rng = XoshiroSource::with_seed(77);
        let n = 200;
        let balls = 20 * n as u64;

        let mut two_choice = TwoSampleProcess::new(n, DecisionStrategy::TwoChoice).unwrap();
        let mut bounded = TwoSampleProcess::new(n, DecisionStrategy::g_bounded(8)).unwrap();
        for _ in 0..balls {
            two_choice.step(&mut rng).unwrap();
            bounded.step(&mut rng).unwrap();
        }

        assert!(two_choice.gap() < bounded.gap());
    }

    #[test]
    fn test_load_vector_is_a_copy() {
        let mut rng = ScriptedSource::from_pairs(&[(0, 1)]);
        let mut process = TwoSampleProcess::new(2, DecisionStrategy::TwoChoice).unwrap();
        process.step(&mut rng).unwrap();

        let mut snapshot = process.load_vector();
        snapshot[1] = 10;
        assert_eq!(process.load_vector(), vec![1, 0]);
    }
}
