//! Decision rules for two-sample allocation
//!
//! A decision rule looks at the loads of two sampled bins and picks which one
//! receives the ball. Rules are stateless apart from their configuration, so
//! the same rule can be applied any number of times without side effects
//! (other than consuming draws from the random source).
//!
//! # Rules
//!
//! - **TwoChoice**: less loaded bin wins, ties go to the first sample
//! - **GBounded**: reverses TwoChoice when the loads differ by at most `g`
//! - **GMyopic**: flips a fair coin when the loads differ by at most `g`
//! - **SigmaNoisy**: compares loads perturbed by N(0, sigma) noise
//!
//! # Example
//!
//! ```
//! use gapsim::strategy::{DecisionRule, DecisionStrategy};
//! use gapsim::random::xoshiro::XoshiroSource;
//!
//! let mut rng = XoshiroSource::with_seed(1);
//! let loads = [3, 1, 4];
//! let chosen = DecisionStrategy::TwoChoice.decide(&loads, 0, 1, &mut rng);
//! assert_eq!(chosen, 1);
//! ```

use crate::error::SimError;
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod bounded;
pub mod myopic;
pub mod noisy;
pub mod two_choice;

pub use bounded::GBounded;
pub use myopic::GMyopic;
pub use noisy::SigmaNoisy;
pub use two_choice::TwoChoice;

/// Capability shared by all decision rules
///
/// Implementations must return either `i1` or `i2`, and must not keep state
/// between calls. Both indices are valid for `loads`; they may be equal.
pub trait DecisionRule {
    /// Choose the bin that receives the ball
    fn decide<R: RandomSource + ?Sized>(&self, loads: &[u64], i1: usize, i2: usize, rng: &mut R) -> usize;
}

/// One of the four decision rules, selected at configuration time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecisionStrategy {
    TwoChoice,
    GBounded(GBounded),
    GMyopic(GMyopic),
    SigmaNoisy(SigmaNoisy),
}

impl DecisionStrategy {
    /// `g`-Bounded rule
    pub fn g_bounded(g: u64) -> Self {
        Self::GBounded(GBounded::new(g))
    }

    /// `g`-Myopic rule
    pub fn g_myopic(g: u64) -> Self {
        Self::GMyopic(GMyopic::new(g))
    }

    /// `sigma`-Noisy rule
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for a negative or non-finite sigma.
    pub fn sigma_noisy(sigma: f64) -> Result<Self, SimError> {
        Ok(Self::SigmaNoisy(SigmaNoisy::new(sigma)?))
    }
}

impl Default for DecisionStrategy {
    fn default() -> Self {
        Self::TwoChoice
    }
}

impl DecisionRule for DecisionStrategy {
    #[inline]
    fn decide<R: RandomSource + ?Sized>(&self, loads: &[u64], i1: usize, i2: usize, rng: &mut R) -> usize {
        match self {
            Self::TwoChoice => TwoChoice.decide(loads, i1, i2, rng),
            Self::GBounded(rule) => rule.decide(loads, i1, i2, rng),
            Self::GMyopic(rule) => rule.decide(loads, i1, i2, rng),
            Self::SigmaNoisy(rule) => rule.decide(loads, i1, i2, rng),
        }
    }
}

impl fmt::Display for DecisionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TwoChoice => write!(f, "two-choice"),
            Self::GBounded(rule) => write!(f, "g-bounded(g={})", rule.g()),
            Self::GMyopic(rule) => write!(f, "g-myopic(g={})", rule.g()),
            Self::SigmaNoisy(rule) => write!(f, "sigma-noisy(sigma={})", rule.sigma()),
        }
    }
}

/// Family of strategies indexed by one swept parameter
///
/// Sweeps vary `g` for the threshold rules and `sigma` for the noisy rule.
/// TwoChoice ignores the parameter, which makes it a flat baseline series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyFamily {
    TwoChoice,
    GBounded,
    GMyopic,
    #[default]
    SigmaNoisy,
}

impl StrategyFamily {
    /// Build the concrete strategy for one sweep value
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `param` is not a valid `g` (a
    /// non-negative whole number) or `sigma` (non-negative, finite).
    pub fn with_param(self, param: f64) -> Result<DecisionStrategy, SimError> {
        match self {
            Self::TwoChoice => Ok(DecisionStrategy::TwoChoice),
            Self::GBounded => Ok(DecisionStrategy::g_bounded(threshold(param)?)),
            Self::GMyopic => Ok(DecisionStrategy::g_myopic(threshold(param)?)),
            Self::SigmaNoisy => DecisionStrategy::sigma_noisy(param),
        }
    }

    /// Name used in report headers
    pub fn name(self) -> &'static str {
        match self {
            Self::TwoChoice => "two-choice",
            Self::GBounded => "g-bounded",
            Self::GMyopic => "g-myopic",
            Self::SigmaNoisy => "sigma-noisy",
        }
    }

    /// Name of the swept parameter
    pub fn param_name(self) -> &'static str {
        match self {
            Self::SigmaNoisy => "sigma",
            Self::TwoChoice | Self::GBounded | Self::GMyopic => "g",
        }
    }
}

impl fmt::Display for StrategyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert a swept value into a `g` threshold
fn threshold(param: f64) -> Result<u64, SimError> {
    if !param.is_finite() || param < 0.0 || param.fract() != 0.0 {
        return Err(SimError::invalid(format!(
            "g must be a non-negative whole number, got {}",
            param
        )));
    }
    Ok(param as u64)
}

/// Baseline comparison used by every rule: smaller load wins, ties to `i1`
#[inline(always)]
pub(crate) fn lighter(loads: &[u64], i1: usize, i2: usize) -> usize {
    if loads[i1] <= loads[i2] {
        i1
    } else {
        i2
    }
}

/// Reverse of [`lighter`]: `i2` unless `i1` is strictly heavier
#[inline(always)]
pub(crate) fn heavier(loads: &[u64], i1: usize, i2: usize) -> usize {
    if loads[i1] <= loads[i2] {
        i2
    } else {
        i1
    }
}
