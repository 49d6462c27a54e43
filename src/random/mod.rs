//! Randomness sources for the simulation
//!
//! Every component that needs randomness receives a `&mut` reference to a
//! [`RandomSource`] instead of being generic over a concrete generator type.
//! This keeps the allocation core independent of the generator and lets tests
//! substitute a scripted source with fully predictable draws.
//!
//! # Sources
//!
//! - **Xoshiro**: xoshiro256++ backed source used for real experiments
//! - **Scripted**: replays fixed sequences, for deterministic tests
//!
//! # Example
//!
//! ```
//! use gapsim::random::{RandomSource, xoshiro::XoshiroSource};
//!
//! let mut rng = XoshiroSource::with_seed(42);
//! let bin = rng.uniform_index(1024);
//! assert!(bin < 1024);
//! ```

/// Source of the three kinds of draws the allocation processes consume
///
/// A source must be deterministic given its seed and call sequence. No
/// particular generator algorithm is required; only the distributions matter.
///
/// # Thread Safety
///
/// Sources are `&mut self` throughout. A source shared across threads would
/// need external synchronization; experiments here run on a single thread.
pub trait RandomSource {
    /// Uniform integer in `[0, n)`
    ///
    /// Callers guarantee `n >= 1`.
    fn uniform_index(&mut self, n: usize) -> usize;

    /// Normal deviate with mean 0 and the given standard deviation
    fn normal(&mut self, stddev: f64) -> f64;

    /// Coin flip that is `true` with probability `p`
    fn bernoulli(&mut self, p: f64) -> bool;
}

pub mod scripted;
pub mod xoshiro;
