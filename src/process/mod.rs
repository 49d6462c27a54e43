//! Allocation processes
//!
//! A process owns a [`LoadVector`] and places balls into it one step at a
//! time. Two shapes are provided:
//!
//! - **Incremental** ([`TwoSampleProcess`]): each step places one ball using
//!   the live load vector and any [`DecisionRule`](crate::strategy::DecisionRule)
//! - **Batched** ([`BatchedProcess`]): each step is a round of `b` balls
//!   decided by TwoChoice against the loads frozen at the start of the round
//!
//! # Example
//!
//! ```
//! use gapsim::process::{AllocationProcess, TwoSampleProcess};
//! use gapsim::random::xoshiro::XoshiroSource;
//! use gapsim::strategy::DecisionStrategy;
//!
//! let mut rng = XoshiroSource::with_seed(7);
//! let mut process = TwoSampleProcess::new(100, DecisionStrategy::TwoChoice)?;
//! for _ in 0..1000 {
//!     process.step(&mut rng)?;
//! }
//! assert_eq!(process.total_balls(), 1000);
//! assert!(process.gap() >= 0.0);
//! # Ok::<(), gapsim::error::SimError>(())
//! ```

pub mod batched;
pub mod load;
pub mod two_sample;

pub use batched::BatchedProcess;
pub use load::LoadVector;
pub use two_sample::TwoSampleProcess;

use crate::error::SimError;
use crate::random::RandomSource;

/// Common surface of both process shapes
///
/// State is only observable through the accessors; `load_vector()` hands out
/// a copy so callers cannot mutate the process from outside.
pub trait AllocationProcess {
    /// Perform one step (one ball, or one round for batched processes)
    fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<(), SimError>;

    /// Borrow the underlying load vector
    fn loads(&self) -> &LoadVector;

    /// Current gap between maximum and average load
    fn gap(&self) -> f64 {
        self.loads().gap()
    }

    /// Current maximum load
    fn max_load(&self) -> u64 {
        self.loads().max_load()
    }

    /// Total balls placed so far
    fn total_balls(&self) -> u64 {
        self.loads().total_balls()
    }

    /// Copy of the current per-bin loads
    fn load_vector(&self) -> Vec<u64> {
        self.loads().to_vec()
    }
}
