//! Error taxonomy of the simulation core
//!
//! The core never retries: a configuration error fails fast at construction,
//! and an out-of-range index signals a defect in sampling logic. Both abort
//! the current run so a corrupted aggregate is never reported.

use thiserror::Error;

/// Errors raised by load vectors, processes and strategies
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A parameter is outside its valid domain (zero bins, zero batch size,
    /// negative noise standard deviation, ...)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A bin index outside `[0, num_bins)`
    #[error("bin index {index} out of range for {num_bins} bins")]
    OutOfRange { index: usize, num_bins: usize },
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
