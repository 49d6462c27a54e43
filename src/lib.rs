//! gapsim - Balls-into-bins allocation simulator
//!
//! gapsim measures the gap (maximum load minus average load) of two-sample
//! allocation processes, where each ball picks two bins uniformly at random
//! and a decision rule chooses where it goes.
//!
//! # Architecture
//!
//! - **Decision rules**: TwoChoice, g-Bounded, g-Myopic, sigma-Noisy
//! - **Processes**: incremental two-sample allocation and batched two-choice
//!   allocation against a frozen snapshot
//! - **Experiments**: parameter sweeps over many independent trials with
//!   gap histograms and means
//! - **Output**: text histograms and plot coordinates, optional JSON and CSV

pub mod config;
pub mod error;
pub mod experiment;
pub mod logging;
pub mod output;
pub mod process;
pub mod random;
pub mod stats;
pub mod strategy;

// Re-export commonly used types
pub use config::Config;
pub use error::SimError;
pub use process::{AllocationProcess, BatchedProcess, LoadVector, TwoSampleProcess};
pub use strategy::{DecisionRule, DecisionStrategy};

/// Result type used throughout gapsim
pub type Result<T> = anyhow::Result<T>;
