//! Report output
//!
//! Renderers consume finished [`ExperimentReport`](crate::experiment::ExperimentReport)
//! values and never touch the simulation. Text goes to stdout for humans and
//! plotting tools; JSON and CSV files are optional.

pub mod csv;
pub mod json;
pub mod text;
