//! Autonomy-margin optimization of interval partitions.
//!
//! A planning horizon is cut into scheduling intervals by a sorted list of
//! cut points. Flexible operations, each with an earliest start, a latest
//! finish and a required duration, are distributed across the intervals.
//! This crate searches for the cut points that maximize the **autonomy
//! margin**, the total slack the intervals leave to the operations:
//!
//! - [`model`]: [`Operation`](model::Operation) and
//!   [`Partition`](model::Partition), including the single-point neighbor
//!   move.
//! - [`objective`]: the pure feasibility check and autonomy evaluator,
//!   with the objective formulations found in the lineage of the method.
//! - [`sa`]: the Simulated Annealing optimizer with geometric cooling,
//!   Metropolis acceptance, best-solution tracking and a per-iteration
//!   trace.
//!
//! # Architecture
//!
//! This crate sits at Layer 2 (Algorithms) in the U-Engine ecosystem. It
//! has no UI, persistence or parsing concerns; callers supply validated data and
//! a [`TraceSink`](sa::TraceSink) and receive the best partition plus the
//! temperature and margin histories.

pub mod error;
pub mod model;
pub mod objective;
pub mod sa;

pub use error::{AutonomyError, Result};
