//! Simulated Annealing over interval partitions.
//!
//! A single-solution trajectory search that moves one interior cut point
//! at a time, accepts worsening moves with a probability that shrinks as
//! the temperature decays geometrically, and keeps the best feasible
//! partition it visits.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod acceptance;
mod config;
mod runner;
mod types;

pub use acceptance::metropolis;
pub use config::AnnealingConfig;
pub use runner::{AnnealResult, AnnealingOptimizer};
pub use types::{AnnealPhase, NullSink, TraceRow, TraceSink, TracingSink};
