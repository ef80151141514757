//! Progress reporting and lifecycle types for the annealing search.

use std::fmt;

use crate::model::Partition;

/// Receives one formatted line per inner iteration, in iteration order.
///
/// The optimizer borrows its sink for its whole lifetime and calls it
/// synchronously from the search loop. Any `FnMut(&str)` closure is a sink:
///
/// ```
/// use u_autonomy::sa::TraceSink;
///
/// let mut lines = Vec::new();
/// let mut sink = |line: &str| lines.push(line.to_string());
/// sink.emit("Iter 1 | ...");
/// assert_eq!(lines.len(), 1);
/// ```
pub trait TraceSink {
    /// Delivers one line.
    fn emit(&mut self, line: &str);
}

impl<F: FnMut(&str)> TraceSink for F {
    fn emit(&mut self, line: &str) {
        self(line)
    }
}

/// Sink that forwards every line to `tracing` at TRACE level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TraceSink for TracingSink {
    fn emit(&mut self, line: &str) {
        tracing::trace!(target: "u_autonomy::trace", "{line}");
    }
}

/// Sink that discards every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn emit(&mut self, _line: &str) {}
}

/// One inner iteration of the search, as reported to the sink.
#[derive(Debug, Clone)]
pub struct TraceRow<'a> {
    /// 1-based iteration counter.
    pub iteration: usize,
    /// Temperature during this iteration.
    pub temperature: f64,
    /// `margin(neighbor) - margin(current)`; 0 when the neighbor was infeasible.
    pub delta: f64,
    /// Best margin found so far, after this iteration.
    pub best_margin: f64,
    /// The neighbor evaluated in this iteration.
    pub neighbor: &'a Partition,
}

impl fmt::Display for TraceRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Iter {} | T = {:.5} | ΔW = {:.4} | Best W = {:.4} | Neighbor = {}",
            self.iteration, self.temperature, self.delta, self.best_margin, self.neighbor
        )
    }
}

/// Lifecycle of an [`AnnealingOptimizer`](super::AnnealingOptimizer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnealPhase {
    /// Constructed; the search has not run yet.
    Initializing,
    /// Inside the temperature loop.
    Searching,
    /// The temperature reached the final temperature.
    Cooled,
    /// The initial partition was infeasible; no iteration ran.
    Rejected,
}

impl AnnealPhase {
    /// Whether the search has finished, successfully or not.
    pub fn is_terminal(self) -> bool {
        matches!(self, AnnealPhase::Cooled | AnnealPhase::Rejected)
    }
}
