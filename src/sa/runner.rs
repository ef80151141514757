//! Annealing search loop.
//!
//! # Algorithm
//!
//! 1. Reject an infeasible initial partition without running any iteration
//! 2. While the temperature is above the final temperature:
//!    a. Repeat `iterations_per_temperature` times: perturb the current
//!       partition; if the neighbor is feasible, apply Metropolis and
//!       update the best partition; record one trace row
//!    b. Multiply the temperature by the cooling rate
//! 3. Return the best partition

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::acceptance::metropolis;
use super::config::AnnealingConfig;
use super::types::{AnnealPhase, TraceRow, TraceSink};
use crate::error::{AutonomyError, Result};
use crate::model::{Operation, Partition};
use crate::objective::{Evaluator, IntervalMargin};

/// Upper bound on history entries reserved up front; longer runs grow
/// the histories on demand.
const MAX_PREALLOCATED_ROWS: usize = 1 << 16;

/// Summary of a completed annealing run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealResult {
    /// The best partition found.
    pub best: Partition,

    /// Autonomy margin of the best partition.
    pub best_margin: f64,

    /// Total inner iterations (neighbor evaluations).
    pub iterations: usize,

    /// Number of temperature levels visited.
    pub temperature_steps: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Feasible neighbors adopted as current, improving or not.
    pub accepted_moves: usize,

    /// Accepted neighbors that strictly improved the current margin.
    pub improving_moves: usize,

    /// Neighbors discarded because they were infeasible.
    pub infeasible_neighbors: usize,
}

/// Maximizes the autonomy margin of a partition by simulated annealing.
///
/// The optimizer owns the operation set, the current and best partitions,
/// the random generator and the iteration histories. It borrows a
/// [`TraceSink`] that receives one line per inner iteration.
///
/// # Examples
///
/// ```
/// use u_autonomy::model::{Operation, Partition};
/// use u_autonomy::sa::{AnnealingConfig, AnnealingOptimizer};
///
/// let operations = vec![
///     Operation::new(0.0, 4.0, 2.0, 1.0).unwrap(),
///     Operation::new(3.0, 8.0, 3.0, 1.0).unwrap(),
/// ];
/// let initial = Partition::new(vec![0.0, 5.0, 10.0]).unwrap();
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(5.0)
///     .with_final_temperature(0.1)
///     .with_cooling_rate(0.85)
///     .with_iterations_per_temperature(10)
///     .with_seed(42);
///
/// let mut log = Vec::new();
/// let mut sink = |line: &str| log.push(line.to_string());
/// let mut optimizer = AnnealingOptimizer::new(operations, initial, config, &mut sink).unwrap();
/// let result = optimizer.optimize().expect("initial partition is feasible");
///
/// assert_eq!(result.best.horizon(), (0.0, 10.0));
/// assert_eq!(optimizer.margin_history().len(), 250);
/// drop(optimizer);
/// assert_eq!(log.len(), 250);
/// ```
pub struct AnnealingOptimizer<'s, S: TraceSink + ?Sized, R: Rng = StdRng> {
    evaluator: Evaluator,
    config: AnnealingConfig,
    sink: &'s mut S,
    rng: R,
    phase: AnnealPhase,

    current: Partition,
    current_margin: f64,
    best: Partition,
    best_margin: f64,
    temperature: f64,

    iterations: usize,
    temperature_steps: usize,
    accepted_moves: usize,
    improving_moves: usize,
    infeasible_neighbors: usize,

    temperature_history: Vec<f64>,
    margin_history: Vec<f64>,
    best_margin_history: Vec<f64>,
}

impl<'s, S: TraceSink + ?Sized> AnnealingOptimizer<'s, S, StdRng> {
    /// Creates an optimizer with a `StdRng` seeded from `config.seed`, or
    /// from a random seed when none is set.
    pub fn new(
        operations: Vec<Operation>,
        initial: Partition,
        config: AnnealingConfig,
        sink: &'s mut S,
    ) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::with_rng(operations, initial, config, sink, StdRng::seed_from_u64(seed))
    }
}

impl<'s, S: TraceSink + ?Sized, R: Rng> AnnealingOptimizer<'s, S, R> {
    /// Creates an optimizer drawing every random decision from `rng`.
    ///
    /// Fails when the configuration is invalid, the operation set is
    /// empty, or the partition has no interior cut point to move.
    /// Feasibility of `initial` is checked later, by [`optimize`](Self::optimize).
    pub fn with_rng(
        operations: Vec<Operation>,
        initial: Partition,
        config: AnnealingConfig,
        sink: &'s mut S,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        if !initial.has_interior() {
            return Err(AutonomyError::NoInteriorCutPoint);
        }
        let evaluator = Evaluator::new(operations, config.formulation)?;
        let margin = evaluator.autonomy(&initial);
        let capacity = config.total_iterations().min(MAX_PREALLOCATED_ROWS);
        let temperature = config.initial_temperature;

        Ok(Self {
            evaluator,
            config,
            sink,
            rng,
            phase: AnnealPhase::Initializing,
            best: initial.clone(),
            current: initial,
            current_margin: margin,
            best_margin: margin,
            temperature,
            iterations: 0,
            temperature_steps: 0,
            accepted_moves: 0,
            improving_moves: 0,
            infeasible_neighbors: 0,
            temperature_history: Vec::with_capacity(capacity),
            margin_history: Vec::with_capacity(capacity),
            best_margin_history: Vec::with_capacity(capacity),
        })
    }

    /// Runs the search to completion and returns its summary.
    ///
    /// Returns `None`, after reporting it to the sink, when the initial
    /// partition is infeasible; no iteration runs in that case. Calling
    /// this again after the search finished returns the recorded outcome
    /// without searching again.
    pub fn optimize(&mut self) -> Option<AnnealResult> {
        if self.phase != AnnealPhase::Initializing {
            debug!(event = "anneal_repeat", phase = ?self.phase);
            return self.result();
        }

        if !self.evaluator.is_feasible(&self.current) {
            self.phase = AnnealPhase::Rejected;
            self.sink.emit(&format!(
                "Initial solution {} is infeasible: an operation spans more than two intervals or two non-adjacent intervals",
                self.current
            ));
            warn!(
                event = "anneal_rejected",
                cut_points = self.current.len(),
                operations = self.evaluator.operations().len(),
            );
            return None;
        }

        info!(
            event = "anneal_start",
            operations = self.evaluator.operations().len(),
            cut_points = self.current.len(),
            initial_margin = self.current_margin,
            planned_steps = self.config.temperature_steps(),
        );

        self.phase = AnnealPhase::Searching;
        while self.temperature > self.config.final_temperature {
            for _ in 0..self.config.iterations_per_temperature {
                self.step();
            }
            debug!(
                event = "temperature_step",
                step = self.temperature_steps,
                temperature = self.temperature,
                current_margin = self.current_margin,
                best_margin = self.best_margin,
            );
            self.temperature *= self.config.cooling_rate;
            self.temperature_steps += 1;
        }
        self.phase = AnnealPhase::Cooled;

        info!(
            event = "anneal_end",
            best_margin = self.best_margin,
            iterations = self.iterations,
            steps = self.temperature_steps,
            accepted = self.accepted_moves,
            infeasible = self.infeasible_neighbors,
        );
        self.result()
    }

    fn step(&mut self) {
        let neighbor = self
            .current
            .perturb(&mut self.rng)
            .expect("construction guarantees an interior cut point");

        let mut delta = 0.0;
        let mut accepted = false;
        if self.evaluator.is_feasible(&neighbor) {
            let neighbor_margin = self.evaluator.autonomy(&neighbor);
            delta = neighbor_margin - self.current_margin;
            accepted = metropolis(
                self.current_margin,
                neighbor_margin,
                self.temperature,
                &mut self.rng,
            );
            if accepted {
                self.accepted_moves += 1;
                if delta > 0.0 {
                    self.improving_moves += 1;
                }
                self.current_margin = neighbor_margin;
            }
            if neighbor_margin > self.best_margin {
                self.best = neighbor.clone();
                self.best_margin = neighbor_margin;
            }
        } else {
            self.infeasible_neighbors += 1;
        }

        self.iterations += 1;
        self.temperature_history.push(self.temperature);
        self.margin_history.push(self.current_margin);
        self.best_margin_history.push(self.best_margin);

        let row = TraceRow {
            iteration: self.iterations,
            temperature: self.temperature,
            delta,
            best_margin: self.best_margin,
            neighbor: &neighbor,
        };
        self.sink.emit(&row.to_string());

        if accepted {
            self.current = neighbor;
        }
    }

    fn result(&self) -> Option<AnnealResult> {
        if self.phase != AnnealPhase::Cooled {
            return None;
        }
        Some(AnnealResult {
            best: self.best.clone(),
            best_margin: self.best_margin,
            iterations: self.iterations,
            temperature_steps: self.temperature_steps,
            final_temperature: self.temperature,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            infeasible_neighbors: self.infeasible_neighbors,
        })
    }

    pub fn phase(&self) -> AnnealPhase {
        self.phase
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn current(&self) -> &Partition {
        &self.current
    }

    pub fn best(&self) -> &Partition {
        &self.best
    }

    pub fn best_margin(&self) -> f64 {
        self.best_margin
    }

    /// Current temperature; the final value once the search has cooled.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Inner iterations executed so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Autonomy margin of any partition under this optimizer's operations.
    pub fn autonomy(&self, partition: &Partition) -> f64 {
        self.evaluator.autonomy(partition)
    }

    /// Per-interval margins of any partition under this optimizer's operations.
    pub fn interval_margins(&self, partition: &Partition) -> Vec<IntervalMargin> {
        self.evaluator.interval_margins(partition)
    }

    /// Temperature at each inner iteration.
    pub fn temperature_history(&self) -> &[f64] {
        &self.temperature_history
    }

    /// Margin of the current partition after each inner iteration.
    pub fn margin_history(&self) -> &[f64] {
        &self.margin_history
    }

    /// Best margin after each inner iteration. Never decreases.
    pub fn best_margin_history(&self) -> &[f64] {
        &self.best_margin_history
    }
}
