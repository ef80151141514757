//! Feasibility and autonomy evaluation.
//!
//! Both checks are pure functions of an operation set and a partition.
//! [`Evaluator`] bundles an owned operation set with the chosen
//! [`AutonomyFormulation`] so the search loop can call them repeatedly.

mod autonomy;
mod feasibility;

pub use autonomy::{autonomy, interval_margins, AutonomyFormulation, IntervalMargin};
pub use feasibility::{is_feasible, operation_fits, overlapping_intervals};

use crate::error::{AutonomyError, Result};
use crate::model::{Operation, Partition};

/// An operation set paired with an objective formulation.
#[derive(Debug, Clone)]
pub struct Evaluator {
    operations: Vec<Operation>,
    formulation: AutonomyFormulation,
}

impl Evaluator {
    /// Creates an evaluator over a non-empty operation set.
    pub fn new(operations: Vec<Operation>, formulation: AutonomyFormulation) -> Result<Self> {
        if operations.is_empty() {
            return Err(AutonomyError::NoOperations);
        }
        Ok(Self {
            operations,
            formulation,
        })
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn formulation(&self) -> AutonomyFormulation {
        self.formulation
    }

    /// See [`is_feasible`].
    pub fn is_feasible(&self, partition: &Partition) -> bool {
        is_feasible(partition, &self.operations)
    }

    /// See [`autonomy`].
    pub fn autonomy(&self, partition: &Partition) -> f64 {
        autonomy(partition, &self.operations, self.formulation)
    }

    /// See [`interval_margins`].
    pub fn interval_margins(&self, partition: &Partition) -> Vec<IntervalMargin> {
        interval_margins(partition, &self.operations, self.formulation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluator_rejects_empty() {
        assert!(matches!(
            Evaluator::new(Vec::new(), AutonomyFormulation::Overlap),
            Err(AutonomyError::NoOperations)
        ));
    }

    #[test]
    fn test_evaluator_delegates() {
        let ops = vec![
            Operation::new(0.0, 4.0, 2.0, 1.0).unwrap(),
            Operation::new(3.0, 8.0, 3.0, 1.0).unwrap(),
        ];
        let p = Partition::new(vec![0.0, 5.0, 10.0]).unwrap();
        let evaluator = Evaluator::new(ops.clone(), AutonomyFormulation::WindowBounds).unwrap();

        assert_eq!(evaluator.operations().len(), 2);
        assert_eq!(evaluator.formulation(), AutonomyFormulation::WindowBounds);
        assert!(evaluator.is_feasible(&p));
        assert_eq!(
            evaluator.autonomy(&p),
            autonomy(&p, &ops, AutonomyFormulation::WindowBounds)
        );
        assert_eq!(evaluator.interval_margins(&p).len(), 2);
    }
}
