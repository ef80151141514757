//! Fragmentation check for a partition.
//!
//! A flexible operation may be split across at most two scheduling
//! intervals, and when split across two they must be adjacent.

use crate::model::{Operation, Partition};

/// Indices of the intervals whose open extent the operation overlaps.
pub fn overlapping_intervals(partition: &Partition, operation: &Operation) -> Vec<usize> {
    partition
        .intervals()
        .enumerate()
        .filter(|&(_, (start, end))| operation.overlaps(start, end))
        .map(|(i, _)| i)
        .collect()
}

/// Whether a single operation spans an acceptable set of intervals.
pub fn operation_fits(partition: &Partition, operation: &Operation) -> bool {
    let mut first = None;
    let mut second = None;
    for (i, (start, end)) in partition.intervals().enumerate() {
        if !operation.overlaps(start, end) {
            continue;
        }
        match (first, second) {
            (None, _) => first = Some(i),
            (Some(_), None) => second = Some(i),
            (Some(_), Some(_)) => return false,
        }
    }
    match (first, second) {
        (Some(a), Some(b)) => b - a == 1,
        _ => true,
    }
}

/// Whether every operation overlaps at most two intervals, and two only
/// when they are consecutive.
///
/// Stops at the first operation that violates the rule.
///
/// # Examples
///
/// ```
/// use u_autonomy::model::{Operation, Partition};
/// use u_autonomy::objective::is_feasible;
///
/// let ops = [Operation::new(1.0, 9.0, 2.0, 1.0).unwrap()];
/// let coarse = Partition::new(vec![0.0, 5.0, 10.0]).unwrap();
/// let fine = Partition::new(vec![0.0, 3.0, 6.0, 10.0]).unwrap();
/// assert!(is_feasible(&coarse, &ops));
/// assert!(!is_feasible(&fine, &ops));
/// ```
pub fn is_feasible(partition: &Partition, operations: &[Operation]) -> bool {
    operations.iter().all(|op| operation_fits(partition, op))
}
