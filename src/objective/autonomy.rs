//! Autonomy margin of a partition.
//!
//! For every interval the evaluator accumulates `w_max`, the most
//! processing the intersecting operations could place inside it, and
//! `w_min`, the processing they are forced to place inside it. The
//! interval margin is `w_max - w_min`; the autonomy margin is the sum over
//! all intervals. Higher is better.

use crate::model::{Operation, Partition};

/// Which per-operation terms the evaluator uses.
///
/// Two formulations of the objective exist in the lineage of this
/// method, plus the bound-based variant the first implementation shipped.
///
/// | Variant | Terms | Operations contained in the interval |
/// |---------|-------|--------------------------------------|
/// | `Overlap` | overlap/slack | included |
/// | `OverlapExcludingContained` | overlap/slack | skipped |
/// | `WindowBounds` | window bounds | skipped |
///
/// Under the overlap terms a contained operation always contributes
/// `w_max == w_min`, so the first two variants agree on every input.
/// `WindowBounds` does not; its margins can be negative for ordinary
/// operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AutonomyFormulation {
    /// For an operation `(c, f, d)` and interval `[a, b]`:
    ///
    /// - `available = max(0, min(f, b) - max(c, a))`
    /// - `w_max = min(available, d)`
    /// - `forced = max(0, d - max(0, a - c) - max(0, f - b))`
    /// - `w_min = min(forced, available)`
    #[default]
    Overlap,

    /// `Overlap` terms, skipping operations whose window lies inside the
    /// interval.
    OverlapExcludingContained,

    /// Skips contained operations and uses
    ///
    /// - `w_max = min(d, b - c, f - a)`
    /// - `w_min = max(0, b - f + d, c + d - a)`
    WindowBounds,
}

impl AutonomyFormulation {
    /// Whether operations contained in an interval are left out of its sums.
    pub fn skips_contained(self) -> bool {
        !matches!(self, AutonomyFormulation::Overlap)
    }

    /// `(w_max, w_min)` contribution of one operation to interval
    /// `[start, end]`, or `None` when the operation does not take part.
    #[inline]
    pub fn contribution(self, operation: &Operation, start: f64, end: f64) -> Option<(f64, f64)> {
        let c = operation.earliest_start();
        let f = operation.latest_finish();
        let d = operation.duration();

        if f <= start || c >= end {
            return None;
        }
        if self.skips_contained() && operation.is_contained_in(start, end) {
            return None;
        }

        match self {
            AutonomyFormulation::Overlap | AutonomyFormulation::OverlapExcludingContained => {
                let available = (f.min(end) - c.max(start)).max(0.0);
                let slack_before = (start - c).max(0.0);
                let slack_after = (f - end).max(0.0);
                let forced = (d - slack_before - slack_after).max(0.0);
                Some((available.min(d), forced.min(available)))
            }
            AutonomyFormulation::WindowBounds => {
                let w_max = d.min(end - c).min(f - start);
                let w_min = (end - f + d).max(c + d - start).max(0.0);
                Some((w_max, w_min))
            }
        }
    }
}

/// Margin breakdown for one interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalMargin {
    /// Interval start `p_i`.
    pub start: f64,
    /// Interval end `p_{i+1}`.
    pub end: f64,
    /// Maximum processing the operations could place in the interval.
    pub w_max: f64,
    /// Processing the operations are forced to place in the interval.
    pub w_min: f64,
}

impl IntervalMargin {
    /// `w_max - w_min`; may be negative.
    #[inline]
    pub fn margin(&self) -> f64 {
        self.w_max - self.w_min
    }
}

fn interval_margin(
    formulation: AutonomyFormulation,
    operations: &[Operation],
    start: f64,
    end: f64,
) -> IntervalMargin {
    let (w_max, w_min) = operations
        .iter()
        .filter_map(|op| formulation.contribution(op, start, end))
        .fold((0.0, 0.0), |(max_acc, min_acc), (w_max, w_min)| {
            (max_acc + w_max, min_acc + w_min)
        });
    IntervalMargin {
        start,
        end,
        w_max,
        w_min,
    }
}

/// Per-interval breakdown of the autonomy margin, in interval order.
pub fn interval_margins(
    partition: &Partition,
    operations: &[Operation],
    formulation: AutonomyFormulation,
) -> Vec<IntervalMargin> {
    partition
        .intervals()
        .map(|(start, end)| interval_margin(formulation, operations, start, end))
        .collect()
}

/// Total autonomy margin of a partition.
///
/// Pure: the same inputs always give the same value, bit for bit.
///
/// # Examples
///
/// ```
/// use u_autonomy::model::{Operation, Partition};
/// use u_autonomy::objective::{autonomy, AutonomyFormulation};
///
/// let ops = [
///     Operation::new(0.0, 4.0, 2.0, 1.0).unwrap(),
///     Operation::new(3.0, 8.0, 3.0, 1.0).unwrap(),
/// ];
/// let p = Partition::new(vec![0.0, 5.0, 10.0]).unwrap();
/// assert_eq!(autonomy(&p, &ops, AutonomyFormulation::Overlap), 4.0);
/// ```
pub fn autonomy(
    partition: &Partition,
    operations: &[Operation],
    formulation: AutonomyFormulation,
) -> f64 {
    partition
        .intervals()
        .map(|(start, end)| interval_margin(formulation, operations, start, end).margin())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn op(c: f64, f: f64, d: f64) -> Operation {
        Operation::new(c, f, d, 1.0).unwrap()
    }

    fn partition(cuts: &[f64]) -> Partition {
        Partition::new(cuts.to_vec()).unwrap()
    }

    fn two_ops() -> Vec<Operation> {
        vec![op(0.0, 4.0, 2.0), op(3.0, 8.0, 3.0)]
    }

    #[test]
    fn test_overlap_breakdown() {
        let margins = interval_margins(
            &partition(&[0.0, 5.0, 10.0]),
            &two_ops(),
            AutonomyFormulation::Overlap,
        );
        assert_eq!(margins.len(), 2);

        assert_eq!(margins[0].w_max, 4.0);
        assert_eq!(margins[0].w_min, 2.0);
        assert_eq!(margins[0].margin(), 2.0);

        assert_eq!(margins[1].w_max, 3.0);
        assert_eq!(margins[1].w_min, 1.0);
        assert_eq!(margins[1].margin(), 2.0);
    }

    #[test]
    fn test_overlap_total() {
        let p = partition(&[0.0, 5.0, 10.0]);
        assert_eq!(autonomy(&p, &two_ops(), AutonomyFormulation::Overlap), 4.0);

        let p = partition(&[0.0, 4.0, 10.0]);
        assert_eq!(autonomy(&p, &[op(2.0, 9.0, 4.0)], AutonomyFormulation::Overlap), 4.0);
    }

    #[test]
    fn test_operation_outside_interval_ignored() {
        let p = partition(&[0.0, 5.0, 10.0]);
        let far = op(20.0, 30.0, 5.0);
        assert_eq!(autonomy(&p, &[far], AutonomyFormulation::Overlap), 0.0);
        assert_eq!(AutonomyFormulation::Overlap.contribution(&far, 0.0, 5.0), None);
    }

    #[test]
    fn test_contained_operation_cancels_under_overlap() {
        let inner = op(1.0, 3.0, 1.5);
        let (w_max, w_min) = AutonomyFormulation::Overlap
            .contribution(&inner, 0.0, 5.0)
            .unwrap();
        assert_eq!(w_max, w_min);
        assert_eq!(
            AutonomyFormulation::OverlapExcludingContained.contribution(&inner, 0.0, 5.0),
            None
        );
    }

    #[test]
    fn test_window_bounds_can_be_negative() {
        let p = partition(&[0.0, 5.0, 10.0]);
        let margins = interval_margins(&p, &two_ops(), AutonomyFormulation::WindowBounds);
        assert_eq!(margins[0].margin(), -4.0);
        assert_eq!(margins[1].margin(), -2.0);

        let total = autonomy(&p, &two_ops(), AutonomyFormulation::WindowBounds);
        assert_eq!(total, -6.0);
        assert!(total < 0.0);
    }

    #[test]
    fn test_skips_contained() {
        assert!(!AutonomyFormulation::Overlap.skips_contained());
        assert!(AutonomyFormulation::OverlapExcludingContained.skips_contained());
        assert!(AutonomyFormulation::WindowBounds.skips_contained());
        assert_eq!(AutonomyFormulation::default(), AutonomyFormulation::Overlap);
    }

    #[test]
    fn test_empty_operations() {
        let p = partition(&[0.0, 1.0, 2.0]);
        assert_eq!(autonomy(&p, &[], AutonomyFormulation::Overlap), 0.0);
    }

    fn arb_operation() -> impl Strategy<Value = Operation> {
        (0.0..20.0f64, 0.1..10.0f64, 0.0..6.0f64)
            .prop_map(|(c, len, d)| Operation::new(c, c + len, d, 1.0).unwrap())
    }

    fn arb_partition() -> impl Strategy<Value = Partition> {
        prop::collection::vec(0.5..6.0f64, 1..8).prop_map(|gaps| {
            let mut cuts = vec![0.0];
            for gap in gaps {
                let last = *cuts.last().unwrap();
                cuts.push(last + gap);
            }
            Partition::new(cuts).unwrap()
        })
    }

    fn arb_formulation() -> impl Strategy<Value = AutonomyFormulation> {
        prop_oneof![
            Just(AutonomyFormulation::Overlap),
            Just(AutonomyFormulation::OverlapExcludingContained),
            Just(AutonomyFormulation::WindowBounds),
        ]
    }

    proptest! {
        #[test]
        fn prop_autonomy_is_pure(
            ops in prop::collection::vec(arb_operation(), 0..10),
            p in arb_partition(),
            formulation in arb_formulation(),
        ) {
            let first = autonomy(&p, &ops, formulation);
            for _ in 0..5 {
                prop_assert_eq!(autonomy(&p, &ops, formulation).to_bits(), first.to_bits());
            }
        }

        #[test]
        fn prop_total_is_sum_of_intervals(
            ops in prop::collection::vec(arb_operation(), 0..10),
            p in arb_partition(),
            formulation in arb_formulation(),
        ) {
            let total = autonomy(&p, &ops, formulation);
            let summed: f64 = interval_margins(&p, &ops, formulation)
                .iter()
                .map(IntervalMargin::margin)
                .sum();
            prop_assert_eq!(total.to_bits(), summed.to_bits());
        }

        #[test]
        fn prop_overlap_variants_agree(
            ops in prop::collection::vec(arb_operation(), 0..10),
            p in arb_partition(),
        ) {
            let a = autonomy(&p, &ops, AutonomyFormulation::Overlap);
            let b = autonomy(&p, &ops, AutonomyFormulation::OverlapExcludingContained);
            prop_assert!((a - b).abs() < 1e-9);
        }

        #[test]
        fn prop_overlap_interval_margin_non_negative(
            ops in prop::collection::vec(arb_operation(), 0..10),
            p in arb_partition(),
        ) {
            for m in interval_margins(&p, &ops, AutonomyFormulation::Overlap) {
                prop_assert!(m.margin() >= -1e-9);
            }
        }
    }
}
