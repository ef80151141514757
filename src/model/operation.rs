//! Flexible operations scheduled inside a time window.

use crate::error::{AutonomyError, Result};

/// A schedulable unit of work with a flexible time window.
///
/// The operation must receive `duration` units of processing somewhere
/// inside `[earliest_start, latest_finish]`. The `weight` (a quantity
/// such as a batch size) is carried along for callers but does not enter
/// the autonomy objective.
///
/// # Examples
///
/// ```
/// use u_autonomy::model::Operation;
///
/// let op = Operation::new(0.0, 4.0, 2.0, 1.0).unwrap();
/// assert_eq!(op.window(), 4.0);
/// assert!(Operation::new(5.0, 5.0, 1.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawOperation"))]
pub struct Operation {
    earliest_start: f64,
    latest_finish: f64,
    duration: f64,
    weight: f64,
}

impl Operation {
    /// Creates an operation, checking `earliest_start < latest_finish`,
    /// `duration >= 0` and that every value is finite.
    pub fn new(
        earliest_start: f64,
        latest_finish: f64,
        duration: f64,
        weight: f64,
    ) -> Result<Self> {
        if ![earliest_start, latest_finish, duration, weight]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(AutonomyError::InvalidOperation(format!(
                "values must be finite, got ({earliest_start}, {latest_finish}, {duration}, {weight})"
            )));
        }
        if earliest_start >= latest_finish {
            return Err(AutonomyError::InvalidOperation(format!(
                "earliest_start {earliest_start} must precede latest_finish {latest_finish}"
            )));
        }
        if duration < 0.0 {
            return Err(AutonomyError::InvalidOperation(format!(
                "duration must be non-negative, got {duration}"
            )));
        }
        Ok(Self {
            earliest_start,
            latest_finish,
            duration,
            weight,
        })
    }

    /// Earliest time processing may begin (`c_k`).
    #[inline]
    pub fn earliest_start(&self) -> f64 {
        self.earliest_start
    }

    /// Latest time processing must be complete (`f_k`).
    #[inline]
    pub fn latest_finish(&self) -> f64 {
        self.latest_finish
    }

    /// Required processing time (`d_k`).
    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Quantity carried with the operation (`q_k`).
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Length of the feasible window.
    #[inline]
    pub fn window(&self) -> f64 {
        self.latest_finish - self.earliest_start
    }

    /// Whether the window overlaps the open extent of `[start, end]`.
    #[inline]
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.earliest_start < end && self.latest_finish > start
    }

    /// Whether the whole window lies within `[start, end]`.
    #[inline]
    pub fn is_contained_in(&self, start: f64, end: f64) -> bool {
        self.earliest_start >= start && self.latest_finish <= end
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawOperation {
    earliest_start: f64,
    latest_finish: f64,
    duration: f64,
    #[serde(default = "default_weight")]
    weight: f64,
}

#[cfg(feature = "serde")]
fn default_weight() -> f64 {
    1.0
}

#[cfg(feature = "serde")]
impl TryFrom<RawOperation> for Operation {
    type Error = AutonomyError;

    fn try_from(raw: RawOperation) -> Result<Self> {
        Operation::new(raw.earliest_start, raw.latest_finish, raw.duration, raw.weight)
    }
}
