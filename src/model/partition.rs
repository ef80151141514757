//! Interval partitions of the planning horizon.

use std::fmt;

use rand::distr::Open01;
use rand::Rng;

use crate::error::{AutonomyError, Result};

/// A strictly increasing sequence of cut points.
///
/// Consecutive cut points delimit the scheduling intervals
/// `[p_i, p_{i+1}]`. The first and last points are the planning horizon.
/// Partitions are values: [`Partition::perturb`] returns a new partition
/// and leaves `self` untouched.
///
/// # Examples
///
/// ```
/// use u_autonomy::model::Partition;
///
/// let p = Partition::new(vec![0.0, 5.0, 10.0]).unwrap();
/// assert_eq!(p.interval_count(), 2);
/// assert_eq!(p.horizon(), (0.0, 10.0));
///
/// // The core never sorts its input.
/// assert!(Partition::new(vec![0.0, 10.0, 5.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    cuts: Vec<f64>,
}

impl Partition {
    /// Creates a partition from cut points already sorted ascending.
    ///
    /// Fails when there are fewer than two points, a point is not finite,
    /// or the sequence is not strictly increasing.
    pub fn new(cuts: Vec<f64>) -> Result<Self> {
        if cuts.len() < 2 {
            return Err(AutonomyError::InvalidPartition(format!(
                "at least two cut points are required, got {}",
                cuts.len()
            )));
        }
        if let Some(bad) = cuts.iter().find(|c| !c.is_finite()) {
            return Err(AutonomyError::InvalidPartition(format!(
                "cut points must be finite, got {bad}"
            )));
        }
        if let Some(i) = cuts.windows(2).position(|w| w[0] >= w[1]) {
            return Err(AutonomyError::InvalidPartition(format!(
                "cut points must be strictly increasing, got {} then {} at index {}",
                cuts[i],
                cuts[i + 1],
                i + 1
            )));
        }
        Ok(Self { cuts })
    }

    /// Cut points in ascending order.
    #[inline]
    pub fn cuts(&self) -> &[f64] {
        &self.cuts
    }

    /// Number of cut points.
    #[inline]
    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    /// Always `false`; a partition holds at least two cut points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// Number of intervals, one less than the number of cut points.
    #[inline]
    pub fn interval_count(&self) -> usize {
        self.cuts.len() - 1
    }

    /// Bounds `(p_i, p_{i+1})` of interval `i`.
    #[inline]
    pub fn interval(&self, i: usize) -> (f64, f64) {
        (self.cuts[i], self.cuts[i + 1])
    }

    /// Iterates over interval bounds in order.
    pub fn intervals(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.cuts.windows(2).map(|w| (w[0], w[1]))
    }

    /// First and last cut point.
    #[inline]
    pub fn horizon(&self) -> (f64, f64) {
        (self.cuts[0], self.cuts[self.cuts.len() - 1])
    }

    /// Whether at least one interior cut point can be moved.
    #[inline]
    pub fn has_interior(&self) -> bool {
        self.cuts.len() >= 3
    }

    /// Moves one interior cut point to a uniform position strictly between
    /// its neighbors and returns the result as a new partition.
    ///
    /// The interior index is drawn uniformly from `1..len-1`; the horizon
    /// endpoints never move. Returns `None` for a two-point partition.
    pub fn perturb<R: Rng>(&self, rng: &mut R) -> Option<Partition> {
        if !self.has_interior() {
            return None;
        }
        let index = rng.random_range(1..self.cuts.len() - 1);
        let lo = self.cuts[index - 1];
        let hi = self.cuts[index + 1];
        let fraction: f64 = rng.sample(Open01);
        // weighted form stays finite when `hi - lo` would overflow
        let mut value = lo * (1.0 - fraction) + hi * fraction;
        // rounding can land on a neighbor when the gap is tiny
        if value <= lo || value >= hi {
            value = lo / 2.0 + hi / 2.0;
        }
        if value <= lo || value >= hi {
            value = self.cuts[index];
        }

        let mut cuts = self.cuts.clone();
        cuts[index] = value;
        Some(Partition { cuts })
    }
}

impl TryFrom<Vec<f64>> for Partition {
    type Error = AutonomyError;

    fn try_from(cuts: Vec<f64>) -> Result<Self> {
        Partition::new(cuts)
    }
}

impl AsRef<[f64]> for Partition {
    fn as_ref(&self) -> &[f64] {
        &self.cuts
    }
}

impl From<Partition> for Vec<f64> {
    fn from(partition: Partition) -> Self {
        partition.cuts
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, cut) in self.cuts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cut}")?;
        }
        write!(f, "]")
    }
}
