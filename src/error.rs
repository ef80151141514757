//! Error types for u-autonomy.

use thiserror::Error;

/// Precondition failures raised while building operations, partitions,
/// configurations or optimizers.
///
/// An infeasible initial partition is not an error: the optimizer reports
/// it through its trace sink and returns no result.
#[derive(Debug, Error)]
pub enum AutonomyError {
    /// Operation data violates `earliest_start < latest_finish`,
    /// `duration >= 0`, or contains a non-finite value.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Cut points are too few, non-finite, or not strictly increasing.
    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    /// The partition has only its two horizon endpoints, so no cut point
    /// can be moved.
    #[error("partition has no interior cut point to perturb")]
    NoInteriorCutPoint,

    /// The operation set is empty.
    #[error("at least one operation is required")]
    NoOperations,

    /// Annealing parameters violate their preconditions.
    #[error("invalid annealing configuration: {0}")]
    InvalidConfig(String),

    #[cfg(feature = "serde")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("TOML parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type alias for u-autonomy operations.
pub type Result<T> = std::result::Result<T, AutonomyError>;
