//! Model-layer errors.

use crate::id::MilestoneId;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised by model operations.
///
/// Model operations validate their preconditions and fail fast without
/// partial mutation; repository failures live in the storage crate and
/// are never folded into this type.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The targeted milestone does not belong to the goal
    #[error("milestone not found: {0}")]
    MilestoneNotFound(MilestoneId),

    /// Input rejected before entering the model
    #[error("validation failed: {0}")]
    Validation(String),
}
