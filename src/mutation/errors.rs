//! Mutation engine error types

use thiserror::Error;

use crate::store::StoreError;

/// Result type for mutation operations
pub type MutationResult<T> = Result<T, MutationError>;

/// Fatal mutation failures.
///
/// This layer has no basis for a recovery strategy on transport or
/// malformed-response errors, so they propagate unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The store reported a failure outside the structured outcomes
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
