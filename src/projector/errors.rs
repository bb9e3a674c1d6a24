//! Projector error types

use thiserror::Error;

/// Result type for projection
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// Data-integrity faults raised while projecting view rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// A row came back without its document even though `include_docs`
    /// was requested. Indicates a server or view misconfiguration
    /// outside this layer's control; fatal, not recoverable.
    #[error("view row '{row_id}' carries no document despite include_docs")]
    MissingDocument {
        /// Identifier of the offending row
        row_id: String,
    },
}
