//! Store client error types
//!
//! Domain conditions the store reports (conflict, not-found) are
//! translated into structured outcomes at the mutation-engine boundary;
//! everything else propagates unchanged as a fatal error.

use thiserror::Error;

/// Result type for store client operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by the store client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Identifier or revision conflict on a write
    #[error("document update conflict")]
    Conflict,

    /// No document (or view) under the given identifier
    #[error("'{0}' not found")]
    NotFound(String),

    /// Network-level failure
    #[error("transport failure: {0}")]
    Transport(String),

    /// Response the client could not interpret
    #[error("malformed store response: {0}")]
    Malformed(String),
}
