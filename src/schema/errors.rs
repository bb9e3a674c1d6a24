//! Schema registry error types

use thiserror::Error;

/// Result type for registry lookups
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Registry lookup failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Entity was never registered
    #[error("entity '{0}' is not registered")]
    UnknownEntity(String),
}
