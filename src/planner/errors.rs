//! Compiler error types
//!
//! Every variant is a compile-time, non-retryable rejection raised
//! before any network call is made.

use thiserror::Error;

/// Result type for predicate compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// Rejections raised while compiling a predicate tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Query shape a single view lookup cannot express (joins,
    /// preloads, havings, distinct, or a disallowed comparator)
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// More than one independent top-level predicate clause
    #[error("queries admit a single where clause, found {0}")]
    MultipleWhereClauses(usize),

    /// Conjunction spanning two different views
    #[error("cannot combine predicates over views '{left}' and '{right}' in one lookup")]
    CrossViewConjunction {
        /// View the conjunction had settled on
        left: String,
        /// View the offending child targets
        right: String,
    },

    /// Two different values for the same bound in one conjunction
    #[error("conflicting '{option}' bounds in conjunction")]
    ConflictingOption {
        /// The colliding option (`key`, `startkey` or `endkey`)
        option: &'static str,
    },

    /// Filter names a view the entity never declared
    #[error("entity '{entity}' declares no view '{view}' in group '{group}'")]
    UnknownView {
        /// Entity whose metadata was consulted
        entity: String,
        /// Group the filter resolved to
        group: String,
        /// Undeclared view name
        view: String,
    },
}
