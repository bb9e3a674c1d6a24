//! Mutation engine subsystem for viewlink
//!
//! Insert, batch insert, delete and optimistic-concurrency update over a
//! store client.
//!
//! # Invariants
//!
//! - No in-place mutation without first fetching the current revision
//! - `_rev` tokens are supplied as-is, never synthesized here
//! - Recoverable store conditions become structured outcomes before they
//!   reach the caller; transport errors propagate unchanged
//! - Stale writers are never retried silently

mod engine;
mod errors;
mod outcome;

pub use engine::MutationEngine;
pub use errors::{MutationError, MutationResult};
pub use outcome::{BatchOutcome, DeleteOutcome, InsertOutcome, UpdateOutcome};
