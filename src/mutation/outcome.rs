//! Structured mutation outcomes
//!
//! Store-domain conditions a caller is expected to handle (identifier
//! conflicts, stale revisions, deleting something already gone) are
//! values, not errors. Only transport-level failures surface as `Err`.

use crate::document::Record;

/// Outcome of a single insert
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// Document written; carries the requested return fields
    Inserted(Record),
    /// The store already holds a document under this identifier
    UniquenessViolation {
        /// Name of the entity's identifier index
        index: String,
    },
}

impl InsertOutcome {
    /// Returns the inserted record, if the insert succeeded
    pub fn record(&self) -> Option<&Record> {
        match self {
            InsertOutcome::Inserted(record) => Some(record),
            InsertOutcome::UniquenessViolation { .. } => None,
        }
    }
}

/// Outcome of a batch insert: total written count, and per-record
/// outcomes in input order when return fields were requested
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    /// Number of documents written
    pub count: usize,
    /// Per-record outcomes, input order; `None` when no return fields
    /// were requested
    pub returning: Option<Vec<InsertOutcome>>,
}

/// Outcome of a delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Document removed; carries the tombstone revision
    Deleted {
        /// Revision assigned to the tombstone
        rev: String,
    },
    /// The identifier was already gone. Deleting an absent document is
    /// success, not an error.
    AlreadyAbsent,
    /// The store rejected the delete (revision mismatch)
    CheckFailed {
        /// The store's reported reason
        reason: String,
    },
}

/// Outcome of an optimistic-concurrency update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Merge written; carries the requested return fields including the
    /// new revision
    Updated(Record),
    /// Target missing or its revision moved past the caller's. The
    /// caller must re-read and decide whether to retry; this layer never
    /// retries.
    Stale,
}

impl UpdateOutcome {
    /// Returns the updated record, if the update succeeded
    pub fn record(&self) -> Option<&Record> {
        match self {
            UpdateOutcome::Updated(record) => Some(record),
            UpdateOutcome::Stale => None,
        }
    }
}
