//! Store client trait
//!
//! The seam between this layer and the store's wire protocol. An open
//! database handle is a value implementing `StoreClient`; construction
//! (`open`) belongs to each implementation. All calls are synchronous
//! request/response round trips; cancellation and timeouts live behind
//! this boundary.

use crate::document::Document;

use super::errors::StoreResult;
use super::types::{ViewOptions, ViewRef, ViewRow};

/// Operations this layer requires of a document store
pub trait StoreClient {
    /// Saves one document. The returned document carries the assigned
    /// `_id` and the new `_rev`. Fails with `StoreError::Conflict` on an
    /// identifier or revision conflict.
    fn save(&self, doc: Document) -> StoreResult<Document>;

    /// Saves a batch in one submission. The outer error covers the
    /// submission itself; per-document success or failure is reported
    /// positionally, in input order. No atomicity across documents.
    fn save_batch(&self, docs: Vec<Document>) -> StoreResult<Vec<StoreResult<Document>>>;

    /// Deletes the document under `id` at revision `rev`, returning the
    /// tombstone revision. Fails with `NotFound` for an absent id and
    /// `Conflict` for a revision mismatch.
    fn delete(&self, id: &str, rev: &str) -> StoreResult<String>;

    /// Fetches the current document under `id`
    fn fetch_by_id(&self, id: &str) -> StoreResult<Document>;

    /// Fetches the rows of a view, ascending by key
    fn fetch_view(&self, view: &ViewRef, options: &ViewOptions) -> StoreResult<Vec<ViewRow>>;
}
