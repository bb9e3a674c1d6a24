//! Mutation engine
//!
//! Executes the insert, batch-insert, delete and optimistic-update
//! protocols against a store client, translating store-reported domain
//! conditions into structured outcomes at this boundary.
//!
//! No operation is transactional across documents, and no operation
//! retries: a losing writer observes a stale outcome and decides for
//! itself whether to re-read and reapply.

use tracing::{debug, warn};

use crate::document::{DocumentCodec, FieldSpec, Record};
use crate::schema::EntityMeta;
use crate::store::{StoreClient, StoreError};

use super::errors::{MutationError, MutationResult};
use super::outcome::{BatchOutcome, DeleteOutcome, InsertOutcome, UpdateOutcome};

/// Executes mutations for one entity against a store client
pub struct MutationEngine<'a, S: StoreClient> {
    store: &'a S,
    codec: &'a DocumentCodec,
    meta: &'a EntityMeta,
}

impl<'a, S: StoreClient> MutationEngine<'a, S> {
    /// Creates an engine over a store handle, codec and entity metadata
    pub fn new(store: &'a S, codec: &'a DocumentCodec, meta: &'a EntityMeta) -> Self {
        Self { store, codec, meta }
    }

    /// Inserts one record. An identifier conflict surfaces as a
    /// uniqueness violation naming the entity's id index.
    pub fn insert(
        &self,
        record: &Record,
        returning: &[FieldSpec],
    ) -> MutationResult<InsertOutcome> {
        let doc = self.codec.encode(record);
        match self.store.save(doc) {
            Ok(saved) => {
                debug!(entity = self.meta.name(), id = saved.id(), "inserted");
                Ok(InsertOutcome::Inserted(self.codec.decode(&saved, returning)))
            }
            Err(StoreError::Conflict) => {
                let index = self.meta.id_index();
                warn!(entity = self.meta.name(), %index, "insert conflict");
                Ok(InsertOutcome::UniquenessViolation { index })
            }
            Err(err) => Err(MutationError::Store(err)),
        }
    }

    /// Inserts a batch in one submission, preserving input order in the
    /// per-record outcomes. Partial failures are reported per record,
    /// never rolled back.
    pub fn insert_all(
        &self,
        records: &[Record],
        returning: Option<&[FieldSpec]>,
    ) -> MutationResult<BatchOutcome> {
        let docs = records.iter().map(|r| self.codec.encode(r)).collect();
        let results = self.store.save_batch(docs)?;

        let mut count = 0;
        let mut outcomes = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(saved) => {
                    count += 1;
                    if let Some(fields) = returning {
                        outcomes.push(InsertOutcome::Inserted(self.codec.decode(&saved, fields)));
                    }
                }
                Err(StoreError::Conflict) => {
                    if returning.is_some() {
                        outcomes.push(InsertOutcome::UniquenessViolation {
                            index: self.meta.id_index(),
                        });
                    }
                }
                Err(err) => return Err(MutationError::Store(err)),
            }
        }

        debug!(
            entity = self.meta.name(),
            submitted = records.len(),
            count,
            "batch insert"
        );
        Ok(BatchOutcome {
            count,
            returning: returning.map(|_| outcomes),
        })
    }

    /// Deletes the document under `id` at the expected revision.
    /// Deleting an already-absent identifier is benign success.
    pub fn delete(&self, id: &str, expected_rev: &str) -> MutationResult<DeleteOutcome> {
        match self.store.delete(id, expected_rev) {
            Ok(rev) => Ok(DeleteOutcome::Deleted { rev }),
            Err(StoreError::NotFound(_)) => Ok(DeleteOutcome::AlreadyAbsent),
            Err(err @ StoreError::Conflict) => {
                warn!(entity = self.meta.name(), id, "delete check failed");
                Ok(DeleteOutcome::CheckFailed {
                    reason: err.to_string(),
                })
            }
            Err(err) => Err(MutationError::Store(err)),
        }
    }

    /// Updates the document under `id`, enforcing optimistic
    /// concurrency: the fetched revision must equal `expected_rev`, each
    /// field change is merged structurally through the codec, and the
    /// merged document is written back. A concurrent writer anywhere in
    /// that window makes the outcome `Stale`.
    pub fn update(
        &self,
        id: &str,
        expected_rev: &str,
        changes: &Record,
        returning: &[FieldSpec],
    ) -> MutationResult<UpdateOutcome> {
        let mut current = match self.store.fetch_by_id(id) {
            Ok(doc) => doc,
            Err(StoreError::NotFound(_)) => return Ok(UpdateOutcome::Stale),
            Err(err) => return Err(MutationError::Store(err)),
        };
        if current.rev() != Some(expected_rev) {
            warn!(entity = self.meta.name(), id, "stale update rejected");
            return Ok(UpdateOutcome::Stale);
        }

        for (name, value) in changes.iter() {
            current.insert(name.clone(), self.codec.encode_value(value));
        }

        match self.store.save(current) {
            Ok(saved) => {
                debug!(entity = self.meta.name(), id, rev = saved.rev(), "updated");
                Ok(UpdateOutcome::Updated(self.codec.decode(&saved, returning)))
            }
            // A writer slipped between the revision check and the save.
            Err(StoreError::Conflict) => Ok(UpdateOutcome::Stale),
            Err(err) => Err(MutationError::Store(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FieldValue;
    use crate::store::{MemoryStore, StoreConfig};
    use serde_json::json;

    fn fixture() -> (MemoryStore, DocumentCodec, EntityMeta) {
        (
            MemoryStore::open(&StoreConfig::new("blog")),
            DocumentCodec::new(),
            EntityMeta::new("posts"),
        )
    }

    fn post(id: &str, title: &str) -> Record {
        Record::new()
            .with_field("_id", FieldValue::scalar(id))
            .with_field("title", FieldValue::scalar(title))
    }

    fn rev_specs() -> Vec<FieldSpec> {
        vec![FieldSpec::scalar("_id"), FieldSpec::scalar("_rev")]
    }

    #[test]
    fn test_insert_returns_assigned_rev() {
        let (store, codec, meta) = fixture();
        let engine = MutationEngine::new(&store, &codec, &meta);

        let outcome = engine.insert(&post("FOO", "hello"), &rev_specs()).unwrap();
        let record = outcome.record().unwrap();
        assert_eq!(
            record.get("_id").and_then(FieldValue::as_scalar),
            Some(&json!("FOO"))
        );
        assert!(record.get("_rev").unwrap().as_scalar().is_some());
    }

    #[test]
    fn test_duplicate_insert_names_id_index() {
        let (store, codec, meta) = fixture();
        let engine = MutationEngine::new(&store, &codec, &meta);

        engine.insert(&post("FOO", "hello"), &[]).unwrap();
        let outcome = engine.insert(&post("FOO", "again"), &[]).unwrap();
        assert_eq!(
            outcome,
            InsertOutcome::UniquenessViolation {
                index: "posts_id_index".into()
            }
        );
    }

    #[test]
    fn test_insert_all_preserves_order_and_counts() {
        let (store, codec, meta) = fixture();
        let engine = MutationEngine::new(&store, &codec, &meta);
        engine.insert(&post("p2", "taken"), &[]).unwrap();

        let batch = [post("p1", "one"), post("p2", "dup"), post("p3", "three")];
        let outcome = engine.insert_all(&batch, Some(&rev_specs())).unwrap();

        assert_eq!(outcome.count, 2);
        let rows = outcome.returning.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].record().is_some());
        assert!(matches!(rows[1], InsertOutcome::UniquenessViolation { .. }));
        assert!(rows[2].record().is_some());
    }

    #[test]
    fn test_insert_all_without_returning_reports_count_only() {
        let (store, codec, meta) = fixture();
        let engine = MutationEngine::new(&store, &codec, &meta);

        let outcome = engine
            .insert_all(&[post("p1", "one"), post("p2", "two")], None)
            .unwrap();
        assert_eq!(outcome.count, 2);
        assert!(outcome.returning.is_none());
    }

    #[test]
    fn test_delete_missing_id_is_benign() {
        let (store, codec, meta) = fixture();
        let engine = MutationEngine::new(&store, &codec, &meta);

        let outcome = engine.delete("missing-id", "any-rev").unwrap();
        assert_eq!(outcome, DeleteOutcome::AlreadyAbsent);
    }

    #[test]
    fn test_delete_rev_mismatch_is_check_failed() {
        let (store, codec, meta) = fixture();
        let engine = MutationEngine::new(&store, &codec, &meta);
        engine.insert(&post("p1", "one"), &[]).unwrap();

        let outcome = engine.delete("p1", "1-wrong").unwrap();
        assert!(matches!(outcome, DeleteOutcome::CheckFailed { .. }));
    }

    #[test]
    fn test_update_requires_current_rev() {
        let (store, codec, meta) = fixture();
        let engine = MutationEngine::new(&store, &codec, &meta);

        let inserted = engine.insert(&post("p1", "one"), &rev_specs()).unwrap();
        let r1 = inserted
            .record()
            .unwrap()
            .get("_rev")
            .unwrap()
            .as_scalar()
            .unwrap()
            .as_str()
            .unwrap()
            .to_string();

        // Concurrent writer moves the document to r2.
        let concurrent = engine
            .update(
                "p1",
                &r1,
                &Record::new().with_field("title", FieldValue::scalar("theirs")),
                &rev_specs(),
            )
            .unwrap();
        let r2 = concurrent
            .record()
            .unwrap()
            .get("_rev")
            .unwrap()
            .as_scalar()
            .unwrap()
            .as_str()
            .unwrap()
            .to_string();

        // Updating from the superseded revision fails stale.
        let stale = engine
            .update(
                "p1",
                &r1,
                &Record::new().with_field("title", FieldValue::scalar("mine")),
                &[],
            )
            .unwrap();
        assert_eq!(stale, UpdateOutcome::Stale);

        // Updating from the current revision succeeds with a new one.
        let updated = engine
            .update(
                "p1",
                &r2,
                &Record::new().with_field("title", FieldValue::scalar("mine")),
                &rev_specs(),
            )
            .unwrap();
        let r3 = updated
            .record()
            .unwrap()
            .get("_rev")
            .unwrap()
            .as_scalar()
            .unwrap();
        assert_ne!(r3, &json!(r2));
    }

    #[test]
    fn test_update_missing_target_is_stale() {
        let (store, codec, meta) = fixture();
        let engine = MutationEngine::new(&store, &codec, &meta);

        let outcome = engine
            .update("ghost", "1-abc", &Record::new(), &[])
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Stale);
    }
}
