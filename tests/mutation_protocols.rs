//! Mutation Protocol and Pipeline Tests
//!
//! End-to-end scenarios against the in-memory store:
//! - Insert conflict surfaces the entity's id index
//! - Optimistic updates reject superseded revisions
//! - Deleting an absent identifier is benign success
//! - Compiled range queries return exactly the bounded documents

use serde_json::json;
use viewlink::document::{DocumentCodec, FieldSpec, FieldValue, Record};
use viewlink::mutation::{DeleteOutcome, InsertOutcome, MutationEngine, UpdateOutcome};
use viewlink::planner::{Predicate, PredicateCompiler, QueryRequest};
use viewlink::projector::ResultProjector;
use viewlink::schema::{EntityMeta, KeyType};
use viewlink::store::{MemoryStore, StoreClient, StoreConfig};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup() -> (MemoryStore, DocumentCodec, EntityMeta) {
    let store = MemoryStore::open(&StoreConfig::new("blog"));
    store.declare_view("posts", "by_author", "author");
    let meta = EntityMeta::new("posts").with_view("by_author", vec![KeyType::String]);
    (store, DocumentCodec::new(), meta)
}

fn post(id: &str, author: &str, title: &str) -> Record {
    Record::new()
        .with_field("_id", FieldValue::scalar(id))
        .with_field("author", FieldValue::scalar(author))
        .with_field("title", FieldValue::scalar(title))
}

fn rev_of(outcome: &InsertOutcome) -> String {
    scalar_str(outcome.record().unwrap(), "_rev")
}

fn scalar_str(record: &Record, field: &str) -> String {
    record
        .get(field)
        .and_then(FieldValue::as_scalar)
        .and_then(|v| v.as_str())
        .map(String::from)
        .unwrap()
}

fn rev_specs() -> Vec<FieldSpec> {
    vec![FieldSpec::scalar("_id"), FieldSpec::scalar("_rev")]
}

// =============================================================================
// Insert Protocol
// =============================================================================

/// Inserting the same identifier twice reports a uniqueness violation
/// naming the entity's id index, not an error.
#[test]
fn test_duplicate_insert_is_uniqueness_violation() {
    let (store, codec, meta) = setup();
    let engine = MutationEngine::new(&store, &codec, &meta);

    let first = engine
        .insert(&post("FOO", "alice", "hello"), &rev_specs())
        .unwrap();
    assert!(first.record().is_some());

    let second = engine
        .insert(&post("FOO", "bob", "again"), &rev_specs())
        .unwrap();
    assert_eq!(
        second,
        InsertOutcome::UniquenessViolation {
            index: "posts_id_index".into()
        }
    );
}

// =============================================================================
// Optimistic Update Protocol
// =============================================================================

/// A writer holding a superseded revision observes Stale; the writer
/// holding the current revision succeeds and receives a fresh revision.
#[test]
fn test_racing_writers_resolve_by_revision() {
    let (store, codec, meta) = setup();
    let engine = MutationEngine::new(&store, &codec, &meta);

    let r1 = rev_of(
        &engine
            .insert(&post("p1", "alice", "draft"), &rev_specs())
            .unwrap(),
    );

    // Another writer updates first, moving the document to r2.
    let winner = engine
        .update(
            "p1",
            &r1,
            &Record::new().with_field("title", FieldValue::scalar("theirs")),
            &rev_specs(),
        )
        .unwrap();
    let r2 = scalar_str(winner.record().unwrap(), "_rev");

    // The loser still holds r1 and must observe a stale outcome.
    let loser = engine
        .update(
            "p1",
            &r1,
            &Record::new().with_field("title", FieldValue::scalar("mine")),
            &[],
        )
        .unwrap();
    assert_eq!(loser, UpdateOutcome::Stale);

    // Re-reading (r2) and reapplying succeeds with a third revision.
    let retried = engine
        .update(
            "p1",
            &r2,
            &Record::new().with_field("title", FieldValue::scalar("mine")),
            &rev_specs(),
        )
        .unwrap();
    let r3 = scalar_str(retried.record().unwrap(), "_rev");
    assert_ne!(r3, r2);

    let current = store.fetch_by_id("p1").unwrap();
    assert_eq!(current.get("title"), Some(&json!("mine")));
}

// =============================================================================
// Delete Protocol
// =============================================================================

/// Deleting something already gone succeeds benignly.
#[test]
fn test_delete_missing_is_benign_success() {
    let (store, codec, meta) = setup();
    let engine = MutationEngine::new(&store, &codec, &meta);

    let outcome = engine.delete("missing-id", "any-rev").unwrap();
    assert_eq!(outcome, DeleteOutcome::AlreadyAbsent);
}

/// A revision mismatch on delete is a structured check failure carrying
/// the store's reason, while a matching revision deletes.
#[test]
fn test_delete_enforces_revision() {
    let (store, codec, meta) = setup();
    let engine = MutationEngine::new(&store, &codec, &meta);

    let rev = rev_of(
        &engine
            .insert(&post("p1", "alice", "one"), &rev_specs())
            .unwrap(),
    );

    match engine.delete("p1", "1-wrong").unwrap() {
        DeleteOutcome::CheckFailed { reason } => assert!(!reason.is_empty()),
        other => panic!("expected check failure, got {:?}", other),
    }

    assert!(matches!(
        engine.delete("p1", &rev).unwrap(),
        DeleteOutcome::Deleted { .. }
    ));
    assert_eq!(engine.delete("p1", &rev).unwrap(), DeleteOutcome::AlreadyAbsent);
}

// =============================================================================
// Query Pipeline
// =============================================================================

/// Compile → fetch → project returns typed records in key order.
#[test]
fn test_equality_query_end_to_end() {
    let (store, codec, meta) = setup();
    let engine = MutationEngine::new(&store, &codec, &meta);
    engine.insert(&post("p1", "alice", "one"), &[]).unwrap();
    engine.insert(&post("p2", "bob", "two"), &[]).unwrap();
    engine.insert(&post("p3", "alice", "three"), &[]).unwrap();

    let query = PredicateCompiler::new(&meta)
        .compile(&QueryRequest::new("posts").filter(Predicate::eq("by_author", json!("alice"))))
        .unwrap();
    let rows = store.fetch_view(&query.view, &query.options).unwrap();
    let records = ResultProjector::new(&codec)
        .project(rows, &[FieldSpec::scalar("_id"), FieldSpec::scalar("title")])
        .unwrap();

    let ids: Vec<String> = records.iter().map(|r| scalar_str(r, "_id")).collect();
    assert_eq!(ids, vec!["p1", "p3"]);
}

/// A closed range over the all view returns exactly the bounded
/// document.
#[test]
fn test_closed_range_returns_exact_document() {
    let (store, codec, meta) = setup();
    let engine = MutationEngine::new(&store, &codec, &meta);
    for id in ["id1", "id2", "id3"] {
        engine.insert(&post(id, "alice", id), &[]).unwrap();
    }

    let query = PredicateCompiler::new(&meta)
        .compile(&QueryRequest::new("posts").filter(Predicate::and(vec![
            Predicate::gte("all", json!("id2")),
            Predicate::lte("all", json!("id2")),
        ])))
        .unwrap();
    assert_eq!(query.options.startkey, Some(json!("id2")));
    assert_eq!(query.options.endkey, Some(json!("id2")));

    let rows = store.fetch_view(&query.view, &query.options).unwrap();
    let records = ResultProjector::new(&codec)
        .project(rows, &[FieldSpec::scalar("_id")])
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(scalar_str(&records[0], "_id"), "id2");
}
