//! In-process store implementation
//!
//! A faithful stand-in for the real wire client, used by tests and
//! demos: documents live in a map, revisions are `"N-<uuid>"` tokens
//! regenerated on every write, and views are declared as a key field to
//! extract from each document. The implicit `all` view is keyed by
//! identifier. Rows come back ascending by key, matching the store's
//! default collation.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use serde_json::Value;
use uuid::Uuid;

use crate::document::{Document, ID_FIELD};
use crate::schema::ALL_VIEW;

use super::client::StoreClient;
use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::types::{ViewOptions, ViewRef, ViewRow};

#[derive(Default)]
struct Inner {
    docs: BTreeMap<String, Document>,
    // (group, view) -> document field emitted as the view key
    views: HashMap<(String, String), String>,
}

/// HashMap-backed store client
pub struct MemoryStore {
    database: String,
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Opens an in-memory database for the configured name
    pub fn open(config: &StoreConfig) -> Self {
        Self {
            database: config.database.clone(),
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Database name this handle was opened for
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Declares a view as a key field extracted from each document.
    /// Documents lacking the field emit no row, like a map function
    /// that never calls emit.
    pub fn declare_view(
        &self,
        group: impl Into<String>,
        view: impl Into<String>,
        key_field: impl Into<String>,
    ) {
        let mut inner = self.inner.write().unwrap();
        inner
            .views
            .insert((group.into(), view.into()), key_field.into());
    }

    fn next_rev(current: Option<&str>) -> String {
        let generation = current
            .and_then(|rev| rev.split('-').next())
            .and_then(|n| n.parse::<u64>().ok())
            .unwrap_or(0);
        format!("{}-{}", generation + 1, Uuid::new_v4().simple())
    }

    fn save_locked(inner: &mut Inner, mut doc: Document) -> StoreResult<Document> {
        let id = match doc.id() {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().simple().to_string();
                doc.set_id(id.clone());
                id
            }
        };

        match inner.docs.get(&id) {
            Some(current) => {
                // Existing document: the caller must present the current
                // revision.
                if doc.rev() != current.rev() {
                    return Err(StoreError::Conflict);
                }
            }
            None => {
                // Fresh insert: presenting a revision for an unknown
                // document is a conflict.
                if doc.rev().is_some() {
                    return Err(StoreError::Conflict);
                }
            }
        }

        let rev = Self::next_rev(doc.rev());
        doc.set_rev(rev);
        inner.docs.insert(id, doc.clone());
        Ok(doc)
    }
}

impl StoreClient for MemoryStore {
    fn save(&self, doc: Document) -> StoreResult<Document> {
        let mut inner = self.inner.write().unwrap();
        Self::save_locked(&mut inner, doc)
    }

    fn save_batch(&self, docs: Vec<Document>) -> StoreResult<Vec<StoreResult<Document>>> {
        let mut inner = self.inner.write().unwrap();
        Ok(docs
            .into_iter()
            .map(|doc| Self::save_locked(&mut inner, doc))
            .collect())
    }

    fn delete(&self, id: &str, rev: &str) -> StoreResult<String> {
        let mut inner = self.inner.write().unwrap();
        let current = inner
            .docs
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if current.rev() != Some(rev) {
            return Err(StoreError::Conflict);
        }
        let tombstone = Self::next_rev(Some(rev));
        inner.docs.remove(id);
        Ok(tombstone)
    }

    fn fetch_by_id(&self, id: &str) -> StoreResult<Document> {
        let inner = self.inner.read().unwrap();
        inner
            .docs
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn fetch_view(&self, view: &ViewRef, options: &ViewOptions) -> StoreResult<Vec<ViewRow>> {
        let inner = self.inner.read().unwrap();
        let key_field = if view.name == ALL_VIEW {
            ID_FIELD.to_string()
        } else {
            inner
                .views
                .get(&(view.group.clone(), view.name.clone()))
                .cloned()
                .ok_or_else(|| StoreError::NotFound(view.to_string()))?
        };

        let mut rows: Vec<ViewRow> = inner
            .docs
            .values()
            .filter_map(|doc| {
                let key = doc.get(&key_field)?.clone();
                let id = doc.id()?.to_string();
                Some(ViewRow {
                    id,
                    key,
                    value: Value::Null,
                    doc: options.include_docs.then(|| doc.clone()),
                })
            })
            .filter(|row| matches_options(&row.key, options))
            .collect();

        rows.sort_by(|a, b| collate(&a.key, &b.key));
        Ok(rows)
    }
}

fn matches_options(key: &Value, options: &ViewOptions) -> bool {
    if let Some(wanted) = &options.key {
        if key != wanted {
            return false;
        }
    }
    if let Some(keys) = &options.keys {
        if !keys.contains(key) {
            return false;
        }
    }
    if let Some(start) = &options.startkey {
        if collate(key, start) == Ordering::Less {
            return false;
        }
    }
    if let Some(end) = &options.endkey {
        if collate(key, end) == Ordering::Greater {
            return false;
        }
    }
    true
}

// Type rank first (null < bool < number < string < array < object), then
// value within the type.
fn collate(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => x
            .iter()
            .zip(y.iter())
            .map(|(i, j)| collate(i, j))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or_else(|| x.len().cmp(&y.len())),
        _ => rank(a).cmp(&rank(b)),
    }
}
