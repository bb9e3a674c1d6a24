//! Wire vocabulary of the view-fetch protocol
//!
//! These are the shapes that cross the store-client boundary: a view
//! reference, the option set attached to a view fetch, and the rows the
//! store returns.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::Document;

/// A (view group, view name) pair addressing one server-side view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewRef {
    /// View group the view belongs to
    pub group: String,
    /// View name within the group
    pub name: String,
}

impl ViewRef {
    /// Creates a view reference
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.name)
    }
}

/// Options attached to a view fetch.
///
/// At most one of `key` / `keys` / the `startkey`–`endkey` pair is
/// populated by the compiler; `startkey` and `endkey` may coexist as a
/// closed range. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewOptions {
    /// Single equality key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    /// Key set (membership)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<Value>>,
    /// Inclusive lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startkey: Option<Value>,
    /// Inclusive upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endkey: Option<Value>,
    /// Whether the store must attach the full document to every row
    pub include_docs: bool,
}

impl ViewOptions {
    /// Options requesting full documents and nothing else
    pub fn with_docs() -> Self {
        Self {
            include_docs: true,
            ..Self::default()
        }
    }

    /// Builder-style single-key option
    pub fn key(mut self, key: Value) -> Self {
        self.key = Some(key);
        self
    }

    /// Builder-style key-set option
    pub fn keys(mut self, keys: Vec<Value>) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Builder-style lower bound
    pub fn startkey(mut self, key: Value) -> Self {
        self.startkey = Some(key);
        self
    }

    /// Builder-style upper bound
    pub fn endkey(mut self, key: Value) -> Self {
        self.endkey = Some(key);
        self
    }
}

/// The compiled, executable form of a predicate tree
#[derive(Debug, Clone, PartialEq)]
pub struct ViewQuery {
    /// Target view
    pub view: ViewRef,
    /// Fetch options
    pub options: ViewOptions,
}

/// One row of a view fetch
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    /// Identifier of the document that emitted the row
    pub id: String,
    /// Emitted view key
    pub key: Value,
    /// Emitted view value
    pub value: Value,
    /// Full document, present when `include_docs` was requested
    pub doc: Option<Document>,
}
