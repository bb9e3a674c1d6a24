//! Document and record representations
//!
//! A `Document` is the store's generic, schema-less shape: an ordered
//! mapping from string keys to JSON values, carrying the reserved `_id`
//! and `_rev` keys. A `Record` is the typed, caller-facing counterpart:
//! an ordered list of named `FieldValue`s produced by the codec.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved key for the document identifier.
pub const ID_FIELD: &str = "_id";

/// Reserved key for the revision token. The token is opaque and is only
/// ever compared for equality; it is assigned by the store on every write
/// and must never be synthesized by this layer.
pub const REV_FIELD: &str = "_rev";

/// The store's generic document representation.
///
/// Field order is insertion order, preserved through serialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Creates an empty document
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Wraps an existing JSON object map
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns the document identifier, if assigned
    pub fn id(&self) -> Option<&str> {
        self.fields.get(ID_FIELD).and_then(Value::as_str)
    }

    /// Returns the revision token, if assigned
    pub fn rev(&self) -> Option<&str> {
        self.fields.get(REV_FIELD).and_then(Value::as_str)
    }

    /// Sets the document identifier
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.fields.insert(ID_FIELD.into(), Value::String(id.into()));
    }

    /// Sets the revision token
    pub fn set_rev(&mut self, rev: impl Into<String>) {
        self.fields.insert(REV_FIELD.into(), Value::String(rev.into()));
    }

    /// Looks up a field by string key
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Inserts or overwrites a field
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// Returns true if the field is present (even if explicitly null)
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the document has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Consumes the document into a JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// A typed field value inside a `Record`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Explicitly empty. Encodes to the JSON null marker, never omission.
    Null,
    /// A scalar (string, number or boolean)
    Scalar(Value),
    /// A nested record, materialized by a registered embedded loader
    Record(Record),
    /// An ordered list of nested records
    Records(Vec<Record>),
    /// An embedded value returned as-is, for the caller's own structural
    /// loader to interpret
    Raw(Value),
}

impl FieldValue {
    /// Wraps a scalar value
    pub fn scalar(value: impl Into<Value>) -> Self {
        FieldValue::Scalar(value.into())
    }

    /// Returns true for the null marker
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the scalar value, if this is one
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            FieldValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the nested record, if this is one
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FieldValue::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the nested record list, if this is one
    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            FieldValue::Records(rs) => Some(rs),
            _ => None,
        }
    }
}

/// The typed counterpart of a `Document`: named fields assembled
/// positionally in the order they were requested.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// Creates an empty record
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a field
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    /// Builder-style field append
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.push(name, value);
        self
    }

    /// Looks up a field by name (first match)
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterates fields in positional order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n, v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Declared shape of a requested field, driving decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Plain scalar; passed through unchanged
    Scalar,
    /// A nested record of the named declared type
    Embedded(String),
    /// An ordered list of nested records of the named declared type
    EmbeddedList(String),
}

/// A requested field: name plus declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, matched verbatim against document keys
    pub name: String,
    /// Declared field type
    pub ty: FieldType,
}

impl FieldSpec {
    /// A scalar field
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: FieldType::Scalar,
        }
    }

    /// An embedded record field of the given declared type
    pub fn embedded(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: FieldType::Embedded(type_name.into()),
        }
    }

    /// An embedded record-list field of the given declared type
    pub fn embedded_list(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: FieldType::EmbeddedList(type_name.into()),
        }
    }
}
