//! Bidirectional codec between typed records and generic documents
//!
//! Encoding recurses structurally: record lists encode element-wise
//! preserving order, nested records encode field-wise, and a null field
//! encodes to the explicit JSON null marker rather than being omitted, so
//! consumers can distinguish "absent from schema" from "explicitly empty".
//! Field names cross the boundary verbatim.
//!
//! Decoding is driven by an explicit requested-field list, not by the
//! document: each requested field is looked up by string key, defaulting
//! to null when missing, and assembled positionally. Embedded values are
//! returned raw unless a loader is registered for the field's declared
//! type. The codec is a pure transform with no failure modes.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::record::{Document, FieldSpec, FieldType, FieldValue, Record};

/// Materializes a nested `Record` from a raw embedded document.
///
/// Implementations are registered on the codec per declared type name.
pub trait EmbeddedLoader: Send + Sync {
    /// Loads one embedded document into a record
    fn load(&self, raw: &Document) -> Record;
}

/// The document codec, carrying the embedded-loader registry.
#[derive(Default, Clone)]
pub struct DocumentCodec {
    loaders: HashMap<String, Arc<dyn EmbeddedLoader>>,
}

impl DocumentCodec {
    /// Creates a codec with no embedded loaders
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Registers an embedded loader for a declared type name
    pub fn register_loader(
        &mut self,
        type_name: impl Into<String>,
        loader: Arc<dyn EmbeddedLoader>,
    ) {
        self.loaders.insert(type_name.into(), loader);
    }

    /// Encodes a typed record into a document
    pub fn encode(&self, record: &Record) -> Document {
        let mut doc = Document::new();
        for (name, value) in record.iter() {
            doc.insert(name.clone(), self.encode_value(value));
        }
        doc
    }

    /// Encodes a single field value
    pub fn encode_value(&self, value: &FieldValue) -> Value {
        match value {
            FieldValue::Null => Value::Null,
            FieldValue::Scalar(v) => v.clone(),
            FieldValue::Record(r) => self.encode(r).into_value(),
            FieldValue::Records(rs) => {
                Value::Array(rs.iter().map(|r| self.encode(r).into_value()).collect())
            }
            FieldValue::Raw(v) => v.clone(),
        }
    }

    /// Decodes the requested fields of a document into a record.
    ///
    /// Fields missing from the document decode to the null marker. The
    /// output record carries the fields in the requested order.
    pub fn decode(&self, doc: &Document, requested: &[FieldSpec]) -> Record {
        let mut record = Record::new();
        for spec in requested {
            let raw = doc.get(&spec.name).cloned().unwrap_or(Value::Null);
            record.push(spec.name.clone(), self.decode_field(raw, &spec.ty));
        }
        record
    }

    fn decode_field(&self, raw: Value, ty: &FieldType) -> FieldValue {
        if raw.is_null() {
            return FieldValue::Null;
        }
        match ty {
            FieldType::Scalar => FieldValue::Scalar(raw),
            FieldType::Embedded(type_name) => match (self.loaders.get(type_name), raw) {
                (Some(loader), Value::Object(map)) => {
                    FieldValue::Record(loader.load(&Document::from_map(map)))
                }
                // No loader, or a non-object where the declared type
                // promised one (a caller bug): hand the value back raw.
                (_, other) => FieldValue::Raw(other),
            },
            FieldType::EmbeddedList(type_name) => match (self.loaders.get(type_name), raw) {
                (Some(loader), Value::Array(items)) => FieldValue::Records(
                    items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::Object(map) => Some(loader.load(&Document::from_map(map))),
                            _ => None,
                        })
                        .collect(),
                ),
                (_, other) => FieldValue::Raw(other),
            },
        }
    }
}
