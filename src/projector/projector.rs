//! Result projector
//!
//! Turns raw view-fetch rows into typed records, preserving the store's
//! row ordering (ascending by view key unless the store says otherwise;
//! this layer does not reorder).

use crate::document::{DocumentCodec, FieldSpec, Record};
use crate::store::ViewRow;

use super::errors::{ProjectionError, ProjectionResult};

/// Projects view rows through the document codec
pub struct ResultProjector<'a> {
    codec: &'a DocumentCodec,
}

impl<'a> ResultProjector<'a> {
    /// Creates a projector over a codec
    pub fn new(codec: &'a DocumentCodec) -> Self {
        Self { codec }
    }

    /// Decodes the requested fields out of each row's embedded document.
    /// The result is consumed once by the caller; a row lacking its
    /// document is a fatal data-integrity fault.
    pub fn project(
        &self,
        rows: Vec<ViewRow>,
        requested: &[FieldSpec],
    ) -> ProjectionResult<Vec<Record>> {
        rows.into_iter()
            .map(|row| match row.doc {
                Some(doc) => Ok(self.codec.decode(&doc, requested)),
                None => Err(ProjectionError::MissingDocument { row_id: row.id }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, FieldValue};
    use serde_json::{json, Value};

    fn row(id: &str, doc: Option<Document>) -> ViewRow {
        ViewRow {
            id: id.into(),
            key: json!(id),
            value: Value::Null,
            doc,
        }
    }

    #[test]
    fn test_projects_rows_in_store_order() {
        let codec = DocumentCodec::new();
        let projector = ResultProjector::new(&codec);

        let mut first = Document::new();
        first.insert("title", json!("one"));
        let mut second = Document::new();
        second.insert("title", json!("two"));

        let records = projector
            .project(
                vec![row("p1", Some(first)), row("p2", Some(second))],
                &[FieldSpec::scalar("title")],
            )
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].get("title").and_then(FieldValue::as_scalar),
            Some(&json!("one"))
        );
        assert_eq!(
            records[1].get("title").and_then(FieldValue::as_scalar),
            Some(&json!("two"))
        );
    }

    #[test]
    fn test_row_without_document_is_fatal() {
        let codec = DocumentCodec::new();
        let projector = ResultProjector::new(&codec);

        let err = projector
            .project(vec![row("p1", None)], &[FieldSpec::scalar("title")])
            .unwrap_err();
        assert_eq!(err, ProjectionError::MissingDocument { row_id: "p1".into() });
    }
}
