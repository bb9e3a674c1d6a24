//! Document model and codec for viewlink
//!
//! The document side of the translation layer: the store's generic
//! key/value representation, the typed record representation, and the
//! codec converting between them.
//!
//! # Invariants
//!
//! - Field names cross the boundary verbatim (no renaming, no casing)
//! - A null field encodes to the explicit null marker, never omission
//! - `_rev` is opaque and only ever compared for equality

mod codec;
mod record;

pub use codec::{DocumentCodec, EmbeddedLoader};
pub use record::{Document, FieldSpec, FieldType, FieldValue, Record, ID_FIELD, REV_FIELD};
