//! View registry subsystem for viewlink
//!
//! Per-entity view metadata: the default view group, every declared
//! (group, view) pair and its ordered key component types. The source
//! system declared this through compile-time schema macros; here it is a
//! static registry built once at startup through explicit registration.

mod errors;
mod registry;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use registry::SchemaRegistry;
pub use types::{EntityMeta, KeyType, ViewDescriptor, ALL_VIEW};
