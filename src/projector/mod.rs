//! Result projector subsystem for viewlink
//!
//! Consumes raw view-fetch rows plus a requested-field list and produces
//! typed records in the store's row order.

mod errors;
mod projector;

pub use errors::{ProjectionError, ProjectionResult};
pub use projector::ResultProjector;
