//! Store client boundary for viewlink
//!
//! The seam to the document store: wire types for view fetches, the
//! client trait, connection configuration and an in-process
//! implementation. The HTTP wire client proper lives outside this crate;
//! everything here is specified at its interface.

mod client;
mod config;
mod errors;
mod memory;
mod types;

pub use client::StoreClient;
pub use config::StoreConfig;
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use types::{ViewOptions, ViewQuery, ViewRef, ViewRow};
