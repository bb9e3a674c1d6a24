//! viewlink - a typed query and mutation layer for view-indexed document stores
//!
//! Lets an application issue structured, typed queries and mutations
//! against a document store that only supports pre-declared map/reduce
//! views, while enforcing optimistic concurrency on updates and deletes.

pub mod document;
pub mod mutation;
pub mod planner;
pub mod projector;
pub mod schema;
pub mod store;
