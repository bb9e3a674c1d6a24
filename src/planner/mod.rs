//! Predicate compiler subsystem for viewlink
//!
//! Turns a tree of logical predicates over one entity into a single
//! view-fetch descriptor, validating that the tree is expressible as one
//! view lookup.
//!
//! # Design principles
//!
//! - Explicit: unsupported shapes are rejected with a descriptive error,
//!   never approximated
//! - Fail fast: every rejection happens before any network call
//! - Single lookup: no clause may span two views or two view groups

mod ast;
mod compiler;
mod errors;

pub use ast::{Filter, FilterOp, Predicate, QueryRequest};
pub use compiler::PredicateCompiler;
pub use errors::{CompileError, CompileResult};
