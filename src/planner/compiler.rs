//! Predicate compiler
//!
//! Compiles a predicate tree over one entity into a single view-fetch
//! descriptor, or rejects it. Produced queries are immutable.
//!
//! # Compilation rules (strict)
//!
//! 1. Joins, preloads, havings, distinct: rejected outright
//! 2. No clause compiles to the entity's `all` view
//! 3. A leaf compiles to its view plus one option (`key`, `keys`,
//!    `startkey` or `endkey`); strict comparators are rejected
//! 4. `And` folds children left to right; children must target the same
//!    view, `keys` options merge by order-preserving intersection, any
//!    other colliding option is rejected
//! 5. Every compiled query sets `include_docs: true`

use tracing::debug;

use crate::schema::{EntityMeta, ALL_VIEW};
use crate::store::{ViewOptions, ViewQuery, ViewRef};

use super::ast::{Filter, FilterOp, Predicate, QueryRequest};
use super::errors::{CompileError, CompileResult};

/// Compiles predicate trees against one entity's view metadata
pub struct PredicateCompiler<'a> {
    meta: &'a EntityMeta,
}

impl<'a> PredicateCompiler<'a> {
    /// Creates a compiler for an entity
    pub fn new(meta: &'a EntityMeta) -> Self {
        Self { meta }
    }

    /// Compiles a request into an executable view query
    pub fn compile(&self, request: &QueryRequest) -> CompileResult<ViewQuery> {
        if !request.joins.is_empty() {
            return Err(CompileError::Unsupported("join".into()));
        }
        if !request.preloads.is_empty() {
            return Err(CompileError::Unsupported("preload".into()));
        }
        if !request.havings.is_empty() {
            return Err(CompileError::Unsupported("having".into()));
        }
        if request.distinct.is_some() {
            return Err(CompileError::Unsupported("distinct".into()));
        }

        let (view, options) = match request.wheres.as_slice() {
            [] => (self.all_view(), ViewOptions::default()),
            [predicate] => self.compile_predicate(predicate)?,
            clauses => return Err(CompileError::MultipleWhereClauses(clauses.len())),
        };

        // The projector needs full document bodies, not just the
        // emitted key/value pair.
        let options = ViewOptions {
            include_docs: true,
            ..options
        };

        debug!(entity = self.meta.name(), view = %view, "compiled view query");
        Ok(ViewQuery { view, options })
    }

    fn all_view(&self) -> ViewRef {
        ViewRef::new(self.meta.default_group(), ALL_VIEW)
    }

    fn compile_predicate(&self, predicate: &Predicate) -> CompileResult<(ViewRef, ViewOptions)> {
        match predicate {
            Predicate::Leaf(filter) => self.compile_filter(filter),
            Predicate::And(children) => {
                // A conjunction of zero constraints restricts nothing.
                let mut acc: Option<(ViewRef, ViewOptions)> = None;
                for child in children {
                    let compiled = self.compile_predicate(child)?;
                    acc = Some(match acc {
                        None => compiled,
                        Some(current) => merge(current, compiled)?,
                    });
                }
                Ok(acc.unwrap_or_else(|| (self.all_view(), ViewOptions::default())))
            }
        }
    }

    fn compile_filter(&self, filter: &Filter) -> CompileResult<(ViewRef, ViewOptions)> {
        let group = filter
            .group
            .as_deref()
            .unwrap_or_else(|| self.meta.default_group());
        if self.meta.view(group, &filter.view).is_none() {
            return Err(CompileError::UnknownView {
                entity: self.meta.name().to_string(),
                group: group.to_string(),
                view: filter.view.clone(),
            });
        }

        let view = ViewRef::new(group, &filter.view);
        let options = match &filter.op {
            FilterOp::Eq(value) => ViewOptions::default().key(value.clone()),
            FilterOp::In(values) => ViewOptions::default().keys(values.clone()),
            FilterOp::Gte(value) => ViewOptions::default().startkey(value.clone()),
            FilterOp::Lte(value) => ViewOptions::default().endkey(value.clone()),
            op @ (FilterOp::Gt(_) | FilterOp::Lt(_)) => {
                return Err(CompileError::Unsupported(format!(
                    "comparator '{}'",
                    op.op_name()
                )))
            }
        };
        Ok((view, options))
    }
}

// Merges two compiled children of a conjunction. A lookup admits one
// equality anchor and one bound each way; `keys` sets intersect.
fn merge(
    (view, acc): (ViewRef, ViewOptions),
    (other_view, next): (ViewRef, ViewOptions),
) -> CompileResult<(ViewRef, ViewOptions)> {
    if view != other_view {
        return Err(CompileError::CrossViewConjunction {
            left: view.to_string(),
            right: other_view.to_string(),
        });
    }

    let keys = match (acc.keys, next.keys) {
        (Some(a), Some(b)) => Some(a.into_iter().filter(|v| b.contains(v)).collect()),
        (a, b) => a.or(b),
    };

    let merged = ViewOptions {
        key: merge_single(acc.key, next.key, "key")?,
        keys,
        startkey: merge_single(acc.startkey, next.startkey, "startkey")?,
        endkey: merge_single(acc.endkey, next.endkey, "endkey")?,
        include_docs: false,
    };
    Ok((view, merged))
}

fn merge_single<T: PartialEq>(
    acc: Option<T>,
    next: Option<T>,
    option: &'static str,
) -> CompileResult<Option<T>> {
    match (acc, next) {
        (Some(a), Some(b)) if a != b => Err(CompileError::ConflictingOption { option }),
        (a, b) => Ok(a.or(b)),
    }
}
