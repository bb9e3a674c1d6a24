//! Filter AST structures
//!
//! The parsed predicate representation consumed by the compiler. A
//! caller's filter expression is turned into this tagged-variant form
//! before compilation; the builder accepts every comparator so rejection
//! of unsupported ones happens in one place, at compile time.

use serde_json::Value;

use crate::document::FieldSpec;

/// Comparison operation against a view key
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Equality: key = value
    Eq(Value),
    /// Set membership: key in values
    In(Vec<Value>),
    /// Greater than: key > value (unsupported, rejected at compile)
    Gt(Value),
    /// Greater than or equal: key >= value
    Gte(Value),
    /// Less than: key < value (unsupported, rejected at compile)
    Lt(Value),
    /// Less than or equal: key <= value
    Lte(Value),
}

impl FilterOp {
    /// Returns the comparator name for error messages
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "eq",
            FilterOp::In(_) => "in",
            FilterOp::Gt(_) => "gt",
            FilterOp::Gte(_) => "gte",
            FilterOp::Lt(_) => "lt",
            FilterOp::Lte(_) => "lte",
        }
    }
}

/// A single filter: a declared view plus a comparison on its key
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// View name, resolved against the entity's default group unless a
    /// group is given explicitly
    pub view: String,
    /// Explicit view group (secondary groups only)
    pub group: Option<String>,
    /// Comparison operation
    pub op: FilterOp,
}

impl Filter {
    fn new(view: impl Into<String>, op: FilterOp) -> Self {
        Self {
            view: view.into(),
            group: None,
            op,
        }
    }

    /// Equality filter
    pub fn eq(view: impl Into<String>, value: Value) -> Self {
        Self::new(view, FilterOp::Eq(value))
    }

    /// Set-membership filter
    pub fn any_of(view: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(view, FilterOp::In(values))
    }

    /// Lower-bound filter (inclusive)
    pub fn gte(view: impl Into<String>, value: Value) -> Self {
        Self::new(view, FilterOp::Gte(value))
    }

    /// Upper-bound filter (inclusive)
    pub fn lte(view: impl Into<String>, value: Value) -> Self {
        Self::new(view, FilterOp::Lte(value))
    }

    /// Strict lower-bound filter
    pub fn gt(view: impl Into<String>, value: Value) -> Self {
        Self::new(view, FilterOp::Gt(value))
    }

    /// Strict upper-bound filter
    pub fn lt(view: impl Into<String>, value: Value) -> Self {
        Self::new(view, FilterOp::Lt(value))
    }

    /// Targets the filter at a secondary view group
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// A predicate tree: a filter leaf or an AND conjunction
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Single filter
    Leaf(Filter),
    /// Conjunction of child predicates
    And(Vec<Predicate>),
}

impl Predicate {
    /// Equality leaf
    pub fn eq(view: impl Into<String>, value: Value) -> Self {
        Predicate::Leaf(Filter::eq(view, value))
    }

    /// Set-membership leaf
    pub fn any_of(view: impl Into<String>, values: Vec<Value>) -> Self {
        Predicate::Leaf(Filter::any_of(view, values))
    }

    /// Inclusive lower-bound leaf
    pub fn gte(view: impl Into<String>, value: Value) -> Self {
        Predicate::Leaf(Filter::gte(view, value))
    }

    /// Inclusive upper-bound leaf
    pub fn lte(view: impl Into<String>, value: Value) -> Self {
        Predicate::Leaf(Filter::lte(view, value))
    }

    /// Conjunction
    pub fn and(children: Vec<Predicate>) -> Self {
        Predicate::And(children)
    }
}

/// A caller's query request over one entity type.
///
/// Joins, preloads, havings and distinct are carried so the compiler can
/// reject them explicitly instead of silently ignoring them.
#[derive(Debug, Clone, Default)]
pub struct QueryRequest {
    /// Target entity name
    pub entity: String,
    /// Top-level predicate clauses (at most one is compilable)
    pub wheres: Vec<Predicate>,
    /// Requested join targets (always rejected)
    pub joins: Vec<String>,
    /// Requested preloads (always rejected)
    pub preloads: Vec<String>,
    /// Requested having clauses (always rejected)
    pub havings: Vec<String>,
    /// Requested distinct projection (always rejected)
    pub distinct: Option<String>,
    /// Fields to project out of each result document
    pub fields: Vec<FieldSpec>,
}

impl QueryRequest {
    /// Creates a request for an entity
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            ..Self::default()
        }
    }

    /// Adds a top-level predicate clause
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.wheres.push(predicate);
        self
    }

    /// Adds a projected field
    pub fn returning(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a join target
    pub fn join(mut self, target: impl Into<String>) -> Self {
        self.joins.push(target.into());
        self
    }

    /// Adds a preload target
    pub fn preload(mut self, target: impl Into<String>) -> Self {
        self.preloads.push(target.into());
        self
    }

    /// Adds a having clause
    pub fn having(mut self, clause: impl Into<String>) -> Self {
        self.havings.push(clause.into());
        self
    }

    /// Sets a distinct projection
    pub fn distinct_on(mut self, expr: impl Into<String>) -> Self {
        self.distinct = Some(expr.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_builder() {
        let request = QueryRequest::new("posts")
            .filter(Predicate::eq("by_author", json!("alice")))
            .returning(FieldSpec::scalar("title"));

        assert_eq!(request.entity, "posts");
        assert_eq!(request.wheres.len(), 1);
        assert_eq!(request.fields.len(), 1);
        assert!(request.joins.is_empty());
    }

    #[test]
    fn test_filter_constructors() {
        let filter = Filter::any_of("by_author", vec![json!("alice"), json!("bob")]);
        assert_eq!(filter.op.op_name(), "in");
        assert!(filter.group.is_none());

        let scoped = Filter::eq("by_year", json!(2024)).in_group("posts_archive");
        assert_eq!(scoped.group.as_deref(), Some("posts_archive"));
    }
}
