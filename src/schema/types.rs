//! Entity and view metadata types
//!
//! Views are pre-declared, server-maintained indexes; an entity declares
//! its views once, at registration time, and they are immutable after
//! that. Every entity implicitly carries the `all` view on its default
//! group, returning all of its documents keyed by identifier.

use serde::{Deserialize, Serialize};

/// Name of the implicit per-entity view returning every document
pub const ALL_VIEW: &str = "all";

/// Key component types a view may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// UTF-8 string key component
    String,
    /// Numeric key component
    Number,
    /// Boolean key component
    Boolean,
}

/// A declared view: group, name and ordered key component types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDescriptor {
    /// View group the view belongs to
    pub group: String,
    /// View name, unique within its group
    pub name: String,
    /// Ordered key component types
    pub key_types: Vec<KeyType>,
}

impl ViewDescriptor {
    /// Declares a view
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        key_types: Vec<KeyType>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            key_types,
        }
    }
}

/// Per-entity view metadata consumed by the compiler and mutation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMeta {
    name: String,
    default_group: String,
    views: Vec<ViewDescriptor>,
}

impl EntityMeta {
    /// Creates metadata for an entity. The default view group is the
    /// entity's own name, and the `all` view is declared implicitly.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let default_group = name.clone();
        let views = vec![ViewDescriptor::new(
            default_group.clone(),
            ALL_VIEW,
            vec![KeyType::String],
        )];
        Self {
            name,
            default_group,
            views,
        }
    }

    /// Declares a view in the entity's default group
    pub fn with_view(self, name: impl Into<String>, key_types: Vec<KeyType>) -> Self {
        let group = self.default_group.clone();
        self.with_view_in(group, name, key_types)
    }

    /// Declares a view in a secondary group
    pub fn with_view_in(
        mut self,
        group: impl Into<String>,
        name: impl Into<String>,
        key_types: Vec<KeyType>,
    ) -> Self {
        self.views.push(ViewDescriptor::new(group, name, key_types));
        self
    }

    /// Entity name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Default view group (the entity's own name)
    pub fn default_group(&self) -> &str {
        &self.default_group
    }

    /// All declared views, implicit `all` view included
    pub fn declared_views(&self) -> &[ViewDescriptor] {
        &self.views
    }

    /// Looks up a declared view
    pub fn view(&self, group: &str, name: &str) -> Option<&ViewDescriptor> {
        self.views
            .iter()
            .find(|v| v.group == group && v.name == name)
    }

    /// Key component types for a declared view, absent when undeclared
    pub fn view_key_types(&self, group: &str, name: &str) -> Option<&[KeyType]> {
        self.view(group, name).map(|v| v.key_types.as_slice())
    }

    /// Name of the identifier uniqueness index, reported on insert
    /// conflicts
    pub fn id_index(&self) -> String {
        format!("{}_id_index", self.name)
    }
}
