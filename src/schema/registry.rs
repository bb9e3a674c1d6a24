//! Entity registration and lookup
//!
//! The registry is built once at process start through explicit
//! registration calls and read-only afterwards. It replaces implicit
//! global state: callers own the registry and pass references down.

use std::collections::HashMap;

use super::errors::{SchemaError, SchemaResult};
use super::types::EntityMeta;

/// Maps entity names to their view metadata
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    entities: HashMap<String, EntityMeta>,
}

impl SchemaRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }

    /// Registers an entity, replacing any previous registration of the
    /// same name
    pub fn register(&mut self, meta: EntityMeta) {
        self.entities.insert(meta.name().to_string(), meta);
    }

    /// Looks up an entity's metadata
    pub fn entity(&self, name: &str) -> SchemaResult<&EntityMeta> {
        self.entities
            .get(name)
            .ok_or_else(|| SchemaError::UnknownEntity(name.to_string()))
    }

    /// Returns true if the entity is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }
}
