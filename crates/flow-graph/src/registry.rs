//! Component registry for resolving node names
//!
//! Maps the component name stored on every node ("Array Sum", "Condition",
//! ...) to its metadata. Loading a stored flow and adding nodes from the
//! palette both go through this lookup.
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = ComponentRegistry::new();
//! registry.register(ArraySum::descriptor());
//! let meta = registry.get("Array Sum").unwrap();
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::descriptor::{ComponentCategory, ComponentMetadata};
use crate::error::{FlowGraphError, Result};

/// Registry of components keyed by name
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    entries: BTreeMap<String, ComponentMetadata>,
}

impl ComponentRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register a component, replacing any previous one with the same name
    pub fn register(&mut self, metadata: ComponentMetadata) {
        if self.entries.contains_key(&metadata.name) {
            log::warn!("Component '{}' registered twice, keeping the latest", metadata.name);
        }
        self.entries.insert(metadata.name.clone(), metadata);
    }

    /// Get metadata for a component
    pub fn get(&self, name: &str) -> Option<&ComponentMetadata> {
        self.entries.get(name)
    }

    /// Get metadata or fail with `UnknownComponent`
    pub fn require(&self, name: &str) -> Result<&ComponentMetadata> {
        self.get(name)
            .ok_or_else(|| FlowGraphError::UnknownComponent(name.to_string()))
    }

    /// Check if a component is registered
    pub fn has_component(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All registered metadata, ordered by name
    pub fn all_metadata(&self) -> Vec<&ComponentMetadata> {
        self.entries.values().collect()
    }

    /// Metadata grouped by category
    pub fn metadata_by_category(&self) -> HashMap<ComponentCategory, Vec<&ComponentMetadata>> {
        let mut grouped: HashMap<ComponentCategory, Vec<&ComponentMetadata>> = HashMap::new();
        for metadata in self.entries.values() {
            grouped.entry(metadata.category).or_default().push(metadata);
        }
        grouped
    }

    /// Registered component names, ordered
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered components
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
