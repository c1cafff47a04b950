//! Per-collection index catalog
//!
//! The in-memory store evaluates every query by scanning, so an index here is
//! a named definition only. The catalog still behaves like a real store's:
//! every collection carries the implicit `_id_` index, names are unique and
//! the implicit index cannot be dropped.

use std::collections::BTreeMap;

use kindstore_core::{IndexSpec, SortField, ID_FIELD};

/// Name of the implicit primary-key index
pub const ID_INDEX_NAME: &str = "_id_";

/// Named index definitions of one collection
#[derive(Debug, Clone, Default)]
pub struct IndexCatalog {
    specs: BTreeMap<String, IndexSpec>,
}

impl IndexCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            specs: BTreeMap::new(),
        }
    }

    /// Add an index; returns false if the name is taken
    pub fn insert(&mut self, spec: IndexSpec) -> bool {
        if spec.name == ID_INDEX_NAME || self.specs.contains_key(&spec.name) {
            return false;
        }
        self.specs.insert(spec.name.clone(), spec);
        true
    }

    /// Remove an index by name; returns whether it existed
    pub fn remove(&mut self, name: &str) -> bool {
        self.specs.remove(name).is_some()
    }

    /// All indexes, the implicit `_id_` index first
    pub fn list(&self) -> Vec<IndexSpec> {
        let implicit = IndexSpec {
            name: ID_INDEX_NAME.to_string(),
            fields: vec![SortField::asc(ID_FIELD)],
        };
        std::iter::once(implicit)
            .chain(self.specs.values().cloned())
            .collect()
    }

    /// Check whether the catalog holds only the implicit index
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
