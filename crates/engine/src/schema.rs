//! Per-kind property type registry
//!
//! Translation of orders and filters depends on the logical type stored
//! under each property. The registry learns those types from every write.
//! The first query of a kind also seeds it once from a sample entity of the
//! store, so data written before this process started stays queryable even
//! after this process has written the kind itself.
//!
//! Last writer wins per property: if two entities of a kind store
//! different types under one name, the most recent write decides. Seeded
//! types never override observed ones.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use tracing::debug;

use kindstore_core::{Entity, PropertyType, Result};

/// Property name -> logical type, for one kind
pub type PropertyTypes = BTreeMap<String, PropertyType>;

#[derive(Debug, Default)]
struct KindSchema {
    types: PropertyTypes,
    seeded: bool,
}

/// Property types of every known kind
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    kinds: RwLock<HashMap<String, KindSchema>>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the property types of a written entity
    pub fn observe(&self, entity: &Entity) {
        let mut kinds = self.kinds.write();
        let schema = kinds.entry(entity.kind().to_string()).or_default();
        for (name, value) in entity.properties() {
            schema.types.insert(name.clone(), value.property_type());
        }
    }

    /// Property types of a kind, if it is known
    pub fn types(&self, kind: &str) -> Option<PropertyTypes> {
        self.kinds.read().get(kind).map(|schema| schema.types.clone())
    }

    /// Property types of a kind, seeding it from `sample` on first use
    ///
    /// `sample` is invoked once per kind, whether or not the kind has been
    /// observed already. Sampled types only fill properties no write has
    /// typed.
    ///
    /// # Errors
    ///
    /// Propagates the error of `sample`.
    pub fn types_or_seed<F>(&self, kind: &str, sample: F) -> Result<PropertyTypes>
    where
        F: FnOnce() -> Result<Entity>,
    {
        if let Some(schema) = self.kinds.read().get(kind) {
            if schema.seeded {
                return Ok(schema.types.clone());
            }
        }
        let entity = sample()?;
        debug!(kind, properties = entity.properties().len(), "seeded schema from sample");
        let mut kinds = self.kinds.write();
        let schema = kinds.entry(kind.to_string()).or_default();
        if !schema.seeded {
            for (name, value) in entity.properties() {
                schema
                    .types
                    .entry(name.clone())
                    .or_insert_with(|| value.property_type());
            }
            schema.seeded = true;
        }
        Ok(schema.types.clone())
    }

    /// Number of known kinds
    pub fn len(&self) -> usize {
        self.kinds.read().len()
    }

    /// Check whether no kind is known
    pub fn is_empty(&self) -> bool {
        self.kinds.read().is_empty()
    }
}
