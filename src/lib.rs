//! kindstore - a hierarchical, typed datastore served from a schemaless
//! document store
//!
//! Entities are addressed by keys (paths of `(kind, id-or-name)` pairs) and
//! carry typed properties. Each kind is stored as one native collection;
//! keys, property values and queries are translated to and from the
//! document store's own forms.
//!
//! # Quick Start
//!
//! ```ignore
//! use kindstore::{AdapterConfig, Command, Entity, Executor, Key, Output};
//!
//! let executor = Executor::in_memory(AdapterConfig::default());
//! let pet = Entity::new(Key::incomplete("Pet")).with_property("name", "Fluffy");
//! let keys = executor.execute(Command::Put { entities: vec![pet] })?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which dispatches commands to
//! a [`Datastore`]. The datastore can also be used directly, over the bundled
//! [`MemoryStore`] or any other [`DocumentStore`].

// Re-export the public API from kindstore-executor
pub use kindstore_executor::*;

pub use kindstore_core::{
    CompositeIndex, Direction, DocumentStore, Entity, ErrorCategory, FilterClause,
    FilterOperator, GeoPt, Identifier, Key, OrderClause, PathElement, PropertyType,
    PropertyValue, QueryDescriptor, QueryHint, QueryResult, KEY_PROPERTY,
};
pub use kindstore_engine::{AdapterConfig, Datastore, HistoryEntry, CONFIG_FILE_NAME};
pub use kindstore_storage::MemoryStore;
