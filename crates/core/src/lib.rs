//! Core types and traits for kindstore
//!
//! This crate defines the foundational types used throughout the system:
//! - Key: Hierarchical (kind, identifier) path addressing an entity
//! - Entity / PropertyValue: The typed datastore data model
//! - Value / Document: The schemaless document store's native data model
//! - DocFilter / FindQuery / IndexSpec: Native query and index primitives
//! - QueryDescriptor: The structured datastore query handed to the translator
//! - QueryLimits: Fail-fast ceilings on query shape
//! - Error: Categorized error hierarchy
//! - Traits: DocumentStore / DocumentCursor (the document store boundary)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod key;
pub mod limits;
pub mod property;
pub mod query;
pub mod traits;
pub mod types;
pub mod value;

pub use document::{
    DocFilter, Document, FindQuery, IndexSpec, Predicate, SaveOutcome, SortDirection, SortField,
    ID_FIELD,
};
pub use error::{Error, ErrorCategory, Result};
pub use key::{KeyError, FIELD_SEPARATOR, ID_MARKER};
pub use limits::{LimitError, QueryLimits, MAX_QUERY_COMPONENTS, MAX_QUERY_OFFSET};
pub use property::{GeoPt, PropertyType, PropertyValue};
pub use query::{
    CompositeIndex, Direction, FilterClause, FilterOperator, OrderClause, QueryDescriptor,
    QueryHint, QueryResult, KEY_PROPERTY,
};
pub use traits::{DocumentCursor, DocumentStore};
pub use types::{Entity, Identifier, Key, PathElement};
pub use value::Value;
