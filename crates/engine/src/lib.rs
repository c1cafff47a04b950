//! Datastore engine for kindstore
//!
//! This crate serves the hierarchical, typed datastore API on top of any
//! `DocumentStore`:
//! - codec: key, value and entity translation to native documents
//! - query: descriptor translation and composite index requirements
//! - CursorRegistry: resumable result cursors behind opaque handles
//! - index_guard: native index names and existence checks
//! - SchemaRegistry: per-kind property types maintained on writes
//! - QueryHistory: frequency table of the queries served
//! - Datastore: the service tying them together
//!
//! Codecs and the translator are pure functions; all shared state lives in
//! the registries owned by a `Datastore`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod cursor;
pub mod datastore;
pub mod history;
pub mod index_guard;
pub mod query;
pub mod schema;

pub use codec::{
    ancestor_pattern, decode_key, document_from_entity, encode_key, entity_from_document,
    from_storage, to_storage,
};
pub use config::{AdapterConfig, CONFIG_FILE_NAME};
pub use cursor::CursorRegistry;
pub use datastore::Datastore;
pub use history::{HistoryEntry, QueryHistory};
pub use query::{required_index, translate, IndexRequirement, Translated};
pub use schema::{PropertyTypes, SchemaRegistry};
