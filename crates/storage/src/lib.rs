//! Storage layer for kindstore
//!
//! This crate implements an in-process schemaless document store with:
//! - MemoryStore: one `BTreeMap` collection per kind behind a `parking_lot::RwLock`
//! - CompiledFilter: native predicate evaluation with array membership
//! - SnapshotCursor: point-in-time result cursors
//! - IndexCatalog: per-collection named index definitions
//!
//! Any other store can back the engine by implementing
//! `kindstore_core::DocumentStore`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod index;
pub mod matcher;
pub mod memory;

pub use cursor::SnapshotCursor;
pub use index::{IndexCatalog, ID_INDEX_NAME};
pub use matcher::{sort_documents, CompiledFilter};
pub use memory::MemoryStore;
