//! Document store abstraction
//!
//! This module defines the `DocumentStore` and `DocumentCursor` traits, the
//! boundary between the datastore adapter and whatever schemaless store backs
//! it. One collection exists per entity kind; documents are keyed by the
//! encoded entity key.
//!
//! Thread safety: stores are shared across request threads (Send + Sync);
//! cursors are owned by one request at a time (Send).

use crate::document::{Document, FindQuery, IndexSpec, SaveOutcome};
use crate::error::Result;

/// An in-flight, already filtered/sorted/paged result stream
pub trait DocumentCursor: Send {
    /// Pull the next document, or `None` when exhausted
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store read fails.
    fn next_document(&mut self) -> Result<Option<Document>>;

    /// Total documents this query yields (skip and limit applied),
    /// independent of how many have been pulled
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store read fails.
    fn count(&self) -> Result<u64>;
}

/// Schemaless document store
pub trait DocumentStore: Send + Sync {
    /// Insert or replace a document by id
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn save(&self, collection: &str, document: Document) -> Result<SaveOutcome>;

    /// Fetch a document by id
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Remove a document by id; returns whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn remove(&self, collection: &str, id: &str) -> Result<bool>;

    /// Fetch any one document of a collection
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn find_one(&self, collection: &str) -> Result<Option<Document>>;

    /// Run a native query
    ///
    /// # Errors
    ///
    /// Returns an error if the query is invalid for this store or the
    /// storage operation fails.
    fn find(&self, collection: &str, query: FindQuery) -> Result<Box<dyn DocumentCursor>>;

    /// Create an index; returns false if one with the same name exists
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn create_index(&self, collection: &str, spec: IndexSpec) -> Result<bool>;

    /// Drop an index by name; returns whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn drop_index(&self, collection: &str, name: &str) -> Result<bool>;

    /// List the indexes of a collection
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn list_indexes(&self, collection: &str) -> Result<Vec<IndexSpec>>;

    /// Names of all collections that hold documents or indexes
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn collection_names(&self) -> Result<Vec<String>>;
}
