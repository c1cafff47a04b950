//! MemoryStore: in-process document store
//!
//! This module implements the `DocumentStore` trait using:
//! - `BTreeMap<String, Collection>` keyed by collection name
//! - `BTreeMap<String, Document>` per collection, so natural order is id order
//! - `parking_lot::RwLock` for thread-safe access
//!
//! # Design Notes
//!
//! - **Scan-based queries**: `find` filters every document of the collection;
//!   index definitions are recorded but never consulted
//! - **Materialized cursors**: results are computed under the read lock and
//!   handed to a `SnapshotCursor`
//! - **Lazy collections**: a collection springs into existence on its first
//!   document or index

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use kindstore_core::{
    Document, DocumentCursor, DocumentStore, FindQuery, IndexSpec, Result, SaveOutcome,
};

use crate::cursor::SnapshotCursor;
use crate::index::IndexCatalog;
use crate::matcher::{sort_documents, CompiledFilter};

#[derive(Debug, Default)]
struct Collection {
    documents: BTreeMap<String, Document>,
    indexes: IndexCatalog,
}

/// In-memory document store
///
/// Cloning yields another handle onto the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<BTreeMap<String, Collection>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, |c| c.documents.len())
    }

    /// Check whether a collection holds no documents
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

impl DocumentStore for MemoryStore {
    fn save(&self, collection: &str, document: Document) -> Result<SaveOutcome> {
        let mut collections = self.collections.write();
        let coll = collections.entry(collection.to_string()).or_default();
        let outcome = match coll.documents.insert(document.id.clone(), document) {
            Some(_) => SaveOutcome::Replaced,
            None => SaveOutcome::Inserted,
        };
        debug!(collection, ?outcome, "saved document");
        Ok(outcome)
    }

    fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|c| c.documents.get(id))
            .cloned())
    }

    fn remove(&self, collection: &str, id: &str) -> Result<bool> {
        let mut collections = self.collections.write();
        let removed = collections
            .get_mut(collection)
            .map_or(false, |c| c.documents.remove(id).is_some());
        debug!(collection, removed, "removed document");
        Ok(removed)
    }

    fn find_one(&self, collection: &str) -> Result<Option<Document>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|c| c.documents.values().next())
            .cloned())
    }

    fn find(&self, collection: &str, query: FindQuery) -> Result<Box<dyn DocumentCursor>> {
        let filter = CompiledFilter::compile(&query.filter)?;

        let matched: Vec<Document> = {
            let collections = self.collections.read();
            match collections.get(collection) {
                Some(c) => c
                    .documents
                    .values()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect(),
                None => Vec::new(),
            }
        };

        let sorted = sort_documents(matched, &query.sort);
        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let paged: Vec<Document> = match query.limit {
            Some(limit) => sorted
                .into_iter()
                .skip(skip)
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
            None => sorted.into_iter().skip(skip).collect(),
        };

        debug!(collection, results = paged.len(), "find");
        Ok(Box::new(SnapshotCursor::new(paged)))
    }

    fn create_index(&self, collection: &str, spec: IndexSpec) -> Result<bool> {
        let mut collections = self.collections.write();
        let name = spec.name.clone();
        let created = collections
            .entry(collection.to_string())
            .or_default()
            .indexes
            .insert(spec);
        debug!(collection, index = %name, created, "create index");
        Ok(created)
    }

    fn drop_index(&self, collection: &str, name: &str) -> Result<bool> {
        let mut collections = self.collections.write();
        let dropped = collections
            .get_mut(collection)
            .map_or(false, |c| c.indexes.remove(name));
        debug!(collection, index = name, dropped, "drop index");
        Ok(dropped)
    }

    fn list_indexes(&self, collection: &str) -> Result<Vec<IndexSpec>> {
        let collections = self.collections.read();
        Ok(match collections.get(collection) {
            Some(c) => c.indexes.list(),
            None => Vec::new(),
        })
    }

    fn collection_names(&self) -> Result<Vec<String>> {
        Ok(self
            .collections
            .read()
            .iter()
            .filter(|(_, c)| !c.documents.is_empty() || !c.indexes.is_empty())
            .map(|(name, _)| name.clone())
            .collect())
    }
}
