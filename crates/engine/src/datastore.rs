//! Datastore service
//!
//! `Datastore` serves the datastore API over any `DocumentStore`:
//! - Entities: put, get, delete
//! - Queries: run_query, next, count, query_history
//! - Composite indexes: create_index, get_indices, update_index, delete_index
//! - Transactions: accepted and ignored
//!
//! One native collection holds each kind. The registries (cursors, schema,
//! history, index ids) are owned by the service instance; nothing here is
//! process-global.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::Rng;
use tracing::{debug, info, warn};

use kindstore_core::{
    CompositeIndex, DocumentStore, Entity, Error, Identifier, IndexSpec, Key, QueryDescriptor,
    QueryLimits, QueryResult, Result,
};
use kindstore_storage::MemoryStore;

use crate::codec::{document_from_entity, encode_key, entity_from_document};
use crate::config::AdapterConfig;
use crate::cursor::CursorRegistry;
use crate::history::{HistoryEntry, QueryHistory};
use crate::index_guard::{definition_from_spec, exists, index_fields, index_name};
use crate::query::{required_index, translate, Translated};
use crate::schema::SchemaRegistry;

#[derive(Debug)]
struct IndexIds {
    next_id: u64,
    ids: HashMap<(String, String), u64>,
}

/// The datastore service
pub struct Datastore {
    store: Arc<dyn DocumentStore>,
    config: AdapterConfig,
    limits: QueryLimits,
    cursors: CursorRegistry,
    schema: SchemaRegistry,
    history: QueryHistory,
    index_ids: Mutex<IndexIds>,
}

impl std::fmt::Debug for Datastore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Datastore")
            .field("config", &self.config)
            .field("cursors", &self.cursors)
            .finish()
    }
}

impl Datastore {
    /// Serve the datastore API over `store`
    pub fn new(store: Arc<dyn DocumentStore>, config: AdapterConfig) -> Self {
        info!(
            target: "kindstore::datastore",
            app = %config.app_id,
            require_indexes = config.require_indexes,
            "Datastore opened"
        );
        Self {
            store,
            limits: config.limits(),
            config,
            cursors: CursorRegistry::new(),
            schema: SchemaRegistry::new(),
            history: QueryHistory::new(),
            index_ids: Mutex::new(IndexIds {
                next_id: 1,
                ids: HashMap::new(),
            }),
        }
    }

    /// Datastore over a fresh in-memory store
    pub fn in_memory(config: AdapterConfig) -> Self {
        Self::new(Arc::new(MemoryStore::new()), config)
    }

    /// The active configuration
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// The live cursor table
    pub fn cursors(&self) -> &CursorRegistry {
        &self.cursors
    }

    // =========================================================================
    // Entities
    // =========================================================================

    fn allocate_id(&self, key: &Key) -> Result<Key> {
        let mut rng = rand::thread_rng();
        loop {
            let candidate = key.with_last_id(rng.gen_range(1..=i64::MAX));
            let id = encode_key(&candidate)?;
            if self.store.find_by_id(candidate.kind(), &id)?.is_none() {
                return Ok(candidate);
            }
            debug!(key = %candidate, "allocated id collided, drawing again");
        }
    }

    /// Store entities, allocating ids for incomplete keys
    ///
    /// Every entity is validated and encoded before the first write.
    /// Returns the complete keys in input order.
    ///
    /// # Errors
    ///
    /// Returns `MalformedKey` for keys that cannot be encoded (an incomplete
    /// ancestor included) and store errors.
    pub fn put(&self, entities: Vec<Entity>) -> Result<Vec<Key>> {
        let mut prepared = Vec::with_capacity(entities.len());
        for mut entity in entities {
            let needs_id = matches!(
                entity.key().last().map(|e| &e.id),
                Some(Identifier::Unassigned)
            );
            if needs_id {
                let key = self.allocate_id(entity.key())?;
                entity.set_key(key);
            }
            let document = document_from_entity(&entity)?;
            prepared.push((entity, document));
        }

        let mut keys = Vec::with_capacity(prepared.len());
        for (entity, document) in prepared {
            self.store.save(entity.kind(), document)?;
            self.schema.observe(&entity);
            let (key, _) = entity.into_parts();
            keys.push(key);
        }
        debug!(count = keys.len(), "put entities");
        Ok(keys)
    }

    /// Fetch entities by key; absent entities are `None`
    ///
    /// # Errors
    ///
    /// Returns `MalformedKey` for keys that cannot be encoded and store or
    /// decoding errors.
    pub fn get(&self, keys: &[Key]) -> Result<Vec<Option<Entity>>> {
        keys.iter()
            .map(|key| {
                let id = encode_key(key)?;
                self.store
                    .find_by_id(key.kind(), &id)?
                    .map(|doc| entity_from_document(&doc))
                    .transpose()
            })
            .collect()
    }

    /// Delete entities by key; absent entities are ignored
    ///
    /// # Errors
    ///
    /// Returns `MalformedKey` for keys that cannot be encoded and store
    /// errors.
    pub fn delete(&self, keys: &[Key]) -> Result<()> {
        let ids = keys
            .iter()
            .map(|key| -> Result<(&str, String)> { Ok((key.kind(), encode_key(key)?)) })
            .collect::<Result<Vec<_>>>()?;
        for (kind, id) in ids {
            self.store.remove(kind, &id)?;
        }
        debug!(count = keys.len(), "deleted entities");
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Start a query and register its cursor
    ///
    /// An empty kind, or a query that can never match, yields the closed
    /// cursor `0` without error.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for queries over the configured ceilings or that
    /// do not translate, and `NeedIndex` when index enforcement is on and
    /// the composite index is missing.
    pub fn run_query(&self, query: &QueryDescriptor) -> Result<QueryResult> {
        self.limits.validate(query)?;
        self.history.record(query)?;

        let sample = match self.store.find_one(&query.kind)? {
            Some(document) => document,
            None => {
                debug!(kind = %query.kind, "query on empty kind");
                return Ok(QueryResult::empty());
            }
        };
        let types = self
            .schema
            .types_or_seed(&query.kind, || entity_from_document(&sample))?;

        let find = match translate(query, &types)? {
            Translated::Native(find) => find,
            Translated::Empty(reason) => {
                debug!(kind = %query.kind, %reason, "query can never match");
                return Ok(QueryResult::empty());
            }
        };

        if self.config.require_indexes {
            if let Some(req) = required_index(query) {
                if !exists(self.store.as_ref(), &req.kind, req.ancestor, &req.properties)? {
                    return Err(Error::need_index(format!(
                        "no composite index {} for {}",
                        index_name(req.ancestor, &req.properties),
                        req
                    )));
                }
            }
        }

        let cursor = self.store.find(&query.kind, find)?;
        let handle = self.cursors.register(cursor, query.limit);
        Ok(QueryResult {
            cursor: handle,
            more_results: true,
        })
    }

    /// Pull up to `count` more entities from a cursor
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for an unknown non-zero cursor.
    pub fn next(&self, cursor: u64, count: usize) -> Result<(Vec<Entity>, bool)> {
        self.cursors.advance(cursor, count)
    }

    /// Count a query's results, bounded by its limit
    ///
    /// # Errors
    ///
    /// Fails like [`Datastore::run_query`].
    pub fn count(&self, query: &QueryDescriptor) -> Result<u64> {
        let result = self.run_query(query)?;
        self.cursors.count_and_close(result.cursor)
    }

    /// Queries run for `app` with their frequencies
    pub fn query_history(&self, app: &str) -> Vec<HistoryEntry> {
        self.history.snapshot(app)
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Transactions are unsupported; always returns handle `0`
    pub fn begin_transaction(&self, app: &str) -> u64 {
        warn!(app, "transactions unsupported, begin ignored");
        0
    }

    /// Transactions are unsupported; does nothing
    pub fn commit(&self, handle: u64) {
        warn!(handle, "transactions unsupported, commit ignored");
    }

    /// Transactions are unsupported; does nothing
    pub fn rollback(&self, handle: u64) {
        warn!(handle, "transactions unsupported, rollback ignored");
    }

    // =========================================================================
    // Composite indexes
    // =========================================================================

    /// Create a composite index and return its id
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` if the definition already has an id or the index
    /// exists.
    pub fn create_index(&self, index: &CompositeIndex) -> Result<u64> {
        if index.id != 0 {
            return Err(Error::bad_request("New index id must be 0."));
        }
        let spec = IndexSpec::from_fields(index_fields(index.ancestor, &index.properties));
        let name = spec.name.clone();
        if !self.store.create_index(&index.kind, spec)? {
            return Err(Error::bad_request("Index already exists."));
        }

        let mut ids = self.index_ids.lock();
        let id = ids.next_id;
        ids.next_id += 1;
        ids.ids.insert((index.kind.clone(), name.clone()), id);
        info!(target: "kindstore::datastore", kind = %index.kind, index = %name, id, "Created index");
        Ok(id)
    }

    /// Every composite index of every kind
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub fn get_indices(&self, app: &str) -> Result<Vec<CompositeIndex>> {
        let mut indexes = Vec::new();
        for kind in self.store.collection_names()? {
            for spec in self.store.list_indexes(&kind)? {
                if let Some(mut def) = definition_from_spec(app, &kind, &spec) {
                    def.id = self
                        .index_ids
                        .lock()
                        .ids
                        .get(&(kind.clone(), spec.name.clone()))
                        .copied()
                        .unwrap_or(0);
                    indexes.push(def);
                }
            }
        }
        Ok(indexes)
    }

    /// Accept a state change for an existing index
    ///
    /// The native catalog has no index states, so only existence is checked.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` if the index does not exist.
    pub fn update_index(&self, index: &CompositeIndex) -> Result<()> {
        if !exists(self.store.as_ref(), &index.kind, index.ancestor, &index.properties)? {
            return Err(Error::bad_request("Index doesn't exist."));
        }
        Ok(())
    }

    /// Drop a composite index
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` if the index does not exist.
    pub fn delete_index(&self, index: &CompositeIndex) -> Result<()> {
        let name = index_name(index.ancestor, &index.properties);
        if !self.store.drop_index(&index.kind, &name)? {
            return Err(Error::bad_request("Index doesn't exist."));
        }
        self.index_ids
            .lock()
            .ids
            .remove(&(index.kind.clone(), name.clone()));
        info!(target: "kindstore::datastore", kind = %index.kind, index = %name, "Dropped index");
        Ok(())
    }
}
