//! Cursor registry
//!
//! Live native cursors are kept behind opaque positive handles so a result
//! set can be drained over several requests. Handle `0` is the closed,
//! empty cursor and never touches the table.
//!
//! Locking: the table mutex is held only to allocate, insert, look up or
//! remove an entry. Each cursor has its own mutex, held while documents are
//! pulled, so a slow read never blocks other handles.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use kindstore_core::{DocumentCursor, Entity, Error, Result};

use crate::codec::entity_from_document;

struct RegisteredCursor {
    cursor: Box<dyn DocumentCursor>,
    limit: Option<u64>,
}

struct RegistryState {
    next_handle: u64,
    cursors: HashMap<u64, Arc<Mutex<RegisteredCursor>>>,
}

/// Table of live cursors
pub struct CursorRegistry {
    state: Mutex<RegistryState>,
}

impl Default for CursorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CursorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorRegistry")
            .field("live", &self.len())
            .finish()
    }
}

impl CursorRegistry {
    /// Create an empty registry; the first handle is `1`
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                next_handle: 1,
                cursors: HashMap::new(),
            }),
        }
    }

    /// Store a cursor and return its handle
    ///
    /// `limit` is the query's own limit, used to bound `count_and_close`.
    pub fn register(&self, cursor: Box<dyn DocumentCursor>, limit: Option<u64>) -> u64 {
        let mut state = self.state.lock();
        let handle = state.next_handle;
        state.next_handle += 1;
        state
            .cursors
            .insert(handle, Arc::new(Mutex::new(RegisteredCursor { cursor, limit })));
        debug!(handle, "registered cursor");
        handle
    }

    fn lookup(&self, handle: u64) -> Result<Arc<Mutex<RegisteredCursor>>> {
        self.state
            .lock()
            .cursors
            .get(&handle)
            .cloned()
            .ok_or_else(|| Error::bad_request(format!("Cursor {} not found", handle)))
    }

    /// Pull up to `count` entities from a cursor
    ///
    /// Returns the entities and whether more may follow. An exhausted cursor
    /// stays registered and keeps returning nothing.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for an unknown non-zero handle, and decoding or
    /// store errors from the pulled documents.
    pub fn advance(&self, handle: u64, count: usize) -> Result<(Vec<Entity>, bool)> {
        if handle == 0 {
            return Ok((Vec::new(), false));
        }
        let entry = self.lookup(handle)?;
        let mut entry = entry.lock();

        let mut entities = Vec::with_capacity(count.min(64));
        while entities.len() < count {
            match entry.cursor.next_document()? {
                Some(document) => entities.push(entity_from_document(&document)?),
                None => break,
            }
        }
        let more = entities.len() == count;
        debug!(handle, pulled = entities.len(), more, "advanced cursor");
        Ok((entities, more))
    }

    /// Count a cursor's results and remove it
    ///
    /// The count is bounded by the query limit.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for an unknown non-zero handle, and store errors
    /// from counting.
    pub fn count_and_close(&self, handle: u64) -> Result<u64> {
        if handle == 0 {
            return Ok(0);
        }
        let entry = self
            .state
            .lock()
            .cursors
            .remove(&handle)
            .ok_or_else(|| Error::bad_request(format!("Cursor {} not found", handle)))?;
        let entry = entry.lock();
        let total = entry.cursor.count()?;
        Ok(entry.limit.map_or(total, |limit| total.min(limit)))
    }

    /// Remove a cursor without counting; returns whether it existed
    pub fn close(&self, handle: u64) -> bool {
        self.state.lock().cursors.remove(&handle).is_some()
    }

    /// Number of live cursors
    pub fn len(&self) -> usize {
        self.state.lock().cursors.len()
    }

    /// Check whether no cursor is live
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
