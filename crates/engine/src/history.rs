//! Query frequency table
//!
//! Every validated query is counted under its canonical form: the
//! descriptor with the planner hint cleared, serialized as JSON. The table
//! lives in memory for the life of the process and only grows.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use kindstore_core::{Error, QueryDescriptor, Result};

/// One distinct query and how often it ran
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The canonical (hint-free) descriptor
    pub query: QueryDescriptor,
    /// Times it was run
    pub count: u64,
}

/// Frequency table of served queries
#[derive(Debug, Default)]
pub struct QueryHistory {
    entries: Mutex<BTreeMap<String, HistoryEntry>>,
}

impl QueryHistory {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one run of `query`
    ///
    /// # Errors
    ///
    /// Returns an internal error if the descriptor cannot be serialized.
    pub fn record(&self, query: &QueryDescriptor) -> Result<()> {
        let canonical = query.without_hint();
        let key = serde_json::to_string(&canonical)
            .map_err(|e| Error::internal(format!("Failed to serialize query: {}", e)))?;
        self.entries
            .lock()
            .entry(key)
            .or_insert_with(|| HistoryEntry {
                query: canonical,
                count: 0,
            })
            .count += 1;
        Ok(())
    }

    /// Every query recorded for `app`, in canonical-key order
    pub fn snapshot(&self, app: &str) -> Vec<HistoryEntry> {
        self.entries
            .lock()
            .values()
            .filter(|e| e.query.app == app)
            .cloned()
            .collect()
    }

    /// Number of distinct queries across all apps
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
