//! Command enum defining all datastore operations.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON by any transport
//! - **Pure data**: No closures or executable code

use serde::{Deserialize, Serialize};

use kindstore_core::{CompositeIndex, Entity, Key, QueryDescriptor};

/// A command is a self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Entity | 3 | Put, get and delete entities |
/// | Query | 4 | Run, page and count queries; query history |
/// | Transaction | 3 | Accepted and ignored |
/// | Index | 4 | Composite index management |
///
/// # App field
///
/// Commands scoped to an application have an optional `app` field. When
/// omitted the executor uses the configured `app_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Entity (3) ====================
    /// Store entities, allocating ids for incomplete keys.
    /// Returns: `Output::Keys`
    Put { entities: Vec<Entity> },

    /// Fetch entities by key.
    /// Returns: `Output::Entities`
    Get { keys: Vec<Key> },

    /// Delete entities by key.
    /// Returns: `Output::Unit`
    Delete { keys: Vec<Key> },

    // ==================== Query (4) ====================
    /// Start a query.
    /// Returns: `Output::QueryResult`
    RunQuery { query: QueryDescriptor },

    /// Pull more results from a cursor.
    /// Returns: `Output::Batch`
    Next { cursor: u64, count: u64 },

    /// Count a query's results.
    /// Returns: `Output::Uint`
    Count { query: QueryDescriptor },

    /// Queries served for an app, with frequencies.
    /// Returns: `Output::History`
    QueryHistory {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        app: Option<String>,
    },

    // ==================== Transaction (3) ====================
    /// Begin a transaction (unsupported, returns handle 0).
    /// Returns: `Output::Transaction`
    BeginTransaction {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        app: Option<String>,
    },

    /// Commit a transaction (no-op).
    /// Returns: `Output::Unit`
    Commit { handle: u64 },

    /// Roll back a transaction (no-op).
    /// Returns: `Output::Unit`
    Rollback { handle: u64 },

    // ==================== Index (4) ====================
    /// Create a composite index.
    /// Returns: `Output::Uint` (the new index id)
    CreateIndex { index: CompositeIndex },

    /// List composite indexes.
    /// Returns: `Output::Indexes`
    GetIndices {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        app: Option<String>,
    },

    /// Update a composite index's state.
    /// Returns: `Output::Unit`
    UpdateIndex { index: CompositeIndex },

    /// Drop a composite index.
    /// Returns: `Output::Unit`
    DeleteIndex { index: CompositeIndex },
}

impl Command {
    /// Variant name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Put { .. } => "Put",
            Command::Get { .. } => "Get",
            Command::Delete { .. } => "Delete",
            Command::RunQuery { .. } => "RunQuery",
            Command::Next { .. } => "Next",
            Command::Count { .. } => "Count",
            Command::QueryHistory { .. } => "QueryHistory",
            Command::BeginTransaction { .. } => "BeginTransaction",
            Command::Commit { .. } => "Commit",
            Command::Rollback { .. } => "Rollback",
            Command::CreateIndex { .. } => "CreateIndex",
            Command::GetIndices { .. } => "GetIndices",
            Command::UpdateIndex { .. } => "UpdateIndex",
            Command::DeleteIndex { .. } => "DeleteIndex",
        }
    }
}
