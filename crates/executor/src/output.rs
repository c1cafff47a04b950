//! Output enum for command execution results.
//!
//! Every command produces exactly one output type; the mapping is listed on
//! each [`Command`](crate::Command) variant.

use serde::{Deserialize, Serialize};

use kindstore_core::{CompositeIndex, Entity, Key, QueryResult};
use kindstore_engine::HistoryEntry;

/// Successful command execution results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value
    Unit,

    /// Unsigned integer result (counts, index ids)
    Uint(u64),

    /// Complete keys of stored entities, in request order
    Keys(Vec<Key>),

    /// Fetched entities, `None` where absent
    Entities(Vec<Option<Entity>>),

    /// Cursor handle of a started query
    QueryResult(QueryResult),

    /// One page pulled from a cursor
    Batch {
        /// Entities in query order
        entities: Vec<Entity>,
        /// Whether the cursor may hold more
        more_results: bool,
    },

    /// Transaction handle (always 0)
    Transaction(u64),

    /// Composite index definitions
    Indexes(Vec<CompositeIndex>),

    /// Query frequency table
    History(Vec<HistoryEntry>),
}
