//! SnapshotCursor: point-in-time result cursor
//!
//! The store materializes the filtered, sorted and paged result set while it
//! holds the read lock, then hands it to a cursor. Writes made afterwards are
//! not visible through the cursor.

use std::collections::VecDeque;

use kindstore_core::{Document, DocumentCursor, Result};

/// Cursor over a materialized result set
#[derive(Debug, Clone, Default)]
pub struct SnapshotCursor {
    remaining: VecDeque<Document>,
    total: u64,
}

impl SnapshotCursor {
    /// Wrap an already paged result set
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            total: documents.len() as u64,
            remaining: documents.into(),
        }
    }

    /// Documents not yet pulled
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

impl DocumentCursor for SnapshotCursor {
    fn next_document(&mut self) -> Result<Option<Document>> {
        Ok(self.remaining.pop_front())
    }

    fn count(&self) -> Result<u64> {
        Ok(self.total)
    }
}
