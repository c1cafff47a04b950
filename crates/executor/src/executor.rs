//! The Executor - single entry point to the datastore.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! datastore and converts results to outputs.

use std::sync::Arc;

use tracing::debug;

use kindstore_engine::{AdapterConfig, Datastore};

use crate::handlers;
use crate::{Command, Output, Result};

/// The command executor.
///
/// The Executor is **stateless**: it holds a reference to the datastore but
/// maintains no state of its own. Cursors, schema and history live in the
/// datastore.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Executor {
    datastore: Arc<Datastore>,
}

impl Executor {
    /// Create a new executor wrapping a datastore.
    pub fn new(datastore: Arc<Datastore>) -> Self {
        Self { datastore }
    }

    /// Executor over a fresh in-memory datastore.
    pub fn in_memory(config: AdapterConfig) -> Self {
        Self::new(Arc::new(Datastore::in_memory(config)))
    }

    /// The wrapped datastore.
    pub fn datastore(&self) -> &Arc<Datastore> {
        &self.datastore
    }

    fn app<'a>(&'a self, app: &'a Option<String>) -> &'a str {
        app.as_deref().unwrap_or(&self.datastore.config().app_id)
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        debug!(command = cmd.name(), "execute");
        let ds = self.datastore.as_ref();
        match cmd {
            Command::Put { entities } => handlers::entity::put(ds, entities),
            Command::Get { keys } => handlers::entity::get(ds, keys),
            Command::Delete { keys } => handlers::entity::delete(ds, keys),

            Command::RunQuery { query } => handlers::query::run_query(ds, query),
            Command::Next { cursor, count } => handlers::query::next(ds, cursor, count),
            Command::Count { query } => handlers::query::count(ds, query),
            Command::QueryHistory { app } => handlers::query::query_history(ds, self.app(&app)),

            Command::BeginTransaction { app } => handlers::transaction::begin(ds, self.app(&app)),
            Command::Commit { handle } => handlers::transaction::commit(ds, handle),
            Command::Rollback { handle } => handlers::transaction::rollback(ds, handle),

            Command::CreateIndex { index } => handlers::index::create(ds, index),
            Command::GetIndices { app } => handlers::index::list(ds, self.app(&app)),
            Command::UpdateIndex { index } => handlers::index::update(ds, index),
            Command::DeleteIndex { index } => handlers::index::delete(ds, index),
        }
    }

    /// Execute commands in order, collecting every result.
    ///
    /// A failing command does not stop the ones after it.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }
}
