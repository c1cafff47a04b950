//! Query command handlers.

use kindstore_core::QueryDescriptor;
use kindstore_engine::Datastore;

use crate::{Error, Output, Result};

/// Handle RunQuery command.
pub fn run_query(ds: &Datastore, query: QueryDescriptor) -> Result<Output> {
    Ok(Output::QueryResult(ds.run_query(&query)?))
}

/// Handle Next command.
pub fn next(ds: &Datastore, cursor: u64, count: u64) -> Result<Output> {
    let count = usize::try_from(count).map_err(|_| Error::BadRequest {
        reason: format!("Batch size {} is too large", count),
    })?;
    let (entities, more_results) = ds.next(cursor, count)?;
    Ok(Output::Batch {
        entities,
        more_results,
    })
}

/// Handle Count command.
pub fn count(ds: &Datastore, query: QueryDescriptor) -> Result<Output> {
    Ok(Output::Uint(ds.count(&query)?))
}

/// Handle QueryHistory command.
pub fn query_history(ds: &Datastore, app: &str) -> Result<Output> {
    Ok(Output::History(ds.query_history(app)))
}
