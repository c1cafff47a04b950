//! Transaction command handlers.
//!
//! Transactions are unsupported: every call succeeds and does nothing.

use kindstore_engine::Datastore;

use crate::{Output, Result};

/// Handle BeginTransaction command.
pub fn begin(ds: &Datastore, app: &str) -> Result<Output> {
    Ok(Output::Transaction(ds.begin_transaction(app)))
}

/// Handle Commit command.
pub fn commit(ds: &Datastore, handle: u64) -> Result<Output> {
    ds.commit(handle);
    Ok(Output::Unit)
}

/// Handle Rollback command.
pub fn rollback(ds: &Datastore, handle: u64) -> Result<Output> {
    ds.rollback(handle);
    Ok(Output::Unit)
}
