//! Composite index command handlers.

use kindstore_core::CompositeIndex;
use kindstore_engine::Datastore;

use crate::{Output, Result};

/// Handle CreateIndex command.
pub fn create(ds: &Datastore, index: CompositeIndex) -> Result<Output> {
    Ok(Output::Uint(ds.create_index(&index)?))
}

/// Handle GetIndices command.
pub fn list(ds: &Datastore, app: &str) -> Result<Output> {
    Ok(Output::Indexes(ds.get_indices(app)?))
}

/// Handle UpdateIndex command.
pub fn update(ds: &Datastore, index: CompositeIndex) -> Result<Output> {
    ds.update_index(&index)?;
    Ok(Output::Unit)
}

/// Handle DeleteIndex command.
pub fn delete(ds: &Datastore, index: CompositeIndex) -> Result<Output> {
    ds.delete_index(&index)?;
    Ok(Output::Unit)
}
