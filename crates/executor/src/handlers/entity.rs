//! Entity command handlers.

use kindstore_core::{Entity, Key};
use kindstore_engine::Datastore;

use crate::{Output, Result};

/// Handle Put command.
pub fn put(ds: &Datastore, entities: Vec<Entity>) -> Result<Output> {
    Ok(Output::Keys(ds.put(entities)?))
}

/// Handle Get command.
pub fn get(ds: &Datastore, keys: Vec<Key>) -> Result<Output> {
    Ok(Output::Entities(ds.get(&keys)?))
}

/// Handle Delete command.
pub fn delete(ds: &Datastore, keys: Vec<Key>) -> Result<Output> {
    ds.delete(&keys)?;
    Ok(Output::Unit)
}
