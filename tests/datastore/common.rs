//! Shared helpers for the datastore integration tests.

#![allow(dead_code)]

use kindstore::{AdapterConfig, Datastore, Entity, Key, QueryDescriptor};

pub const APP: &str = "default";

/// Fresh datastore with default settings
pub fn datastore() -> Datastore {
    Datastore::in_memory(AdapterConfig::default())
}

/// Fresh datastore that rejects queries lacking a composite index
pub fn strict_datastore() -> Datastore {
    Datastore::in_memory(AdapterConfig {
        require_indexes: true,
        ..AdapterConfig::default()
    })
}

pub fn query(kind: &str) -> QueryDescriptor {
    QueryDescriptor::new(APP, kind)
}

/// Run a query and drain its cursor in one pull
pub fn fetch_all(ds: &Datastore, query: &QueryDescriptor) -> Vec<Entity> {
    let result = ds.run_query(query).unwrap();
    let (entities, _) = ds.next(result.cursor, 1000).unwrap();
    entities
}

/// Keys of the entities a query yields, in order
pub fn keys(ds: &Datastore, query: &QueryDescriptor) -> Vec<Key> {
    fetch_all(ds, query)
        .into_iter()
        .map(|entity| entity.key().clone())
        .collect()
}

/// Names of the entities a query yields, in order
pub fn names(ds: &Datastore, query: &QueryDescriptor) -> Vec<String> {
    keys(ds, query)
        .iter()
        .map(|key| key.name().unwrap_or_default().to_string())
        .collect()
}

pub fn pet(name: &str, kind_of: &str, weight: i64) -> Entity {
    Entity::new(Key::named("Pet", name))
        .with_property("type", kind_of)
        .with_property("weight", weight)
}

/// rex (dog, 30), tom (cat, 5), kit (cat, 3), bob (dog, 12)
pub fn seed_pets(ds: &Datastore) {
    ds.put(vec![
        pet("rex", "dog", 30),
        pet("tom", "cat", 5),
        pet("kit", "cat", 3),
        pet("bob", "dog", 12),
    ])
    .unwrap();
}
