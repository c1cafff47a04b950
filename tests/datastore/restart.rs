//! A second datastore opened over data written by an earlier one.

use std::sync::Arc;

use kindstore::{
    AdapterConfig, Datastore, Direction, Entity, FilterOperator, Key, MemoryStore, PropertyValue,
};

use crate::common::*;

fn tag(name: &str, nums: &[i64]) -> Entity {
    Entity::new(Key::named("Tag", name)).with_property(
        "nums",
        nums.iter().map(|n| PropertyValue::Int(*n)).collect::<Vec<_>>(),
    )
}

fn reopened() -> Datastore {
    let store = MemoryStore::new();
    let writer = Datastore::new(Arc::new(store.clone()), AdapterConfig::default());
    writer.put(vec![tag("x", &[9]), tag("y", &[1])]).unwrap();

    let ds = Datastore::new(Arc::new(store), AdapterConfig::default());
    ds.put(vec![Entity::new(Key::named("Tag", "z")).with_property("label", "new")])
        .unwrap();
    ds
}

#[test]
fn stored_list_types_survive_a_write_after_reopen() {
    let ds = reopened();
    let q = query("Tag").filter("nums", FilterOperator::Equal, 9i64);
    assert_eq!(names(&ds, &q), vec!["x"]);
}

#[test]
fn stored_list_orders_survive_a_write_after_reopen() {
    let ds = reopened();
    let q = query("Tag")
        .filter("nums", FilterOperator::GreaterThanOrEqual, 0i64)
        .order("nums", Direction::Ascending);
    assert_eq!(names(&ds, &q), vec!["y", "x"]);
}
