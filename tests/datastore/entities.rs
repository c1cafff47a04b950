//! Put, get and delete.

use chrono::{TimeZone, Utc};
use kindstore::{Entity, ErrorCategory, GeoPt, Identifier, Key, PropertyValue};

use crate::common::*;

#[test]
fn put_allocates_a_nonzero_id_and_round_trips() {
    let ds = datastore();
    let pet = Entity::new(Key::incomplete("Pet"))
        .with_property("name", "Fluffy")
        .with_property("type", "cat")
        .with_property("birthday", Utc.with_ymd_and_hms(2010, 4, 1, 12, 0, 0).unwrap())
        .with_property("weight", 24.5)
        .with_property("home", GeoPt::new(47.6, -122.3))
        .with_property("notes", PropertyValue::Text("likes boxes".into()))
        .with_property("photo", PropertyValue::Blob(vec![0, 1, 2, 255]))
        .with_property("owner", Key::named("Person", "alice"))
        .with_property(
            "toys",
            vec![PropertyValue::from("ball"), PropertyValue::Int(3)],
        );

    let keys = ds.put(vec![pet.clone()]).unwrap();
    assert_eq!(keys.len(), 1);
    let id = keys[0].id().unwrap();
    assert!(id > 0);

    let fetched = ds.get(&keys).unwrap().remove(0).unwrap();
    assert_eq!(fetched.key(), &keys[0]);
    assert_eq!(fetched.properties(), pet.properties());
}

#[test]
fn put_keeps_caller_assigned_names_and_ids() {
    let ds = datastore();
    let keys = ds
        .put(vec![
            Entity::new(Key::named("Pet", "rex")),
            Entity::new(Key::with_id("Pet", -17)),
        ])
        .unwrap();
    assert_eq!(keys, vec![Key::named("Pet", "rex"), Key::with_id("Pet", -17)]);
    assert!(ds.get(&keys).unwrap().iter().all(Option::is_some));
}

#[test]
fn put_overwrites_existing_entity() {
    let ds = datastore();
    ds.put(vec![pet("rex", "dog", 30)]).unwrap();
    ds.put(vec![pet("rex", "dog", 31)]).unwrap();

    let fetched = ds.get(&[Key::named("Pet", "rex")]).unwrap().remove(0).unwrap();
    assert_eq!(fetched.get("weight"), Some(&PropertyValue::Int(31)));
    assert_eq!(ds.count(&query("Pet")).unwrap(), 1);
}

#[test]
fn incomplete_ancestor_is_rejected_before_any_write() {
    let ds = datastore();
    let orphan = Entity::new(Key::incomplete("Person").child("Pet", Identifier::Name("rex".into())));
    let err = ds
        .put(vec![pet("first", "cat", 1), orphan])
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::BadRequest);
    assert!(ds.get(&[Key::named("Pet", "first")]).unwrap()[0].is_none());
}

#[test]
fn get_reports_missing_entities_as_none() {
    let ds = datastore();
    seed_pets(&ds);
    let found = ds
        .get(&[Key::named("Pet", "tom"), Key::named("Pet", "ghost"), Key::with_id("Cat", 1)])
        .unwrap();
    assert!(found[0].is_some());
    assert!(found[1].is_none());
    assert!(found[2].is_none());
}

#[test]
fn delete_removes_entities_and_ignores_missing() {
    let ds = datastore();
    seed_pets(&ds);
    ds.delete(&[Key::named("Pet", "tom"), Key::named("Pet", "ghost")])
        .unwrap();
    assert!(ds.get(&[Key::named("Pet", "tom")]).unwrap()[0].is_none());
    assert_eq!(ds.count(&query("Pet")).unwrap(), 3);
}

#[test]
fn child_entities_keep_their_full_path() {
    let ds = datastore();
    let key = Key::named("Person", "alice")
        .child("Pet", Identifier::Id(7))
        .child("Toy", Identifier::Name("ball".into()));
    ds.put(vec![Entity::new(key.clone()).with_property("color", "red")])
        .unwrap();
    let fetched = ds.get(&[key.clone()]).unwrap().remove(0).unwrap();
    assert_eq!(fetched.key(), &key);
    assert_eq!(fetched.key().path().len(), 3);
}

#[test]
fn datetime_keeps_nanoseconds_through_put_and_get() {
    let ds = datastore();
    let when = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
    let key = Key::named("Story", "precise");
    ds.put(vec![Entity::new(key.clone()).with_property("created", when)])
        .unwrap();

    let fetched = ds.get(&[key]).unwrap().remove(0).unwrap();
    assert_eq!(fetched.get("created"), Some(&PropertyValue::DateTime(when)));
}
