//! Ancestor-scoped queries.

use kindstore::{Entity, FilterOperator, Identifier, Key};

use crate::common::*;

fn seed_family(ds: &kindstore::Datastore) {
    let alice = Key::named("Person", "alice");
    let alicia = Key::named("Person", "alice2");
    let fluffy = alice.child("Pet", Identifier::Name("fluffy".into()));
    ds.put(vec![
        Entity::new(alice.clone()),
        Entity::new(fluffy.clone()).with_property("type", "cat"),
        Entity::new(alice.child("Pet", Identifier::Name("rex".into()))).with_property("type", "dog"),
        Entity::new(fluffy.child("Toy", Identifier::Name("ball".into()))),
        Entity::new(alicia.child("Pet", Identifier::Name("spot".into()))).with_property("type", "cat"),
        Entity::new(Key::named("Pet", "stray")).with_property("type", "cat"),
    ])
    .unwrap();
}

#[test]
fn ancestor_scopes_direct_children() {
    let ds = datastore();
    seed_family(&ds);
    let mut found = names(&ds, &query("Pet").ancestor(Key::named("Person", "alice")));
    found.sort();
    assert_eq!(found, vec!["fluffy", "rex"]);
}

#[test]
fn ancestor_scopes_any_depth() {
    let ds = datastore();
    seed_family(&ds);
    let found = keys(&ds, &query("Toy").ancestor(Key::named("Person", "alice")));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), Some("ball"));
}

#[test]
fn ancestor_excludes_sibling_with_extended_name() {
    let ds = datastore();
    seed_family(&ds);
    let found = names(&ds, &query("Pet").ancestor(Key::named("Person", "alice")));
    assert!(!found.contains(&"spot".to_string()));
    let found = names(&ds, &query("Pet").ancestor(Key::named("Person", "alice2")));
    assert_eq!(found, vec!["spot"]);
}

#[test]
fn ancestor_includes_the_entity_itself() {
    let ds = datastore();
    seed_family(&ds);
    let fluffy = Key::named("Person", "alice").child("Pet", Identifier::Name("fluffy".into()));
    assert_eq!(keys(&ds, &query("Pet").ancestor(fluffy.clone())), vec![fluffy]);
}

#[test]
fn ancestor_combines_with_filters() {
    let ds = datastore();
    seed_family(&ds);
    let q = query("Pet")
        .ancestor(Key::named("Person", "alice"))
        .filter("type", FilterOperator::Equal, "cat");
    assert_eq!(names(&ds, &q), vec!["fluffy"]);
}
