//! Composite index management and enforcement.

use kindstore::{CompositeIndex, Direction, ErrorCategory, FilterOperator, OrderClause};

use crate::common::*;

fn index(ancestor: bool, properties: &[(&str, Direction)]) -> CompositeIndex {
    CompositeIndex {
        id: 0,
        app: APP.to_string(),
        kind: "Pet".to_string(),
        ancestor,
        properties: properties
            .iter()
            .map(|(name, dir)| OrderClause::new(*name, *dir))
            .collect(),
    }
}

#[test]
fn enforcement_reports_missing_index() {
    let ds = strict_datastore();
    seed_pets(&ds);
    let q = query("Pet")
        .filter("type", FilterOperator::Equal, "cat")
        .order("weight", Direction::Descending);
    let err = ds.run_query(&q).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::NeedIndex);

    ds.create_index(&index(
        false,
        &[("type", Direction::Ascending), ("weight", Direction::Descending)],
    ))
    .unwrap();
    assert_eq!(names(&ds, &q), vec!["tom", "kit"]);
}

#[test]
fn single_property_queries_need_no_index() {
    let ds = strict_datastore();
    seed_pets(&ds);
    let q = query("Pet")
        .filter("weight", FilterOperator::GreaterThan, 4i64)
        .order("weight", Direction::Ascending);
    assert_eq!(names(&ds, &q), vec!["tom", "bob", "rex"]);
}

#[test]
fn enforcement_is_off_by_default() {
    let ds = datastore();
    seed_pets(&ds);
    let q = query("Pet")
        .filter("type", FilterOperator::Equal, "dog")
        .order("weight", Direction::Descending);
    assert_eq!(names(&ds, &q), vec!["rex", "bob"]);
}

#[test]
fn ancestor_index_round_trips_through_listing() {
    let ds = datastore();
    seed_pets(&ds);
    let def = index(true, &[("weight", Direction::Descending)]);
    let id = ds.create_index(&def).unwrap();
    assert!(id > 0);

    let listed = ds.get_indices(APP).unwrap();
    assert_eq!(listed, vec![CompositeIndex { id, ..def }]);
}

#[test]
fn index_ids_are_distinct() {
    let ds = datastore();
    seed_pets(&ds);
    let a = ds.create_index(&index(false, &[("type", Direction::Ascending), ("weight", Direction::Ascending)])).unwrap();
    let b = ds.create_index(&index(false, &[("weight", Direction::Descending), ("type", Direction::Ascending)])).unwrap();
    assert_ne!(a, b);
    assert_eq!(ds.get_indices(APP).unwrap().len(), 2);
}

#[test]
fn index_errors() {
    let ds = datastore();
    seed_pets(&ds);
    let def = index(false, &[("type", Direction::Ascending)]);

    let with_id = CompositeIndex { id: 3, ..def.clone() };
    assert_eq!(
        ds.create_index(&with_id).unwrap_err().category(),
        ErrorCategory::BadRequest
    );
    assert!(ds.update_index(&def).is_err());
    assert!(ds.delete_index(&def).is_err());

    ds.create_index(&def).unwrap();
    assert!(ds.create_index(&def).is_err());
    ds.update_index(&def).unwrap();
    ds.delete_index(&def).unwrap();
    assert!(ds.get_indices(APP).unwrap().is_empty());
}

#[test]
fn transactions_are_accepted_and_ignored() {
    let ds = datastore();
    let handle = ds.begin_transaction(APP);
    assert_eq!(handle, 0);
    ds.commit(handle);
    ds.rollback(handle);
}
