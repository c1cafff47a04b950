//! Equality and inequality filters.

use kindstore::{Direction, Entity, ErrorCategory, FilterOperator, Key, PropertyValue, KEY_PROPERTY};

use crate::common::*;

#[test]
fn equality_filters_compose() {
    let ds = datastore();
    seed_pets(&ds);
    let q = query("Pet")
        .filter("type", FilterOperator::Equal, "cat")
        .filter("weight", FilterOperator::Equal, 5i64);
    assert_eq!(names(&ds, &q), vec!["tom"]);
}

#[test]
fn repeated_equality_filter_is_idempotent() {
    let ds = datastore();
    seed_pets(&ds);
    let once = query("Pet")
        .filter("type", FilterOperator::Equal, "dog")
        .order("weight", Direction::Ascending);
    let twice = once
        .clone()
        .filter("type", FilterOperator::Equal, "dog");
    assert_eq!(names(&ds, &once), vec!["bob", "rex"]);
    assert_eq!(names(&ds, &twice), names(&ds, &once));
}

#[test]
fn conflicting_equality_filters_match_nothing() {
    let ds = datastore();
    seed_pets(&ds);
    let q = query("Pet")
        .filter("type", FilterOperator::Equal, "dog")
        .filter("type", FilterOperator::Equal, "cat");
    assert!(fetch_all(&ds, &q).is_empty());
}

#[test]
fn inequality_range() {
    let ds = datastore();
    seed_pets(&ds);
    let q = query("Pet")
        .filter("weight", FilterOperator::GreaterThanOrEqual, 5i64)
        .filter("weight", FilterOperator::LessThan, 30i64)
        .order("weight", Direction::Ascending);
    assert_eq!(names(&ds, &q), vec!["tom", "bob"]);
}

#[test]
fn inequality_does_not_cross_value_classes() {
    let ds = datastore();
    seed_pets(&ds);
    ds.put(vec![Entity::new(Key::named("Pet", "odd")).with_property("weight", "heavy")])
        .unwrap();
    let q = query("Pet").filter("weight", FilterOperator::GreaterThan, 0i64);
    assert_eq!(fetch_all(&ds, &q).len(), 4);
}

#[test]
fn equality_on_list_matches_any_element() {
    let ds = datastore();
    ds.put(vec![
        Entity::new(Key::named("Date", "birthday")).with_property(
            "parts",
            vec![PropertyValue::Int(5), PropertyValue::Int(5), PropertyValue::Int(1986)],
        ),
        Entity::new(Key::named("Date", "other"))
            .with_property("parts", vec![PropertyValue::Int(100), PropertyValue::Int(19)]),
    ])
    .unwrap();
    let q = query("Date").filter("parts", FilterOperator::Equal, 1986i64);
    assert_eq!(names(&ds, &q), vec!["birthday"]);
}

#[test]
fn key_filter_selects_by_identifier() {
    let ds = datastore();
    seed_pets(&ds);
    let q = query("Pet")
        .filter(KEY_PROPERTY, FilterOperator::GreaterThan, Key::named("Pet", "kit"))
        .order(KEY_PROPERTY, Direction::Ascending);
    assert_eq!(names(&ds, &q), vec!["rex", "tom"]);
}

#[test]
fn range_filter_on_text_yields_nothing() {
    let ds = datastore();
    ds.put(vec![Entity::new(Key::named("Note", "a"))
        .with_property("body", PropertyValue::Text("abc".into()))])
        .unwrap();
    let q = query("Note").filter("body", FilterOperator::GreaterThan, PropertyValue::Text("a".into()));
    assert_eq!(ds.run_query(&q).unwrap().cursor, 0);
}

#[test]
fn set_membership_is_rejected() {
    let ds = datastore();
    seed_pets(&ds);
    let q = query("Pet").filter("type", FilterOperator::In, "cat");
    assert_eq!(ds.run_query(&q).unwrap_err().category(), ErrorCategory::BadRequest);
}
