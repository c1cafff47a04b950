//! Sort orders across property types.

use chrono::{Duration, TimeZone, Utc};
use kindstore::{Direction, Entity, Key, PropertyValue, KEY_PROPERTY};

use crate::common::*;

#[test]
fn datetime_descending() {
    let ds = datastore();
    let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    ds.put(vec![
        Entity::new(Key::named("Story", "B")).with_property("created", base + Duration::hours(1)),
        Entity::new(Key::named("Story", "A")).with_property("created", base),
        Entity::new(Key::named("Story", "C")).with_property("created", base + Duration::days(2)),
    ])
    .unwrap();

    let q = query("Story").order("created", Direction::Descending);
    assert_eq!(names(&ds, &q), vec!["C", "B", "A"]);
    let q = query("Story").order("created", Direction::Ascending);
    assert_eq!(names(&ds, &q), vec!["A", "B", "C"]);
}

#[test]
fn lists_sort_by_smallest_ascending_and_largest_descending() {
    let ds = datastore();
    let list = |items: &[i64]| -> PropertyValue {
        items.iter().map(|i| PropertyValue::Int(*i)).collect::<Vec<_>>().into()
    };
    ds.put(vec![
        Entity::new(Key::named("Date", "birthday")).with_property("parts", list(&[5, 5, 1986])),
        Entity::new(Key::named("Date", "other")).with_property("parts", list(&[100, 19])),
    ])
    .unwrap();

    let asc = query("Date").order("parts", Direction::Ascending);
    assert_eq!(names(&ds, &asc), vec!["birthday", "other"]);
    let desc = query("Date").order("parts", Direction::Descending);
    assert_eq!(names(&ds, &desc), vec!["birthday", "other"]);
}

#[test]
fn numeric_ids_sort_numerically_including_negatives() {
    let ds = datastore();
    let ids = [3i64, -100, i64::MAX, -5, 0, i64::MIN];
    ds.put(ids.iter().map(|id| Entity::new(Key::with_id("N", *id))).collect())
        .unwrap();

    let found: Vec<i64> = keys(&ds, &query("N").order(KEY_PROPERTY, Direction::Ascending))
        .iter()
        .map(|key| key.id().unwrap())
        .collect();
    assert_eq!(found, vec![i64::MIN, -100, -5, 0, 3, i64::MAX]);
}

#[test]
fn multiple_orders_break_ties() {
    let ds = datastore();
    seed_pets(&ds);
    let q = query("Pet")
        .order("type", Direction::Ascending)
        .order("weight", Direction::Descending);
    assert_eq!(names(&ds, &q), vec!["tom", "kit", "rex", "bob"]);
}

#[test]
fn order_on_unknown_property_yields_nothing() {
    let ds = datastore();
    seed_pets(&ds);
    let result = ds
        .run_query(&query("Pet").order("color", Direction::Ascending))
        .unwrap();
    assert_eq!(result.cursor, 0);
    assert!(!result.more_results);
}

#[test]
fn order_on_text_yields_nothing() {
    let ds = datastore();
    ds.put(vec![Entity::new(Key::named("Note", "a"))
        .with_property("body", PropertyValue::Text("long".into()))])
        .unwrap();
    let result = ds
        .run_query(&query("Note").order("body", Direction::Ascending))
        .unwrap();
    assert_eq!(result.cursor, 0);
}

#[test]
fn offset_and_limit_page_through_sorted_results() {
    let ds = datastore();
    seed_pets(&ds);
    let q = query("Pet")
        .order("weight", Direction::Ascending)
        .offset(1)
        .limit(2);
    assert_eq!(names(&ds, &q), vec!["tom", "bob"]);
}

#[test]
fn cursor_pages_until_exhausted() {
    let ds = datastore();
    seed_pets(&ds);
    ds.delete(&[Key::named("Pet", "bob")]).unwrap();

    let result = ds
        .run_query(&query("Pet").order("weight", Direction::Ascending))
        .unwrap();
    assert!(result.cursor > 0);
    assert!(result.more_results);

    let (first, more) = ds.next(result.cursor, 2).unwrap();
    assert_eq!(first.len(), 2);
    assert!(more);
    let (second, more) = ds.next(result.cursor, 2).unwrap();
    assert_eq!(second.len(), 1);
    assert!(!more);
    let (third, more) = ds.next(result.cursor, 2).unwrap();
    assert!(third.is_empty());
    assert!(!more);
}

#[test]
fn empty_kind_gives_closed_cursor() {
    let ds = datastore();
    let result = ds.run_query(&query("Nothing")).unwrap();
    assert_eq!(result.cursor, 0);
    assert!(!result.more_results);
    assert_eq!(ds.next(0, 5).unwrap(), (vec![], false));
    assert_eq!(ds.count(&query("Nothing")).unwrap(), 0);
}
