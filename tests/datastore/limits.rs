//! Query ceilings, counts and history.

use kindstore::{AdapterConfig, Datastore, Direction, ErrorCategory, FilterOperator, QueryHint};

use crate::common::*;

#[test]
fn offset_over_ceiling_is_bad_request() {
    let ds = datastore();
    seed_pets(&ds);
    assert!(ds.run_query(&query("Pet").offset(1000)).is_ok());
    let err = ds.run_query(&query("Pet").offset(1001)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::BadRequest);
}

#[test]
fn too_many_components_is_bad_request() {
    let ds = datastore();
    seed_pets(&ds);
    let mut q = query("Pet");
    for _ in 0..100 {
        q = q.filter("type", FilterOperator::Equal, "cat");
    }
    assert!(ds.run_query(&q).is_ok());
    let q = q.order("weight", Direction::Ascending);
    let err = ds.run_query(&q).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::BadRequest);
}

#[test]
fn ceilings_follow_configuration() {
    let ds = Datastore::in_memory(AdapterConfig {
        max_query_offset: 10,
        ..AdapterConfig::default()
    });
    seed_pets(&ds);
    assert!(ds.run_query(&query("Pet").offset(11)).is_err());
}

#[test]
fn count_is_bounded_by_limit() {
    let ds = datastore();
    seed_pets(&ds);
    assert_eq!(ds.count(&query("Pet")).unwrap(), 4);
    assert_eq!(ds.count(&query("Pet").limit(2)).unwrap(), 2);
    assert_eq!(
        ds.count(&query("Pet").filter("type", FilterOperator::Equal, "cat"))
            .unwrap(),
        2
    );
}

#[test]
fn count_closes_its_cursor() {
    let ds = datastore();
    seed_pets(&ds);
    ds.count(&query("Pet")).unwrap();
    assert!(ds.cursors().is_empty());
}

#[test]
fn history_counts_queries_ignoring_hints() {
    let ds = datastore();
    seed_pets(&ds);
    let q = query("Pet").filter("type", FilterOperator::Equal, "cat");
    ds.run_query(&q).unwrap();
    ds.run_query(&q.clone().hint(QueryHint::FilterFirst)).unwrap();
    ds.run_query(&query("Pet")).unwrap();

    let history = ds.query_history(APP);
    assert_eq!(history.len(), 2);
    let entry = history.iter().find(|e| e.query == q).unwrap();
    assert_eq!(entry.count, 2);
    assert!(ds.query_history("elsewhere").is_empty());
}

#[test]
fn rejected_queries_are_not_recorded() {
    let ds = datastore();
    seed_pets(&ds);
    let _ = ds.run_query(&query("Pet").offset(5000));
    assert!(ds.query_history(APP).is_empty());
}
