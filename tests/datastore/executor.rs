//! End-to-end through the command surface.

use kindstore::{
    AdapterConfig, Command, Direction, Entity, Error, Executor, FilterOperator, Key, Output, PropertyValue,
    QueryDescriptor,
};

#[test]
fn json_commands_drive_the_datastore() {
    let executor = Executor::in_memory(AdapterConfig::default());

    let put = Command::Put {
        entities: vec![
            Entity::new(Key::incomplete("Pet")).with_property("type", "cat").with_property("weight", 4i64),
            Entity::new(Key::incomplete("Pet")).with_property("type", "cat").with_property("weight", 9i64),
            Entity::new(Key::incomplete("Pet")).with_property("type", "dog").with_property("weight", 20i64),
        ],
    };
    let wire = serde_json::to_string(&put).unwrap();
    let keys = match executor.execute(serde_json::from_str(&wire).unwrap()).unwrap() {
        Output::Keys(keys) => keys,
        other => panic!("Expected Keys, got {:?}", other),
    };
    assert_eq!(keys.len(), 3);

    let query = QueryDescriptor::new("default", "Pet")
        .filter("type", FilterOperator::Equal, "cat")
        .order("weight", Direction::Descending);
    let cursor = match executor.execute(Command::RunQuery { query: query.clone() }).unwrap() {
        Output::QueryResult(result) => result.cursor,
        other => panic!("Expected QueryResult, got {:?}", other),
    };
    match executor.execute(Command::Next { cursor, count: 10 }).unwrap() {
        Output::Batch { entities, more_results } => {
            assert!(!more_results);
            let weights: Vec<_> = entities.iter().map(|e| e.get("weight").cloned()).collect();
            assert_eq!(weights, vec![Some(PropertyValue::Int(9)), Some(PropertyValue::Int(4))]);
        }
        other => panic!("Expected Batch, got {:?}", other),
    }

    assert_eq!(executor.execute(Command::Count { query }).unwrap(), Output::Uint(2));

    executor.execute(Command::Delete { keys: keys.clone() }).unwrap();
    match executor.execute(Command::Get { keys }).unwrap() {
        Output::Entities(found) => assert!(found.iter().all(Option::is_none)),
        other => panic!("Expected Entities, got {:?}", other),
    }
}

#[test]
fn errors_serialize_with_their_category() {
    let executor = Executor::in_memory(AdapterConfig::default());
    let err = executor
        .execute(Command::Next { cursor: 5, count: 1 })
        .unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["BadRequest"]["reason"], "Cursor 5 not found");
    let restored: Error = serde_json::from_value(json).unwrap();
    assert_eq!(restored, err);
}
