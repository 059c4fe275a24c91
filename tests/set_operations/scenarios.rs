//! Canonical before/after scenarios, one per policy and edge.

use crate::common::*;

#[test]
fn add_to_existing_value() {
    let storage = storage_with(vec![("A", Value::Int(10))]);
    let reply = storage
        .set(&SetCommand::new("A", vec![op("add", 12)]))
        .unwrap();
    assert_eq!(reply.key, "A");
    assert_eq!(reply.value, Value::Int(22));
    assert_eq!(reply.original_value, Value::Int(10));
    assert_eq!(stored(&storage, "A"), Some(Value::Int(22)));
}

#[test]
fn absent_key_starts_from_default() {
    let storage = storage_with(vec![]);
    let reply = storage
        .set(&SetCommand::new("B", vec![op("add", 6)]).with_default(35))
        .unwrap();
    assert_eq!(reply.value, Value::Int(41));
    assert_eq!(reply.original_value, Value::Int(35));
    assert_eq!(stored(&storage, "B"), Some(Value::Int(41)));
}

#[test]
fn default_operation_on_absent_key() {
    let storage = storage_with(vec![]);
    let reply = storage
        .set(&SetCommand::new("C", vec![op("default", Value::Null)]).with_default("Hello"))
        .unwrap();
    assert_eq!(reply.value, Value::from("Hello"));
    assert_eq!(reply.original_value, Value::from("Hello"));
    assert_eq!(stored(&storage, "C"), Some(Value::from("Hello")));
}

#[test]
fn default_operation_on_existing_key_is_noop() {
    let storage = storage_with(vec![("D", Value::from("Existing"))]);
    let reply = storage
        .set(&SetCommand::new("D", vec![op("default", "Ignored")]).with_default("New"))
        .unwrap();
    assert_eq!(reply.value, Value::from("Existing"));
    assert_eq!(reply.original_value, Value::from("Existing"));
}

#[test]
fn set_default_policy_replaces_with_default() {
    let storage = storage_with(vec![("E", Value::empty_object())]);
    let reply = storage
        .set(
            &SetCommand::new("E", vec![op("pop", "missing")])
                .with_default("Something")
                .with_on_error(OnError::SetDefault),
        )
        .unwrap();
    assert_eq!(reply.value, Value::from("Something"));
    assert_eq!(reply.original_value, Value::empty_object());
    assert_eq!(stored(&storage, "E"), Some(Value::from("Something")));
}

#[test]
fn undo_policy_restores_snapshot() {
    let storage = storage_with(vec![("F", Value::Int(10))]);
    let reply = storage
        .set(
            &SetCommand::new("F", vec![op("add", 9), op("pop", "not_a_dict")])
                .with_on_error(OnError::Undo),
        )
        .unwrap();
    assert_eq!(reply.value, Value::Int(10));
    assert_eq!(reply.original_value, Value::Int(10));
    assert_eq!(stored(&storage, "F"), Some(Value::Int(10)));
}

#[test]
fn abort_policy_keeps_successful_prefix() {
    let storage = storage_with(vec![("G", Value::Int(10))]);
    let reply = storage
        .set(
            &SetCommand::new(
                "G",
                vec![op("add", 9), op("pop", "not_a_dict"), op("add", 10)],
            )
            .with_on_error(OnError::Abort),
        )
        .unwrap();
    assert_eq!(reply.value, Value::Int(19));
    assert_eq!(reply.original_value, Value::Int(10));
}

#[test]
fn ignore_policy_skips_failures() {
    let storage = storage_with(vec![("H", Value::Int(10))]);
    let reply = storage
        .set(
            &SetCommand::new(
                "H",
                vec![op("add", 9), op("pop", "not_a_dict"), op("add", 10)],
            )
            .with_on_error(OnError::Ignore),
        )
        .unwrap();
    assert_eq!(reply.value, Value::Int(29));
    assert_eq!(reply.original_value, Value::Int(10));
}

#[test]
fn raise_policy_propagates_and_leaves_store() {
    let storage = storage_with(vec![("I", Value::empty_object())]);
    let err = storage
        .set(&SetCommand::new("I", vec![op("pop", "non_existing_key")]))
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Operation(OperationError::key_not_found("pop", "non_existing_key"))
    );
    assert_eq!(stored(&storage, "I"), Some(Value::empty_object()));
}

#[test]
fn missing_value_ignores_policy() {
    let storage = storage_with(vec![]);
    for policy in [OnError::Ignore, OnError::Undo, OnError::Abort] {
        let err = storage
            .set(&SetCommand::new("J", vec![op("add", 1)]).with_on_error(policy))
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingValue { .. }));
    }
    assert_eq!(stored(&storage, "J"), None);
}

#[test]
fn set_default_without_default_is_configuration_error() {
    let storage = storage_with(vec![("K", Value::Int(1))]);
    let err = storage
        .set(
            &SetCommand::new("K", vec![op("pop", "x")]).with_on_error(OnError::SetDefault),
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::Configuration { .. }));
    assert_eq!(stored(&storage, "K"), Some(Value::Int(1)));
}

#[test]
fn undo_after_default_reports_default_result() {
    // The `default` step moves the snapshot, so undo lands on its result
    let storage = storage_with(vec![]);
    let reply = storage
        .set(
            &SetCommand::new(
                "L",
                vec![op("add", 5), op("default", Value::Null), op("add", 1), op("pop", "x")],
            )
            .with_default(100)
            .with_on_error(OnError::Undo),
        )
        .unwrap();
    assert_eq!(reply.value, Value::Int(100));
    assert_eq!(reply.original_value, Value::Int(100));
}

#[test]
fn mixed_operations_on_a_profile() {
    let profile = Value::from(serde_json::json!({"name": "Hero", "gold": 10, "tags": ["new"]}));
    let storage = storage_with(vec![("profile", profile)]);
    let reply = storage
        .set(&SetCommand::new(
            "profile",
            vec![
                op("update", serde_json::json!({"gold": 50, "level": 2})),
                op("pop", "tags"),
            ],
        ))
        .unwrap();
    assert_eq!(
        reply.value,
        Value::from(serde_json::json!({"name": "Hero", "gold": 50, "level": 2}))
    );
}

#[test]
fn get_returns_null_for_absent_keys() {
    let storage = storage_with(vec![("A", Value::Int(1))]);
    let values = storage.get(&["A", "Z"]).unwrap();
    assert_eq!(values["A"], Value::Int(1));
    assert_eq!(values["Z"], Value::Null);
}

#[test]
fn integer_boundaries_are_valid_results() {
    let storage = storage_with(vec![("m", Value::Int(i64::MIN)), ("s", Value::Int(-1))]);

    let reply = storage
        .set(&SetCommand::new("m", vec![op("mod", -1), op("add", 1)]).with_on_error(OnError::Ignore))
        .unwrap();
    assert_eq!(reply.value, Value::Int(1));

    let reply = storage
        .set(&SetCommand::new("s", vec![op("left_shift", 63)]))
        .unwrap();
    assert_eq!(reply.value, Value::Int(i64::MIN));
}

#[test]
fn empty_key_is_an_ordinary_key() {
    let storage = storage_with(vec![]);
    let reply = storage
        .set(&SetCommand::new("", vec![op("add", 1)]).with_default(0))
        .unwrap();
    assert_eq!(reply.value, Value::Int(1));
    assert_eq!(stored(&storage, ""), Some(Value::Int(1)));
}
