//! `on_error` policy properties over generated operation lists.
//!
//! Every list mixes `add` steps (always succeed on an integer) with
//! `pop` steps (always fail on an integer), so the expected outcome of each
//! policy can be computed independently of the engine.

use proptest::prelude::*;

use crate::common::*;

#[derive(Debug, Clone)]
enum Step {
    Add(i64),
    Fail,
}

impl Step {
    fn operation(&self) -> Operation {
        match self {
            Step::Add(n) => op("add", *n),
            Step::Fail => op("pop", "missing"),
        }
    }
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (-1000i64..1000).prop_map(Step::Add),
        1 => Just(Step::Fail),
    ]
}

fn arb_steps() -> impl Strategy<Value = Vec<Step>> {
    prop::collection::vec(arb_step(), 1..20)
}

fn operations(steps: &[Step]) -> Vec<Operation> {
    steps.iter().map(Step::operation).collect()
}

fn has_failure(steps: &[Step]) -> bool {
    steps.iter().any(|s| matches!(s, Step::Fail))
}

fn sum_all(steps: &[Step]) -> i64 {
    steps
        .iter()
        .map(|s| match s {
            Step::Add(n) => *n,
            Step::Fail => 0,
        })
        .sum()
}

fn sum_prefix(steps: &[Step]) -> i64 {
    steps
        .iter()
        .take_while(|s| !matches!(s, Step::Fail))
        .map(|s| match s {
            Step::Add(n) => *n,
            Step::Fail => 0,
        })
        .sum()
}

fn run(
    start: i64,
    steps: &[Step],
    policy: OnError,
    default: Option<i64>,
) -> (DataStorage, datastorage::engine::Result<datastorage::SetReply>) {
    let storage = storage_with(vec![("k", Value::Int(start))]);
    let mut cmd = SetCommand::new("k", operations(steps)).with_on_error(policy);
    if let Some(default) = default {
        cmd = cmd.with_default(default);
    }
    let result = storage.set(&cmd);
    (storage, result)
}

proptest! {
    #[test]
    fn undo_restores_snapshot_on_any_failure(start in -1000i64..1000, steps in arb_steps()) {
        let (storage, result) = run(start, &steps, OnError::Undo, None);
        let reply = result.unwrap();
        let expected = if has_failure(&steps) { start } else { start + sum_all(&steps) };
        prop_assert_eq!(&reply.value, &Value::Int(expected));
        prop_assert_eq!(&reply.original_value, &Value::Int(start));
        prop_assert_eq!(stored(&storage, "k"), Some(Value::Int(expected)));
    }

    #[test]
    fn abort_keeps_longest_successful_prefix(start in -1000i64..1000, steps in arb_steps()) {
        let (_, result) = run(start, &steps, OnError::Abort, None);
        let reply = result.unwrap();
        prop_assert_eq!(reply.value, Value::Int(start + sum_prefix(&steps)));
        prop_assert_eq!(reply.original_value, Value::Int(start));
    }

    #[test]
    fn ignore_applies_every_successful_step(start in -1000i64..1000, steps in arb_steps()) {
        let (_, result) = run(start, &steps, OnError::Ignore, None);
        let reply = result.unwrap();
        prop_assert_eq!(reply.value, Value::Int(start + sum_all(&steps)));
        prop_assert_eq!(reply.original_value, Value::Int(start));
    }

    #[test]
    fn set_default_falls_back_on_failure(
        start in -1000i64..1000,
        fallback in -1000i64..1000,
        steps in arb_steps(),
    ) {
        let (_, result) = run(start, &steps, OnError::SetDefault, Some(fallback));
        let reply = result.unwrap();
        let expected = if has_failure(&steps) { fallback } else { start + sum_all(&steps) };
        prop_assert_eq!(reply.value, Value::Int(expected));
        prop_assert_eq!(reply.original_value, Value::Int(start));
    }

    #[test]
    fn raise_fails_without_touching_store(start in -1000i64..1000, steps in arb_steps()) {
        let (storage, result) = run(start, &steps, OnError::Raise, None);
        if has_failure(&steps) {
            let raised_type_mismatch = matches!(
                result,
                Err(EngineError::Operation(OperationError::TypeMismatch { .. }))
            );
            prop_assert!(raised_type_mismatch);
            prop_assert_eq!(stored(&storage, "k"), Some(Value::Int(start)));
        } else {
            prop_assert_eq!(result.unwrap().value, Value::Int(start + sum_all(&steps)));
        }
    }

    #[test]
    fn default_op_is_idempotent_on_existing_key(start in -1000i64..1000, repeats in 1usize..5) {
        let storage = storage_with(vec![("k", Value::Int(start))]);
        let ops = vec![op("default", Value::Null); repeats];
        let reply = storage.set(&SetCommand::new("k", ops).with_default(0)).unwrap();
        prop_assert_eq!(reply.value, Value::Int(start));
        prop_assert_eq!(reply.original_value, Value::Int(start));
    }

    #[test]
    fn absent_key_reports_default_as_original(default in -1000i64..1000, steps in arb_steps()) {
        let adds: Vec<Step> = steps.into_iter().filter(|s| matches!(s, Step::Add(_))).collect();
        prop_assume!(!adds.is_empty());
        let storage = storage_with(vec![]);
        let reply = storage
            .set(&SetCommand::new("fresh", operations(&adds)).with_default(default))
            .unwrap();
        prop_assert_eq!(reply.original_value, Value::Int(default));
        prop_assert_eq!(reply.value, Value::Int(default + sum_all(&adds)));
    }
}
