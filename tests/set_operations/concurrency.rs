//! Per-key serialization under concurrent `set` commands.

use std::sync::{Arc, Barrier};
use std::thread;

use crate::common::*;

/// 8 threads × 100 increments on one key: no update is lost.
#[test]
fn same_key_increments_are_not_lost() {
    let num_threads = 8;
    let per_thread = 100;
    let storage = Arc::new(storage_with(vec![("counter", Value::Int(0))]));
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let storage = Arc::clone(&storage);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..per_thread {
                    storage
                        .set(&SetCommand::new("counter", vec![op("add", 1)]))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        stored(&storage, "counter"),
        Some(Value::Int((num_threads * per_thread) as i64))
    );
}

/// Every reply's original_value is exactly one less than its value, so no
/// two invocations ever saw the same snapshot.
#[test]
fn same_key_snapshots_are_distinct() {
    let num_threads = 4;
    let per_thread = 50;
    let storage = Arc::new(storage_with(vec![]));
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let storage = Arc::clone(&storage);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..per_thread)
                    .map(|_| {
                        let reply = storage
                            .set(&SetCommand::new("seq", vec![op("add", 1)]).with_default(0))
                            .unwrap();
                        assert_eq!(
                            reply.value.as_int().unwrap(),
                            reply.original_value.as_int().unwrap() + 1
                        );
                        reply.original_value.as_int().unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen: Vec<i64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    seen.sort_unstable();
    let expected: Vec<i64> = (0..(num_threads * per_thread) as i64).collect();
    assert_eq!(seen, expected);
}

/// Threads on distinct keys each see only their own updates.
#[test]
fn different_keys_are_independent() {
    let num_threads = 8;
    let storage = Arc::new(storage_with(vec![]));
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|i| {
            let storage = Arc::clone(&storage);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let key = format!("player:{}", i);
                barrier.wait();
                for _ in 0..50 {
                    storage
                        .set(&SetCommand::new(key.as_str(), vec![op("add", i as i64)]).with_default(0))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for i in 0..num_threads {
        assert_eq!(
            stored(&storage, &format!("player:{}", i)),
            Some(Value::Int(50 * i as i64))
        );
    }
}

/// A raising invocation holding the lock does not wedge later ones.
#[test]
fn failed_invocation_releases_key() {
    let storage = storage_with(vec![("k", Value::Int(1))]);
    assert!(storage
        .set(&SetCommand::new("k", vec![op("pop", "x")]))
        .is_err());
    let reply = storage
        .set(&SetCommand::new("k", vec![op("add", 1)]))
        .unwrap();
    assert_eq!(reply.value, Value::Int(2));
}
