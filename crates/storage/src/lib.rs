//! Storage layer for DataStorage
//!
//! This crate implements the in-memory backend and the per-key lock table:
//! - ShardedStore: DashMap-backed [`Storage`] implementation
//! - KeyLockTable: one single-writer guard per key
//!
//! # Concurrency
//!
//! - Lock-free reads via DashMap
//! - Writes only lock the target shard
//! - Read-modify-write cycles on one key are serialized by `KeyLockTable`;
//!   different keys never share a guard
//!
//! [`Storage`]: datastorage_core::Storage

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod locks;
pub mod sharded;

pub use locks::{KeyGuard, KeyLockTable};
pub use sharded::ShardedStore;
