//! Set Operation Integration Tests
//!
//! End-to-end coverage of `set` commands through the public API:
//! - scenarios: the canonical before/after examples
//! - policies: `on_error` properties over generated operation lists
//! - concurrency: per-key serialization and cross-key independence
//! - config: `datastorage.toml` driven engines

mod common;

mod concurrency;
mod config;
mod policies;
mod scenarios;
