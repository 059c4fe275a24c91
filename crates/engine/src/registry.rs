//! Operation registry
//!
//! Maps an operation tag (`"add"`, `"pop"`, ...) to the [`Transform`] that
//! implements it. The pipeline only ever looks transforms up by tag, so new
//! operation kinds plug in here without touching the state machine.
//!
//! # Transform contract
//!
//! A transform receives the current value, the operand and an
//! [`OperationContext`], and returns an [`Applied`] describing the new
//! value. Transforms never mutate `current` in place: a failing step must
//! leave the pipeline's value exactly as it was.

use std::fmt;
use std::sync::Arc;

use datastorage_core::{OperationError, Value};
use rustc_hash::FxHashMap;

use crate::operations;

/// Per-step information handed to a transform
#[derive(Debug, Clone, Copy)]
pub struct OperationContext<'a> {
    /// Tag the operation was invoked under
    pub tag: &'a str,
    /// Whether the key existed before this command ran
    pub had_key_before: bool,
    /// Command-level default, if one was supplied
    pub default: Option<&'a Value>,
}

/// Successful result of one transform
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// Current value is replaced
    Replaced(Value),
    /// Current value is left as is
    Unchanged,
    /// Current value is replaced AND the reported snapshot is reset to it
    ///
    /// Only the built-in `default` operation produces this.
    Reinitialized(Value),
}

/// Result type returned by transforms
pub type TransformResult = std::result::Result<Applied, OperationError>;

/// One operation kind
pub trait Transform: Send + Sync {
    /// Apply the operation to `current`
    fn apply(&self, ctx: &OperationContext<'_>, current: &Value, operand: &Value)
        -> TransformResult;
}

impl<F> Transform for F
where
    F: Fn(&OperationContext<'_>, &Value, &Value) -> TransformResult + Send + Sync,
{
    fn apply(
        &self,
        ctx: &OperationContext<'_>,
        current: &Value,
        operand: &Value,
    ) -> TransformResult {
        self(ctx, current, operand)
    }
}

/// Lookup table from tag to transform
///
/// Cloning is cheap: transforms are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct OperationRegistry {
    transforms: FxHashMap<String, Arc<dyn Transform>>,
}

impl OperationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in operation
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        operations::register_builtins(&mut registry);
        registry
    }

    /// Register a transform under `tag`, replacing any previous one
    pub fn register<T>(&mut self, tag: impl Into<String>, transform: T) -> &mut Self
    where
        T: Transform + 'static,
    {
        self.transforms.insert(tag.into(), Arc::new(transform));
        self
    }

    /// Remove a tag, returning true if it was registered
    pub fn unregister(&mut self, tag: &str) -> bool {
        self.transforms.remove(tag).is_some()
    }

    /// Look up the transform for `tag`
    pub fn get(&self, tag: &str) -> Option<&dyn Transform> {
        self.transforms.get(tag).map(|t| t.as_ref())
    }

    /// Check whether `tag` is registered
    pub fn contains(&self, tag: &str) -> bool {
        self.transforms.contains_key(tag)
    }

    /// Registered tags, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.transforms.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Number of registered operations
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(tag: &str) -> OperationContext<'_> {
        OperationContext {
            tag,
            had_key_before: true,
            default: None,
        }
    }

    #[test]
    fn test_builtins_are_registered() {
        let registry = OperationRegistry::with_builtins();
        for tag in [
            "replace",
            "default",
            "add",
            "mul",
            "pow",
            "mod",
            "floor",
            "ceil",
            "max",
            "min",
            "and",
            "or",
            "xor",
            "left_shift",
            "right_shift",
            "remove",
            "pop",
            "update",
        ] {
            assert!(registry.contains(tag), "missing builtin '{}'", tag);
        }
        assert_eq!(registry.len(), 18);
    }

    #[test]
    fn test_register_custom_closure() {
        let mut registry = OperationRegistry::new();
        registry.register(
            "negate",
            |ctx: &OperationContext<'_>, current: &Value, _operand: &Value| -> TransformResult {
                match current {
                    Value::Int(i) => Ok(Applied::Replaced(Value::Int(-i))),
                    other => Err(OperationError::type_mismatch(ctx.tag, "Int", other)),
                }
            },
        );

        let negate = registry.get("negate").unwrap();
        let result = negate.apply(&ctx("negate"), &Value::Int(4), &Value::Null);
        assert_eq!(result, Ok(Applied::Replaced(Value::Int(-4))));
    }

    #[test]
    fn test_register_replaces_existing_tag() {
        let mut registry = OperationRegistry::with_builtins();
        registry.register(
            "add",
            |_ctx: &OperationContext<'_>, _current: &Value, _operand: &Value| -> TransformResult {
                Ok(Applied::Unchanged)
            },
        );
        let add = registry.get("add").unwrap();
        assert_eq!(
            add.apply(&ctx("add"), &Value::Int(1), &Value::Int(1)),
            Ok(Applied::Unchanged)
        );
        assert_eq!(registry.len(), 18);
    }

    #[test]
    fn test_unregister() {
        let mut registry = OperationRegistry::with_builtins();
        assert!(registry.unregister("pow"));
        assert!(!registry.unregister("pow"));
        assert!(registry.get("pow").is_none());
    }

    #[test]
    fn test_tags_sorted() {
        let mut registry = OperationRegistry::new();
        registry.register("b", operations::replace);
        registry.register("a", operations::replace);
        assert_eq!(registry.tags(), vec!["a", "b"]);
    }
}
