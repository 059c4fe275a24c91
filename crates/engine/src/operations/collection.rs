//! Mapping and sequence operations

use datastorage_core::{OperationError, Value};

use crate::registry::{Applied, OperationContext, TransformResult};

/// `pop`: remove the mapping entry named by the operand
///
/// Fails with `TypeMismatch` if the current value is not a mapping, and with
/// `KeyNotFound` if the entry does not exist. Mapping keys are strings, so a
/// non-string operand can never be found.
pub fn pop(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    let map = current
        .as_object()
        .ok_or_else(|| OperationError::type_mismatch(ctx.tag, "Object", current))?;
    let key = match operand {
        Value::String(key) if map.contains_key(key) => key,
        Value::String(key) => return Err(OperationError::key_not_found(ctx.tag, key.clone())),
        other => return Err(OperationError::key_not_found(ctx.tag, other.to_string())),
    };
    let mut map = map.clone();
    map.remove(key);
    Ok(Applied::Replaced(Value::Object(map)))
}

/// `remove`: drop the first sequence element equal to the operand
pub fn remove(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    let items = current
        .as_array()
        .ok_or_else(|| OperationError::type_mismatch(ctx.tag, "Array", current))?;
    let index = items
        .iter()
        .position(|item| item == operand)
        .ok_or_else(|| OperationError::value_not_found(ctx.tag, operand))?;
    let mut items = items.to_vec();
    items.remove(index);
    Ok(Applied::Replaced(Value::Array(items)))
}

/// `update`: merge the operand mapping into the current mapping
///
/// Entries from the operand overwrite existing ones.
pub fn update(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    let base = current
        .as_object()
        .ok_or_else(|| OperationError::type_mismatch(ctx.tag, "Object", current))?;
    let patch = operand
        .as_object()
        .ok_or_else(|| OperationError::type_mismatch(ctx.tag, "Object", operand))?;
    let mut merged = base.clone();
    merged.extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
    Ok(Applied::Replaced(Value::Object(merged)))
}
