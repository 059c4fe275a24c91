//! `replace` and `default`

use datastorage_core::Value;

use crate::registry::{Applied, OperationContext, TransformResult};

/// `replace`: the operand becomes the new value
pub fn replace(_ctx: &OperationContext<'_>, _current: &Value, operand: &Value) -> TransformResult {
    Ok(Applied::Replaced(operand.clone()))
}

/// `default`: initialize a key that did not exist before this command
///
/// The operand is required by the command envelope but never read. When the
/// key already existed this is a no-op. Otherwise the value is reset to the
/// command default and the reported `original_value` follows it.
pub fn default(ctx: &OperationContext<'_>, _current: &Value, _operand: &Value) -> TransformResult {
    if ctx.had_key_before {
        return Ok(Applied::Unchanged);
    }
    match ctx.default {
        Some(default) => Ok(Applied::Reinitialized(default.clone())),
        // Unreachable through the engine: an absent key without a default
        // never gets past initialization.
        None => Ok(Applied::Unchanged),
    }
}
