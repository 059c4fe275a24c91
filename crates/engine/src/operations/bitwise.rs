//! Bitwise and shift operations
//!
//! `and`, `or` and `xor` work bitwise on two Ints and logically on two
//! Bools. Shifts take an Int current value and a non-negative Int operand.

use datastorage_core::{OperationError, Value};

use crate::registry::{Applied, OperationContext, TransformResult};

fn bitwise(
    ctx: &OperationContext<'_>,
    current: &Value,
    operand: &Value,
    int_op: fn(i64, i64) -> i64,
    bool_op: fn(bool, bool) -> bool,
) -> TransformResult {
    match (current, operand) {
        (Value::Int(a), Value::Int(b)) => Ok(Applied::Replaced(Value::Int(int_op(*a, *b)))),
        (Value::Bool(a), Value::Bool(b)) => Ok(Applied::Replaced(Value::Bool(bool_op(*a, *b)))),
        (Value::Int(_), other) | (Value::Bool(_), other) => Err(OperationError::type_mismatch(
            ctx.tag,
            current.type_name(),
            other,
        )),
        (other, _) => Err(OperationError::type_mismatch(ctx.tag, "Int or Bool", other)),
    }
}

/// `and`
pub fn bit_and(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    bitwise(ctx, current, operand, |a, b| a & b, |a, b| a && b)
}

/// `or`
pub fn bit_or(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    bitwise(ctx, current, operand, |a, b| a | b, |a, b| a || b)
}

/// `xor`
pub fn bit_xor(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    bitwise(ctx, current, operand, |a, b| a ^ b, |a, b| a ^ b)
}

fn shift_operands(
    ctx: &OperationContext<'_>,
    current: &Value,
    operand: &Value,
) -> Result<(i64, u32), OperationError> {
    let value = current
        .as_int()
        .ok_or_else(|| OperationError::type_mismatch(ctx.tag, "Int", current))?;
    let shift = match operand {
        Value::Int(s) if *s >= 0 => u32::try_from(*s).unwrap_or(u32::MAX),
        other => {
            return Err(OperationError::type_mismatch(
                ctx.tag,
                "non-negative Int",
                other,
            ))
        }
    };
    Ok((value, shift))
}

/// `left_shift`: multiply by `2^operand`, failing on overflow
pub fn left_shift(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    let (value, shift) = shift_operands(ctx, current, operand)?;
    if value == 0 {
        return Ok(Applied::Unchanged);
    }
    if shift >= 64 {
        return Err(OperationError::overflow(ctx.tag));
    }
    let shifted = value << shift;
    if shifted >> shift != value {
        return Err(OperationError::overflow(ctx.tag));
    }
    Ok(Applied::Replaced(Value::Int(shifted)))
}

/// `right_shift`: arithmetic shift, rounding towards negative infinity
pub fn right_shift(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    let (value, shift) = shift_operands(ctx, current, operand)?;
    let shifted = if shift >= 64 {
        if value < 0 {
            -1
        } else {
            0
        }
    } else {
        value >> shift
    };
    Ok(Applied::Replaced(Value::Int(shifted)))
}
