//! Numeric operations
//!
//! `Int` and `Float` both count as numbers. Int-with-Int arithmetic stays
//! integral and is overflow-checked; any Float operand promotes the result
//! to Float. Every other value kind is a `TypeMismatch`.

use std::cmp::Ordering;

use datastorage_core::{OperationError, Value};

use crate::registry::{Applied, OperationContext, TransformResult};

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

fn number(tag: &str, value: &Value) -> Result<Number, OperationError> {
    match value {
        Value::Int(i) => Ok(Number::Int(*i)),
        Value::Float(f) => Ok(Number::Float(*f)),
        other => Err(OperationError::type_mismatch(tag, "number", other)),
    }
}

fn arithmetic(
    ctx: &OperationContext<'_>,
    current: &Value,
    operand: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> TransformResult {
    let lhs = number(ctx.tag, current)?;
    let rhs = number(ctx.tag, operand)?;
    let result = match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => {
            Value::Int(int_op(a, b).ok_or_else(|| OperationError::overflow(ctx.tag))?)
        }
        (a, b) => Value::Float(float_op(a.as_f64(), b.as_f64())),
    };
    Ok(Applied::Replaced(result))
}

/// `add`: numeric addition
pub fn add(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    arithmetic(ctx, current, operand, i64::checked_add, |a, b| a + b)
}

/// `mul`: numeric multiplication
pub fn mul(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    arithmetic(ctx, current, operand, i64::checked_mul, |a, b| a * b)
}

/// `pow`: raise the current value to the operand
///
/// An integer base with a non-negative integer exponent stays integral.
/// A zero base with a negative exponent is a division by zero.
pub fn pow(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    let base = number(ctx.tag, current)?;
    let exponent = number(ctx.tag, operand)?;
    let result = match (base, exponent) {
        (Number::Int(b), Number::Int(e)) if e >= 0 => {
            let e = u32::try_from(e).map_err(|_| OperationError::overflow(ctx.tag))?;
            Value::Int(b.checked_pow(e).ok_or_else(|| OperationError::overflow(ctx.tag))?)
        }
        (b, e) => {
            let (b, e) = (b.as_f64(), e.as_f64());
            if b == 0.0 && e < 0.0 {
                return Err(OperationError::division_by_zero(ctx.tag));
            }
            Value::Float(b.powf(e))
        }
    };
    Ok(Applied::Replaced(result))
}

/// `mod`: remainder whose sign follows the divisor
///
/// `-7 mod 3 == 2` and `7 mod -3 == -2`.
pub fn modulo(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    let lhs = number(ctx.tag, current)?;
    let rhs = number(ctx.tag, operand)?;
    let result = match (lhs, rhs) {
        (Number::Int(_), Number::Int(0)) => {
            return Err(OperationError::division_by_zero(ctx.tag));
        }
        (Number::Int(a), Number::Int(b)) => {
            // b != 0 here; the only wrapping case is MIN % -1, which is 0
            let mut r = a.wrapping_rem(b);
            if r != 0 && (r < 0) != (b < 0) {
                r += b;
            }
            Value::Int(r)
        }
        (a, b) => {
            let (a, b) = (a.as_f64(), b.as_f64());
            if b == 0.0 {
                return Err(OperationError::division_by_zero(ctx.tag));
            }
            let mut r = a % b;
            if r != 0.0 && (r < 0.0) != (b < 0.0) {
                r += b;
            }
            Value::Float(r)
        }
    };
    Ok(Applied::Replaced(result))
}

fn round_with(ctx: &OperationContext<'_>, current: &Value, round: fn(f64) -> f64) -> TransformResult {
    match number(ctx.tag, current)? {
        Number::Int(_) => Ok(Applied::Unchanged),
        Number::Float(f) if f.is_nan() => {
            Err(OperationError::type_mismatch(ctx.tag, "finite number", current))
        }
        Number::Float(f) => {
            let rounded = round(f);
            // 2^63 is exactly representable; i64::MAX is not
            if rounded < i64::MIN as f64 || rounded >= 9_223_372_036_854_775_808.0 {
                return Err(OperationError::overflow(ctx.tag));
            }
            Ok(Applied::Replaced(Value::Int(rounded as i64)))
        }
    }
}

/// `floor`: round down to an integer; operand ignored
pub fn floor(ctx: &OperationContext<'_>, current: &Value, _operand: &Value) -> TransformResult {
    round_with(ctx, current, f64::floor)
}

/// `ceil`: round up to an integer; operand ignored
pub fn ceil(ctx: &OperationContext<'_>, current: &Value, _operand: &Value) -> TransformResult {
    round_with(ctx, current, f64::ceil)
}

fn compare(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> Result<Option<Ordering>, OperationError> {
    let lhs = number(ctx.tag, current)?;
    let rhs = number(ctx.tag, operand)?;
    Ok(match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
        (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
    })
}

/// `max`: keep the larger of current and operand (current wins ties)
pub fn max(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    match compare(ctx, current, operand)? {
        Some(Ordering::Less) => Ok(Applied::Replaced(operand.clone())),
        _ => Ok(Applied::Unchanged),
    }
}

/// `min`: keep the smaller of current and operand (current wins ties)
pub fn min(ctx: &OperationContext<'_>, current: &Value, operand: &Value) -> TransformResult {
    match compare(ctx, current, operand)? {
        Some(Ordering::Greater) => Ok(Applied::Replaced(operand.clone())),
        _ => Ok(Applied::Unchanged),
    }
}
