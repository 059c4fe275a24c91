//! Built-in operation kinds
//!
//! | Tag | Module |
//! |-----|--------|
//! | `replace`, `default` | [`basic`] |
//! | `add`, `mul`, `pow`, `mod`, `floor`, `ceil`, `max`, `min` | [`numeric`] |
//! | `and`, `or`, `xor`, `left_shift`, `right_shift` | [`bitwise`] |
//! | `remove`, `pop`, `update` | [`collection`] |
//!
//! Every function here is a plain [`Transform`](crate::Transform).

pub mod basic;
pub mod bitwise;
pub mod collection;
pub mod numeric;

pub use basic::{default, replace};
pub use bitwise::{bit_and, bit_or, bit_xor, left_shift, right_shift};
pub use collection::{pop, remove, update};
pub use numeric::{add, ceil, floor, max, min, modulo, mul, pow};

use crate::registry::OperationRegistry;

/// Tags of every built-in operation
pub const BUILTIN_TAGS: &[&str] = &[
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
];

pub(crate) fn register_builtins(registry: &mut OperationRegistry) {
    registry
        .register("replace", replace)
        .register("default", default)
        .register("add", add)
        .register("mul", mul)
        .register("pow", pow)
        .register("mod", modulo)
        .register("floor", floor)
        .register("ceil", ceil)
        .register("max", max)
        .register("min", min)
        .register("and", bit_and)
        .register("or", bit_or)
        .register("xor", bit_xor)
        .register("left_shift", left_shift)
        .register("right_shift", right_shift)
        .register("remove", remove)
        .register("pop", pop)
        .register("update", update);
}
