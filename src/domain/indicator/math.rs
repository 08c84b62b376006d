//! Thin stateless helpers: tolerant equality, angle conversion, and
//! parameter access.

use crate::domain::series::Series;
use crate::domain::value::{tolerant_eq, Value};

/// Tolerant equality of two series at the current bar.
pub fn eq(a: &Series, b: &Series) -> Value {
    Value::Bool(tolerant_eq(a.num(0), b.num(0)))
}

/// Current-bar value converted from degrees to radians; undefined in,
/// undefined out.
pub fn to_radians(source: &Series) -> Value {
    let v = source.num(0);
    if v.is_nan() {
        Value::na()
    } else {
        Value::Num(v.to_radians())
    }
}

/// Verbatim value of `source` at the given recency offset. An indexed
/// accessor, not a calculation.
pub fn param(source: &Series, offset: usize) -> Value {
    source.get(offset)
}
