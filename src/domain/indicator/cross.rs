//! Crossing detection between two series.
//!
//! Purely a function of the two most recent bars: a cross happens when one
//! series is strictly beyond the other now and was on or beyond the other
//! side one bar prior, in either direction. Any undefined operand makes the
//! result false rather than undefined.

use crate::domain::series::Series;
use crate::domain::value::Value;

/// True when `a` crossed `b` between the previous bar and this one.
pub fn cross(a: &Series, b: &Series) -> Value {
    let a0 = a.num(0);
    let a1 = a.num(1);
    let b0 = b.num(0);
    let b1 = b.num(1);

    if a0.is_nan() || a1.is_nan() || b0.is_nan() || b1.is_nan() {
        return Value::Bool(false);
    }

    Value::Bool((a0 > b0 && a1 <= b1) || (a0 < b0 && a1 >= b1))
}
