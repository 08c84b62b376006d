//! Offset of the highest value in a lookback window.

use crate::domain::context::EvalContext;
use crate::domain::series::Series;
use crate::domain::value::Value;

/// Negated offset of the highest value over the last `length` bars, in
/// `[-(length-1), 0]`. Undefined while fewer than `length` bars exist.
/// NaN entries are skipped; on ties the most recent bar wins.
pub fn highest_bars(ctx: &EvalContext, source: &Series, length: usize) -> Value {
    if length == 0 || ctx.idx() + 1 < length {
        return Value::na();
    }

    let mut best: Option<(usize, f64)> = None;
    for offset in 0..length {
        let v = source.num(offset);
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, high)) if v > high => best = Some((offset, v)),
            None => best = Some((offset, v)),
            Some(_) => {}
        }
    }

    match best {
        Some((offset, _)) => Value::Num(-(offset as f64)),
        None => Value::na(),
    }
}
