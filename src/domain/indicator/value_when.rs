//! Value recorded at the nth most recent occurrence of a condition.
//!
//! Each call site keeps an append-only log of the source value at every bar
//! where the condition held. The log carries a committed-length watermark:
//! appends on an open bar are tentative, and same-bar re-entry truncates
//! back to the watermark first, so re-evaluating a bar can never record the
//! same occurrence twice. The watermark advances when the cursor does.

use crate::domain::context::{CallId, EvalContext, StatefulKind};
use crate::domain::series::Series;
use crate::domain::value::Value;

/// Value of `source` at the `occurrence`-th most recent bar where `cond`
/// held (0 = most recent). Negative, undefined, or out-of-range occurrence
/// counts yield the undefined sentinel. Numeric results are rounded to the
/// context's precision; booleans and colors pass through unmodified.
pub fn value_when(
    ctx: &mut EvalContext,
    cond: &Series,
    source: &Series,
    occurrence: f64,
    call_id: Option<&str>,
) -> Value {
    let idx = ctx.idx();
    let cond_now = cond.get(0).is_truthy();
    let current = source.get(0);

    let picked = {
        let state = ctx.value_when_state(CallId::resolve(StatefulKind::ValueWhen, call_id));
        match state.last_seen_idx {
            Some(last) if idx > last => {
                state.committed_len = state.history.len();
                state.last_seen_idx = Some(idx);
            }
            None => state.last_seen_idx = Some(idx),
            Some(_) => state.history.truncate(state.committed_len),
        }

        if cond_now {
            state.history.push(current);
        }

        if occurrence.is_nan() || occurrence < 0.0 {
            None
        } else {
            let n = occurrence as usize;
            state
                .history
                .len()
                .checked_sub(1 + n)
                .map(|pos| state.history[pos].clone())
        }
    };

    match picked {
        Some(Value::Num(v)) => Value::Num(ctx.round(v)),
        Some(other) => other,
        None => Value::na(),
    }
}
