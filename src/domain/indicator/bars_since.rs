//! Bars elapsed since a condition last held.
//!
//! State machine per call site: either no true occurrence has ever been
//! seen, or the condition last held at bar k. On the first evaluation at a
//! strictly advanced cursor the previous bar's tentative last-true index is
//! committed; the tentative index is then recomputed from the current bar's
//! condition. Same-bar re-entry only rewrites the tentative layer.

use crate::domain::context::{CallId, EvalContext, StatefulKind};
use crate::domain::series::Series;
use crate::domain::value::Value;

/// Number of bars since `cond` was last true at this call site, or the
/// undefined sentinel if it has never been true.
pub fn bars_since(ctx: &mut EvalContext, cond: &Series, call_id: Option<&str>) -> Value {
    let idx = ctx.idx();
    let cond_now = cond.get(0).is_truthy();

    let state = ctx.bars_since_state(CallId::resolve(StatefulKind::BarsSince, call_id));
    match state.last_seen_idx {
        Some(last) if idx > last => {
            state.committed_last_true = state.tentative_last_true;
            state.last_seen_idx = Some(idx);
        }
        None => state.last_seen_idx = Some(idx),
        Some(_) => {}
    }

    state.tentative_last_true = if cond_now {
        Some(idx)
    } else {
        state.committed_last_true
    };

    match state.tentative_last_true {
        Some(k) => Value::Num((idx - k) as f64),
        None => Value::na(),
    }
}
