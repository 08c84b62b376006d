//! Evaluation context and call-site state store.
//!
//! One `EvalContext` lives for one evaluation run over a bar sequence. It
//! carries the current bar cursor, the numeric precision policy, and the
//! per-call-site memory of stateful indicators.
//!
//! # Commit discipline
//!
//! A single bar may be evaluated more than once before it closes (recursive
//! self-reference re-runs the bar's expressions). Stateful indicators
//! therefore keep two layers of state: a tentative layer rewritten freely
//! while the cursor stands still, and a committed layer folded in exactly
//! once, the first time an evaluation is observed at a strictly greater
//! cursor. Committed history is never rewritten.

use crate::domain::value::Value;
use std::collections::HashMap;

/// Default decimal places for canonical result rounding.
pub const DEFAULT_PRECISION: u32 = 10;

/// The stateful indicator kinds, used for default call-site identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatefulKind {
    BarsSince,
    ValueWhen,
}

/// Identity of one stateful call site.
///
/// Two invocations of the same indicator kind in one script collide unless
/// the caller supplies distinct names; unnamed invocations share the kind's
/// default slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CallId {
    Default(StatefulKind),
    Named(String),
}

impl CallId {
    pub fn resolve(kind: StatefulKind, name: Option<&str>) -> Self {
        match name {
            Some(n) => CallId::Named(n.to_string()),
            None => CallId::Default(kind),
        }
    }
}

/// Memory of one `bars_since` call site.
#[derive(Debug, Clone, Default)]
pub struct BarsSinceState {
    /// Cursor value at the most recent evaluation, `None` before the first.
    pub last_seen_idx: Option<usize>,
    /// Last-true bar index as of the previous bar's close.
    pub committed_last_true: Option<usize>,
    /// Last-true bar index including the current, still-open bar.
    pub tentative_last_true: Option<usize>,
}

/// Memory of one `value_when` call site.
#[derive(Debug, Clone, Default)]
pub struct ValueWhenState {
    /// Cursor value at the most recent evaluation, `None` before the first.
    pub last_seen_idx: Option<usize>,
    /// Length of `history` as of the previous bar's close; entries past this
    /// watermark are tentative and may be rewritten on same-bar re-entry.
    pub committed_len: usize,
    /// Values recorded each time the condition held, oldest first.
    pub history: Vec<Value>,
}

/// Tagged state entry, one variant per stateful indicator kind.
#[derive(Debug, Clone)]
pub enum CallState {
    BarsSince(BarsSinceState),
    ValueWhen(ValueWhenState),
}

#[derive(Debug)]
pub struct EvalContext {
    idx: usize,
    precision: u32,
    states: HashMap<CallId, CallState>,
}

impl EvalContext {
    pub fn new(precision: u32) -> Self {
        Self {
            idx: 0,
            precision,
            states: HashMap::new(),
        }
    }

    /// Current bar cursor. Non-decreasing across the run.
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// Move the cursor to `idx`. The cursor never moves backwards; a call
    /// with the current value is a no-op (same-bar re-entry).
    pub fn advance(&mut self, idx: usize) {
        debug_assert!(idx >= self.idx, "cursor moved backwards: {} -> {idx}", self.idx);
        if idx > self.idx {
            self.idx = idx;
        }
    }

    /// Round a numeric result to the canonical decimal precision.
    /// NaN and infinities pass through.
    pub fn round(&self, v: f64) -> f64 {
        if !v.is_finite() {
            return v;
        }
        let factor = 10f64.powi(self.precision as i32);
        (v * factor).round() / factor
    }

    /// State slot for a `bars_since` call site, created fresh on first use.
    /// A slot previously holding a different kind is reset to a fresh default.
    pub fn bars_since_state(&mut self, id: CallId) -> &mut BarsSinceState {
        let slot = self
            .states
            .entry(id)
            .or_insert_with(|| CallState::BarsSince(BarsSinceState::default()));
        if !matches!(slot, CallState::BarsSince(_)) {
            *slot = CallState::BarsSince(BarsSinceState::default());
        }
        match slot {
            CallState::BarsSince(s) => s,
            CallState::ValueWhen(_) => unreachable!(),
        }
    }

    /// State slot for a `value_when` call site, created fresh on first use.
    pub fn value_when_state(&mut self, id: CallId) -> &mut ValueWhenState {
        let slot = self
            .states
            .entry(id)
            .or_insert_with(|| CallState::ValueWhen(ValueWhenState::default()));
        if !matches!(slot, CallState::ValueWhen(_)) {
            *slot = CallState::ValueWhen(ValueWhenState::default());
        }
        match slot {
            CallState::ValueWhen(s) => s,
            CallState::BarsSince(_) => unreachable!(),
        }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}
