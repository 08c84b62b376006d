//! Bar-indexed series views.
//!
//! A `Series` normalizes the two kinds of indicator input — a bare scalar or
//! a window of committed per-bar history — into uniform access by recency
//! offset: offset 0 is the current bar, offset 1 the bar before, and so on.
//! Offsets beyond available history yield the undefined sentinel.

use crate::domain::value::Value;

#[derive(Debug, Clone)]
pub enum Series<'a> {
    /// A constant: the same value at every offset.
    Scalar(Value),
    /// A chronological slice of history up to and including the current bar;
    /// the last element is offset 0.
    Window(&'a [Value]),
}

impl<'a> Series<'a> {
    pub fn scalar(v: Value) -> Self {
        Series::Scalar(v)
    }

    pub fn from_num(v: f64) -> Self {
        Series::Scalar(Value::Num(v))
    }

    pub fn window(values: &'a [Value]) -> Self {
        Series::Window(values)
    }

    /// Value at the given recency offset, or `Value::na()` past history.
    pub fn get(&self, offset: usize) -> Value {
        match self {
            Series::Scalar(v) => v.clone(),
            Series::Window(w) => {
                if offset < w.len() {
                    w[w.len() - 1 - offset].clone()
                } else {
                    Value::na()
                }
            }
        }
    }

    /// Numeric value at the given offset (NaN for non-numeric or missing).
    pub fn num(&self, offset: usize) -> f64 {
        self.get(offset).as_num()
    }
}

impl From<f64> for Series<'_> {
    fn from(v: f64) -> Self {
        Series::Scalar(Value::Num(v))
    }
}
