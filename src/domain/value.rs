//! Script value model.
//!
//! Every value flowing through the evaluation engine is one of three shapes:
//! a number (with NaN as the "undefined at this bar" sentinel), a boolean, or
//! an opaque color tag. Undefined results never raise; they propagate as
//! `Value::na()` and comparisons against them come out false.

/// Absolute tolerance for numeric equality between script values.
pub const EQ_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Num(f64),
    Bool(bool),
    Color(String),
}

impl Value {
    /// The "undefined at this bar" sentinel.
    pub fn na() -> Self {
        Value::Num(f64::NAN)
    }

    pub fn num(v: f64) -> Self {
        Value::Num(v)
    }

    /// Numeric view: `Num` yields its payload, `Bool`/`Color` yield NaN.
    pub fn as_num(&self) -> f64 {
        match self {
            Value::Num(v) => *v,
            Value::Bool(_) | Value::Color(_) => f64::NAN,
        }
    }

    /// True iff this is the numeric sentinel.
    pub fn is_na(&self) -> bool {
        matches!(self, Value::Num(v) if v.is_nan())
    }

    /// Condition semantics: `Bool` is itself, a number is true when nonzero
    /// and defined, a color is never true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Num(v) => !v.is_nan() && *v != 0.0,
            Value::Color(_) => false,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Num(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Tolerant numeric equality, the engine's named equality policy.
///
/// Two undefined values compare equal ("undefined equals undefined" — a
/// deliberate domain convention that diverges from IEEE NaN semantics).
/// One undefined operand compares unequal to anything defined. Defined
/// operands are equal when within [`EQ_TOLERANCE`].
pub fn tolerant_eq(a: f64, b: f64) -> bool {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => true,
        (true, false) | (false, true) => false,
        (false, false) => (a - b).abs() < EQ_TOLERANCE,
    }
}
