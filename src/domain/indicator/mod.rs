//! Indicator function library.
//!
//! Each function is one script-level calculation evaluated once per bar
//! (possibly more than once while the bar is still open). Stateful
//! indicators take the evaluation context mutably and key their memory by
//! call-site identity; stateless ones are plain functions of their series
//! inputs. Undefined results are the NaN sentinel, never an error.

pub mod bars_since;
pub mod cross;
pub mod highest_bars;
pub mod math;
pub mod value_when;

pub use bars_since::bars_since;
pub use cross::cross;
pub use highest_bars::highest_bars;
pub use math::{eq, param, to_radians};
pub use value_when::value_when;
