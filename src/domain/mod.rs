//! Core domain types and logic.

pub mod value;
pub mod series;
pub mod context;
pub mod indicator;
pub mod runner;
pub mod ohlcv;
pub mod error;
