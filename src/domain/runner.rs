//! Per-bar evaluation loop.
//!
//! Owns the per-run value columns, appends each incoming bar, advances the
//! context cursor, and hands the evaluation closure fresh series windows
//! over the committed history. The closure may be invoked several times per
//! bar (`passes > 1`) to model intra-bar recomputation; only the final pass
//! of each bar is kept. A run may be truncated after any bar — there is no
//! finalization step.

use crate::domain::context::EvalContext;
use crate::domain::error::TascriptError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::series::Series;
use crate::domain::value::Value;
use std::str::FromStr;

/// Price column selectable as an indicator source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceColumn {
    Open,
    High,
    Low,
    Close,
    Volume,
    Hl2,
    Hlc3,
}

impl PriceColumn {
    fn value(&self, bar: &OhlcvBar) -> f64 {
        match self {
            PriceColumn::Open => bar.open,
            PriceColumn::High => bar.high,
            PriceColumn::Low => bar.low,
            PriceColumn::Close => bar.close,
            PriceColumn::Volume => bar.volume as f64,
            PriceColumn::Hl2 => bar.hl2(),
            PriceColumn::Hlc3 => bar.hlc3(),
        }
    }
}

impl FromStr for PriceColumn {
    type Err = TascriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(PriceColumn::Open),
            "high" => Ok(PriceColumn::High),
            "low" => Ok(PriceColumn::Low),
            "close" => Ok(PriceColumn::Close),
            "volume" => Ok(PriceColumn::Volume),
            "hl2" => Ok(PriceColumn::Hl2),
            "hlc3" => Ok(PriceColumn::Hlc3),
            _ => Err(TascriptError::InvalidArgument {
                name: "column".into(),
                reason: format!("unknown column '{s}'"),
            }),
        }
    }
}

/// Built-in per-bar conditions for driving the stateful indicators from the
/// CLI harness. Not a script language — just the common cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarCondition {
    /// close > open
    Up,
    /// close < open
    Down,
    /// close > previous close
    NewHigh,
}

impl BarCondition {
    pub fn holds(&self, cols: &BarColumns) -> bool {
        match self {
            BarCondition::Up => cols.close.num(0) > cols.open.num(0),
            BarCondition::Down => cols.close.num(0) < cols.open.num(0),
            BarCondition::NewHigh => cols.close.num(0) > cols.close.num(1),
        }
    }
}

impl FromStr for BarCondition {
    type Err = TascriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(BarCondition::Up),
            "down" => Ok(BarCondition::Down),
            "new-high" => Ok(BarCondition::NewHigh),
            _ => Err(TascriptError::InvalidArgument {
                name: "condition".into(),
                reason: format!("unknown condition '{s}'"),
            }),
        }
    }
}

/// Series windows over the run's history, one per price column.
pub struct BarColumns<'a> {
    pub open: Series<'a>,
    pub high: Series<'a>,
    pub low: Series<'a>,
    pub close: Series<'a>,
    pub volume: Series<'a>,
    pub hl2: Series<'a>,
    pub hlc3: Series<'a>,
}

impl<'a> BarColumns<'a> {
    pub fn select(&self, column: PriceColumn) -> &Series<'a> {
        match column {
            PriceColumn::Open => &self.open,
            PriceColumn::High => &self.high,
            PriceColumn::Low => &self.low,
            PriceColumn::Close => &self.close,
            PriceColumn::Volume => &self.volume,
            PriceColumn::Hl2 => &self.hl2,
            PriceColumn::Hlc3 => &self.hlc3,
        }
    }
}

/// Evaluate `f` once per bar and collect the per-bar results.
pub fn run_bars<F>(bars: &[OhlcvBar], precision: u32, f: F) -> Vec<Value>
where
    F: FnMut(&mut EvalContext, &BarColumns) -> Value,
{
    run_bars_with_passes(bars, precision, 1, f)
}

/// Evaluate `f` `passes` times per bar before the bar commits, keeping the
/// final pass's result. `passes` must be at least 1.
pub fn run_bars_with_passes<F>(
    bars: &[OhlcvBar],
    precision: u32,
    passes: usize,
    mut f: F,
) -> Vec<Value>
where
    F: FnMut(&mut EvalContext, &BarColumns) -> Value,
{
    assert!(passes >= 1, "at least one pass per bar");

    let mut ctx = EvalContext::new(precision);
    let mut open = Vec::with_capacity(bars.len());
    let mut high = Vec::with_capacity(bars.len());
    let mut low = Vec::with_capacity(bars.len());
    let mut close = Vec::with_capacity(bars.len());
    let mut volume = Vec::with_capacity(bars.len());
    let mut hl2 = Vec::with_capacity(bars.len());
    let mut hlc3 = Vec::with_capacity(bars.len());

    let mut out = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        open.push(Value::Num(PriceColumn::Open.value(bar)));
        high.push(Value::Num(PriceColumn::High.value(bar)));
        low.push(Value::Num(PriceColumn::Low.value(bar)));
        close.push(Value::Num(PriceColumn::Close.value(bar)));
        volume.push(Value::Num(PriceColumn::Volume.value(bar)));
        hl2.push(Value::Num(PriceColumn::Hl2.value(bar)));
        hlc3.push(Value::Num(PriceColumn::Hlc3.value(bar)));

        ctx.advance(i);
        let cols = BarColumns {
            open: Series::window(&open),
            high: Series::window(&high),
            low: Series::window(&low),
            close: Series::window(&close),
            volume: Series::window(&volume),
            hl2: Series::window(&hl2),
            hlc3: Series::window(&hlc3),
        };

        let mut result = f(&mut ctx, &cols);
        for _ in 1..passes {
            result = f(&mut ctx, &cols);
        }
        out.push(result);
    }
    out
}
