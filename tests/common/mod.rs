#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use tascript::domain::error::TascriptError;
pub use tascript::domain::ohlcv::OhlcvBar;
use tascript::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, TascriptError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TascriptError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, TascriptError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TascriptError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Bar with plausible OHLV derived from open and close.
pub fn make_bar(symbol: &str, day: &str, open: f64, close: f64) -> OhlcvBar {
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
    OhlcvBar {
        symbol: symbol.to_string(),
        date,
        open,
        high: open.max(close) + 1.0,
        low: open.min(close) - 1.0,
        close,
        volume: 1000,
    }
}

/// Bars whose up/down shape follows `closes` relative to a flat 100.0 open.
pub fn bars_from_closes(symbol: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                + chrono::Duration::days(i as i64);
            OhlcvBar {
                symbol: symbol.to_string(),
                date,
                open: 100.0,
                high: close.max(100.0) + 1.0,
                low: close.min(100.0) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}
