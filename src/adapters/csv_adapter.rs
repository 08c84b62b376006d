//! CSV file data adapter.
//!
//! Reads `<base_path>/<SYMBOL>.csv` with a header row and the columns
//! date,open,high,low,close,volume (dates as YYYY-MM-DD, ascending).

use crate::domain::error::TascriptError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{symbol}.csv"))
    }

    fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, TascriptError> {
        record
            .get(index)
            .ok_or_else(|| TascriptError::Data {
                reason: format!("missing {name} column"),
            })?
            .parse()
            .map_err(|e| TascriptError::Data {
                reason: format!("invalid {name} value: {e}"),
            })
    }
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, TascriptError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| TascriptError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TascriptError::Data {
                reason: format!("CSV parse error: {e}"),
            })?;

            let date_str = record.get(0).ok_or_else(|| TascriptError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                TascriptError::Data {
                    reason: format!("invalid date format: {e}"),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            let open = Self::parse_field(&record, 1, "open")?;
            let high = Self::parse_field(&record, 2, "high")?;
            let low = Self::parse_field(&record, 3, "low")?;
            let close = Self::parse_field(&record, 4, "close")?;
            let volume = record
                .get(5)
                .ok_or_else(|| TascriptError::Data {
                    reason: "missing volume column".into(),
                })?
                .parse::<i64>()
                .map_err(|e| TascriptError::Data {
                    reason: format!("invalid volume value: {e}"),
                })?;

            bars.push(OhlcvBar {
                symbol: symbol.to_string(),
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, TascriptError> {
        let bars = self.fetch_ohlcv(symbol, NaiveDate::MIN, NaiveDate::MAX)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, bars.len()))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const SAMPLE_CSV: &str = "\
date,open,high,low,close,volume
2024-01-01,100.0,110.0,90.0,105.0,1000
2024-01-02,105.0,115.0,95.0,110.0,2000
2024-01-03,110.0,120.0,100.0,108.0,1500
";

    fn write_csv(dir: &TempDir, symbol: &str, content: &str) {
        let mut file = std::fs::File::create(dir.path().join(format!("{symbol}.csv"))).unwrap();
        write!(file, "{content}").unwrap();
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fetch_all_bars() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "BHP", SAMPLE_CSV);
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let bars = adapter
            .fetch_ohlcv("BHP", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].symbol, "BHP");
        assert_eq!(bars[0].close, 105.0);
        assert_eq!(bars[2].volume, 1500);
    }

    #[test]
    fn date_filter_applies() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "BHP", SAMPLE_CSV);
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let bars = adapter
            .fetch_ohlcv("BHP", date(2024, 1, 2), date(2024, 1, 2))
            .unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, date(2024, 1, 2));
    }

    #[test]
    fn bars_sorted_by_date() {
        let dir = TempDir::new().unwrap();
        let out_of_order = "\
date,open,high,low,close,volume
2024-01-03,110.0,120.0,100.0,108.0,1500
2024-01-01,100.0,110.0,90.0,105.0,1000
";
        write_csv(&dir, "BHP", out_of_order);
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let bars = adapter
            .fetch_ohlcv("BHP", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        assert_eq!(bars[0].date, date(2024, 1, 1));
        assert_eq!(bars[1].date, date(2024, 1, 3));
    }

    #[test]
    fn missing_file_is_data_error() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let result = adapter.fetch_ohlcv("NOPE", date(2024, 1, 1), date(2024, 1, 31));
        assert!(matches!(result, Err(TascriptError::Data { .. })));
    }

    #[test]
    fn invalid_number_is_data_error() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "BAD",
            "date,open,high,low,close,volume\n2024-01-01,abc,110.0,90.0,105.0,1000\n",
        );
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let result = adapter.fetch_ohlcv("BAD", date(2024, 1, 1), date(2024, 1, 31));
        assert!(matches!(result, Err(TascriptError::Data { .. })));
    }

    #[test]
    fn invalid_date_is_data_error() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "BAD",
            "date,open,high,low,close,volume\n01/02/2024,100.0,110.0,90.0,105.0,1000\n",
        );
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let result = adapter.fetch_ohlcv("BAD", date(2024, 1, 1), date(2024, 12, 31));
        assert!(matches!(result, Err(TascriptError::Data { .. })));
    }

    #[test]
    fn data_range_reports_bounds_and_count() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "BHP", SAMPLE_CSV);
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let range = adapter.get_data_range("BHP").unwrap();
        assert_eq!(range, Some((date(2024, 1, 1), date(2024, 1, 3), 3)));
    }

    #[test]
    fn empty_file_has_no_range() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "EMPTY", "date,open,high,low,close,volume\n");
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        assert_eq!(adapter.get_data_range("EMPTY").unwrap(), None);
    }
}
