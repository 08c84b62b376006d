//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::context::DEFAULT_PRECISION;
use crate::domain::error::TascriptError;
use crate::domain::indicator::{bars_since, cross, highest_bars, to_radians, value_when};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::runner::{run_bars, BarCondition, PriceColumn};
use crate::domain::series::Series;
use crate::domain::value::Value;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;

#[derive(Parser, Debug)]
#[command(name = "tascript", about = "Bar-by-bar technical-indicator evaluation engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the date range and bar count of a CSV file
    Info {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Evaluate an indicator bar by bar over a CSV file
    Eval {
        #[arg(long)]
        csv: PathBuf,
        /// bars-since | value-when | cross | highest-bars | to-radians
        #[arg(short, long)]
        indicator: String,
        /// Condition for the stateful indicators: up | down | new-high
        #[arg(long, default_value = "up")]
        condition: String,
        /// Source column: open | high | low | close | volume | hl2 | hlc3
        #[arg(long, default_value = "close")]
        column: String,
        /// Second column for cross
        #[arg(long, default_value = "hlc3")]
        column2: String,
        /// Lookback length for highest-bars
        #[arg(long, default_value_t = 5)]
        length: usize,
        /// Occurrence count for value-when (0 = most recent)
        #[arg(long, default_value_t = 0.0)]
        occurrence: f64,
        /// Decimal precision override
        #[arg(long)]
        precision: Option<u32>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Indicator selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorKind {
    BarsSince,
    ValueWhen,
    Cross,
    HighestBars,
    ToRadians,
}

impl FromStr for IndicatorKind {
    type Err = TascriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bars-since" => Ok(IndicatorKind::BarsSince),
            "value-when" => Ok(IndicatorKind::ValueWhen),
            "cross" => Ok(IndicatorKind::Cross),
            "highest-bars" => Ok(IndicatorKind::HighestBars),
            "to-radians" => Ok(IndicatorKind::ToRadians),
            _ => Err(TascriptError::InvalidArgument {
                name: "indicator".into(),
                reason: format!("unknown indicator '{s}'"),
            }),
        }
    }
}

/// Fully-resolved evaluation request.
#[derive(Debug, Clone)]
pub struct EvalOptions {
    pub indicator: IndicatorKind,
    pub condition: BarCondition,
    pub column: PriceColumn,
    pub column2: PriceColumn,
    pub length: usize,
    pub occurrence: f64,
    pub precision: u32,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Info { csv } => run_info(&csv),
        Command::Eval {
            csv,
            indicator,
            condition,
            column,
            column2,
            length,
            occurrence,
            precision,
            config,
        } => run_eval(
            &csv,
            &indicator,
            &condition,
            &column,
            &column2,
            length,
            occurrence,
            precision,
            config.as_deref(),
        ),
    }
}

fn fail(err: &TascriptError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err)
}

/// Split a CSV path into the adapter's base directory and the symbol name.
pub fn adapter_for(csv: &Path) -> Result<(CsvAdapter, String), TascriptError> {
    let symbol = csv
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| TascriptError::InvalidArgument {
            name: "csv".into(),
            reason: format!("cannot derive a symbol from {}", csv.display()),
        })?
        .to_string();
    let base = csv.parent().unwrap_or_else(|| Path::new("."));
    Ok((CsvAdapter::new(base.to_path_buf()), symbol))
}

fn load_bars(csv: &Path) -> Result<Vec<OhlcvBar>, TascriptError> {
    let (adapter, symbol) = adapter_for(csv)?;
    let bars = adapter.fetch_ohlcv(&symbol, NaiveDate::MIN, NaiveDate::MAX)?;
    if bars.is_empty() {
        return Err(TascriptError::NoData { symbol });
    }
    Ok(bars)
}

/// Resolve precision: CLI flag, then `[eval] precision` config, then default.
pub fn resolve_precision(
    flag: Option<u32>,
    config: Option<&FileConfigAdapter>,
) -> Result<u32, TascriptError> {
    if let Some(p) = flag {
        return Ok(p);
    }
    match config {
        Some(cfg) => {
            let p = cfg.get_int("eval", "precision", DEFAULT_PRECISION as i64);
            u32::try_from(p).map_err(|_| TascriptError::ConfigInvalid {
                section: "eval".into(),
                key: "precision".into(),
                reason: format!("expected a non-negative integer, got {p}"),
            })
        }
        None => Ok(DEFAULT_PRECISION),
    }
}

/// Run the requested indicator over the bars, one result per bar.
pub fn evaluate_bars(bars: &[OhlcvBar], opts: &EvalOptions) -> Vec<Value> {
    run_bars(bars, opts.precision, |ctx, cols| match opts.indicator {
        IndicatorKind::BarsSince => {
            let cond = [Value::Bool(opts.condition.holds(cols))];
            bars_since(ctx, &Series::window(&cond), None)
        }
        IndicatorKind::ValueWhen => {
            let cond = [Value::Bool(opts.condition.holds(cols))];
            value_when(
                ctx,
                &Series::window(&cond),
                cols.select(opts.column),
                opts.occurrence,
                None,
            )
        }
        IndicatorKind::Cross => cross(cols.select(opts.column), cols.select(opts.column2)),
        IndicatorKind::HighestBars => highest_bars(ctx, cols.select(opts.column), opts.length),
        IndicatorKind::ToRadians => to_radians(cols.select(opts.column)),
    })
}

/// One output line per bar: `<date> <value>`.
pub fn eval_lines(bars: &[OhlcvBar], opts: &EvalOptions) -> Vec<String> {
    bars.iter()
        .zip(evaluate_bars(bars, opts))
        .map(|(bar, value)| format!("{} {}", bar.date, format_value(&value)))
        .collect()
}

pub fn format_value(value: &Value) -> String {
    match value {
        v if v.is_na() => "na".to_string(),
        Value::Num(v) => format!("{v}"),
        Value::Bool(b) => b.to_string(),
        Value::Color(c) => c.clone(),
    }
}

fn run_info(csv: &Path) -> ExitCode {
    let result = (|| {
        let (adapter, symbol) = adapter_for(csv)?;
        let range = adapter.get_data_range(&symbol)?;
        Ok::<_, TascriptError>((symbol, range))
    })();
    match result {
        Ok((symbol, Some((first, last, count)))) => {
            println!("{symbol}: {count} bars from {first} to {last}");
            ExitCode::SUCCESS
        }
        Ok((symbol, None)) => fail(&TascriptError::NoData { symbol }),
        Err(err) => fail(&err),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_eval(
    csv: &Path,
    indicator: &str,
    condition: &str,
    column: &str,
    column2: &str,
    length: usize,
    occurrence: f64,
    precision: Option<u32>,
    config: Option<&Path>,
) -> ExitCode {
    let result = (|| {
        let cfg = match config {
            Some(path) => Some(FileConfigAdapter::from_file(path).map_err(|e| {
                TascriptError::ConfigParse {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };
        let opts = EvalOptions {
            indicator: indicator.parse()?,
            condition: condition.parse()?,
            column: column.parse()?,
            column2: column2.parse()?,
            length,
            occurrence,
            precision: resolve_precision(precision, cfg.as_ref())?,
        };
        let bars = load_bars(csv)?;
        Ok::<_, TascriptError>(eval_lines(&bars, &opts))
    })();
    match result {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}
