//! Domain error types.
//!
//! The evaluation core itself has no fatal conditions — undefined results
//! propagate as the NaN sentinel. These errors cover the I/O boundary:
//! data loading, configuration, and CLI argument validation.

/// Top-level error type for tascript.
#[derive(Debug, thiserror::Error)]
pub enum TascriptError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("insufficient data for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientData {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TascriptError> for std::process::ExitCode {
    fn from(err: &TascriptError) -> Self {
        let code: u8 = match err {
            TascriptError::Io(_) => 1,
            TascriptError::ConfigParse { .. } | TascriptError::ConfigInvalid { .. } => 2,
            TascriptError::Data { .. } => 3,
            TascriptError::InvalidArgument { .. } => 4,
            TascriptError::NoData { .. } | TascriptError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
