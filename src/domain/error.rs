//! Domain error taxonomy.
//!
//! Request-fatal conditions (`NoData`), input rejection (`InvalidTimeframe`,
//! `InvalidBins`, `DegenerateSeries`, `InvalidLot`) and upstream failures
//! are distinct variants; degraded-data states (missing quote, price
//! fallback, absent fundamentals) are deliberately not errors; they are
//! absorbed by the services and logged.

use crate::domain::timeframe::Timeframe;

/// Top-level error type for chartfolio.
#[derive(Debug, thiserror::Error)]
pub enum ChartfolioError {
    #[error("no price data for {symbol} ({timeframe})")]
    NoData { symbol: String, timeframe: Timeframe },

    #[error("invalid timeframe '{value}': expected 1d, 1wk or 1mo")]
    InvalidTimeframe { value: String },

    #[error("invalid bin count {bins}")]
    InvalidBins { bins: usize },

    #[error("degenerate price series: {reason}")]
    DegenerateSeries { reason: String },

    #[error("invalid purchase lot for stock {stock_id}: {reason}")]
    InvalidLot { stock_id: i64, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("upstream unavailable: {reason}")]
    Upstream { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ChartfolioError> for std::process::ExitCode {
    fn from(err: &ChartfolioError) -> Self {
        let code: u8 = match err {
            ChartfolioError::Io(_) => 1,
            ChartfolioError::ConfigParse { .. }
            | ChartfolioError::ConfigMissing { .. }
            | ChartfolioError::ConfigInvalid { .. } => 2,
            ChartfolioError::Upstream { .. } => 3,
            ChartfolioError::InvalidTimeframe { .. }
            | ChartfolioError::InvalidBins { .. }
            | ChartfolioError::DegenerateSeries { .. }
            | ChartfolioError::InvalidLot { .. } => 4,
            ChartfolioError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
