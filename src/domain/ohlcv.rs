//! OHLCV bar representation.

use chrono::NaiveDate;

/// One OHLCV observation for a fixed time bucket. Dates carry no
/// time-of-day or timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}
