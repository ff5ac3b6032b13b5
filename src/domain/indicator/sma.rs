//! Simple Moving Average.
//!
//! Arithmetic mean of the last `period` closes, trailing inclusive window.
//! First emitted point is at index `period - 1`.

use crate::domain::indicator::IndicatorPoint;
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> Vec<IndicatorPoint> {
    assert!(period > 0, "SMA period must be positive");

    if bars.len() < period {
        return Vec::new();
    }

    let mut values = Vec::with_capacity(bars.len() - period + 1);
    for i in (period - 1)..bars.len() {
        let window = &bars[i + 1 - period..=i];
        let mean = window.iter().map(|b| b.close).sum::<f64>() / period as f64;
        values.push(IndicatorPoint {
            date: bars[i].date,
            value: mean,
        });
    }
    values
}
