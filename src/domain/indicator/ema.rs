//! Exponential Moving Average.
//!
//! k = 2/(n+1), seeded with the first value, EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! Unlike the window indicators, EMA is defined from the first bar onward:
//! there is no warm-up gap.

use crate::domain::indicator::IndicatorPoint;
use crate::domain::ohlcv::OhlcvBar;

/// EMA recursion over raw values. Shared with the MACD signal line, which
/// smooths a derived series rather than closes.
pub(crate) fn ema_values(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period > 0, "EMA period must be positive");

    let mut out = Vec::with_capacity(values.len());
    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = 0.0;

    for (i, &value) in values.iter().enumerate() {
        ema = if i == 0 {
            value
        } else {
            value * k + ema * (1.0 - k)
        };
        out.push(ema);
    }
    out
}

pub fn calculate_ema(bars: &[OhlcvBar], period: usize) -> Vec<IndicatorPoint> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    ema_values(&closes, period)
        .into_iter()
        .zip(bars)
        .map(|(value, bar)| IndicatorPoint {
            date: bar.date,
            value,
        })
        .collect()
}
