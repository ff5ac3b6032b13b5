//! MACD (Moving Average Convergence/Divergence).
//!
//! macd = EMA(fast) - EMA(slow); signal = EMA(signal) over the macd line;
//! histogram = macd - signal. Because EMA has no warm-up gap, MACD emits
//! from the first bar; early values are numerically unstable until both
//! EMAs have seen enough data, which is expected behavior.

use crate::domain::indicator::ema::ema_values;
use crate::domain::indicator::MacdPoint;
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_macd(
    bars: &[OhlcvBar],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Vec<MacdPoint> {
    assert!(
        fast > 0 && slow > 0 && signal > 0,
        "MACD periods must be positive"
    );

    if bars.is_empty() {
        return Vec::new();
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let fast_ema = ema_values(&closes, fast);
    let slow_ema = ema_values(&closes, slow);

    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_values(&macd_line, signal);

    bars.iter()
        .enumerate()
        .map(|(i, bar)| MacdPoint {
            date: bar.date,
            macd: macd_line[i],
            signal: signal_line[i],
            histogram: macd_line[i] - signal_line[i],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(prices: &[f64]) -> Vec<OhlcvBar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn macd_emits_from_first_bar() {
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        let series = calculate_macd(&bars, 12, 26, 9);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn macd_first_point_is_zero() {
        // Both EMAs seed with the first close, so their difference starts
        // at zero.
        let bars = make_bars(&[100.0, 105.0, 102.0]);
        let series = calculate_macd(&bars, 12, 26, 9);

        assert!((series[0].macd - 0.0).abs() < f64::EPSILON);
        assert!((series[0].signal - 0.0).abs() < f64::EPSILON);
        assert!((series[0].histogram - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn macd_histogram_identity_holds_everywhere() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 10.0)
            .collect();
        let bars = make_bars(&closes);
        let series = calculate_macd(&bars, 12, 26, 9);

        for point in &series {
            assert!((point.histogram - (point.macd - point.signal)).abs() < 1e-10);
        }
    }

    #[test]
    fn macd_flat_series_is_zero() {
        let bars = make_bars(&[100.0; 40]);
        let series = calculate_macd(&bars, 12, 26, 9);

        for point in &series {
            assert!((point.macd - 0.0).abs() < 1e-10);
            assert!((point.signal - 0.0).abs() < 1e-10);
        }
    }

    #[test]
    fn macd_positive_in_uptrend() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 2.0).collect();
        let bars = make_bars(&closes);
        let series = calculate_macd(&bars, 12, 26, 9);

        // The fast EMA tracks a steady rise more closely than the slow one.
        assert!(series.last().unwrap().macd > 0.0);
    }

    #[test]
    fn macd_empty_bars() {
        assert!(calculate_macd(&[], 12, 26, 9).is_empty());
    }

    #[test]
    #[should_panic(expected = "periods must be positive")]
    fn macd_zero_period_panics() {
        let bars = make_bars(&[100.0]);
        calculate_macd(&bars, 12, 0, 9);
    }
}
