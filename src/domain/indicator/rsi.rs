//! RSI (Relative Strength Index).
//!
//! Gains and losses are split from consecutive close deltas, then averaged
//! with a trailing simple mean over `period` deltas (rolling mean, not
//! Wilder smoothing). RSI = 100 - 100/(1 + avg_gain/avg_loss), saturating
//! at 100 when the window has no losses. One bar is lost to the diff, so
//! the first emitted point is at index `period`.

use crate::domain::indicator::IndicatorPoint;
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> Vec<IndicatorPoint> {
    assert!(period > 0, "RSI period must be positive");

    if bars.len() <= period {
        return Vec::new();
    }

    let mut gains = Vec::with_capacity(bars.len() - 1);
    let mut losses = Vec::with_capacity(bars.len() - 1);
    for i in 1..bars.len() {
        let delta = bars[i].close - bars[i - 1].close;
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    let mut values = Vec::with_capacity(bars.len() - period);
    for i in period..bars.len() {
        // Deltas d[j] pair bars j and j+1, so bar i closes the window
        // gains[i-period..i].
        let avg_gain = gains[i - period..i].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[i - period..i].iter().sum::<f64>() / period as f64;

        let rsi = if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        };

        values.push(IndicatorPoint {
            date: bars[i].date,
            value: rsi,
        });
    }
    values
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
    fn rsi_emits_one_bar_after_sma_would() {
        let bars = make_bars(&[100.0, 101.0, 102.0, 101.0, 103.0, 104.0]);
        let series = calculate_rsi(&bars, 3);

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, bars[3].date);
    }

    #[test]
    fn rsi_all_gains_saturates_at_100() {
        let bars: Vec<OhlcvBar> =
            make_bars(&(0..15).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
        let series = calculate_rsi(&bars, 14);

        assert!((series[0].value - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_all_losses_is_zero() {
        let bars: Vec<OhlcvBar> =
            make_bars(&(0..15).map(|i| 100.0 - i as f64).collect::<Vec<_>>());
        let series = calculate_rsi(&bars, 14);

        assert!((series[0].value - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_flat_series_has_no_losses() {
        let bars = make_bars(&[100.0; 16]);
        let series = calculate_rsi(&bars, 14);

        // Zero gain and zero loss counts as the no-loss saturation case.
        for point in &series {
            assert!((point.value - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn rsi_stays_in_range() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + ((i * 7) % 13) as f64 - 6.0)
            .collect();
        let bars = make_bars(&closes);
        let series = calculate_rsi(&bars, 14);

        assert!(!series.is_empty());
        for point in &series {
            assert!(point.value >= 0.0 && point.value <= 100.0);
        }
    }

    #[test]
    fn rsi_known_window() {
        // Deltas: +2, -1, +2 with period 3: avg_gain = 4/3, avg_loss = 1/3.
        let bars = make_bars(&[100.0, 102.0, 101.0, 103.0]);
        let series = calculate_rsi(&bars, 3);

        assert_eq!(series.len(), 1);
        let rs: f64 = (4.0 / 3.0) / (1.0 / 3.0);
        let expected = 100.0 - 100.0 / (1.0 + rs);
        assert!((series[0].value - expected).abs() < 1e-10);
    }

    #[test]
    fn rsi_uses_trailing_window_only() {
        // A large early loss must fall out of the window once period deltas
        // have passed it.
        let bars = make_bars(&[100.0, 50.0, 51.0, 52.0, 53.0, 54.0]);
        let series = calculate_rsi(&bars, 3);

        let last = series.last().unwrap();
        assert!((last.value - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rsi_insufficient_bars() {
        let bars = make_bars(&[100.0, 101.0, 102.0]);
        assert!(calculate_rsi(&bars, 3).is_empty());
    }

    #[test]
    fn rsi_empty_bars() {
        assert!(calculate_rsi(&[], 14).is_empty());
    }

    #[test]
    #[should_panic(expected = "period must be positive")]
    fn rsi_zero_period_panics() {
        let bars = make_bars(&[100.0, 101.0]);
        calculate_rsi(&bars, 0);
    }
}
