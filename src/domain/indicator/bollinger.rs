//! Bollinger Bands.
//!
//! Middle = SMA over `period` closes; band width = `multiplier` times the
//! population standard deviation (divides by N, not N-1) of the same
//! trailing window. Shares the SMA warm-up gap: first emitted point is at
//! index `period - 1`.

use crate::domain::indicator::BollingerPoint;
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_bollinger(
    bars: &[OhlcvBar],
    period: usize,
    multiplier: f64,
) -> Vec<BollingerPoint> {
    assert!(period > 0, "Bollinger period must be positive");

    if bars.len() < period {
        return Vec::new();
    }

    let mut values = Vec::with_capacity(bars.len() - period + 1);
    for i in (period - 1)..bars.len() {
        let window = &bars[i + 1 - period..=i];

        let middle = window.iter().map(|b| b.close).sum::<f64>() / period as f64;
        let variance = window
            .iter()
            .map(|b| {
                let diff = b.close - middle;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        let width = multiplier * variance.sqrt();

        values.push(BollingerPoint {
            date: bars[i].date,
            upper: middle + width,
            middle,
            lower: middle - width,
        });
    }
    values
}
