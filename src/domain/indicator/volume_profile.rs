//! Volume profile: traded volume aggregated across price levels.
//!
//! The [min(low), max(high)] range is split into `bins` equal-width bins;
//! the level of bin b is `price_min + b * bin_size`. A bar contributes its
//! full volume to every bin whose level falls inside the bar's [low, high]
//! range, so one bar may be counted in several bins and the per-bin total
//! can exceed the summed bar volume.

use serde::{Deserialize, Serialize};

use crate::domain::error::ChartfolioError;
use crate::domain::ohlcv::OhlcvBar;

/// Parallel price-level / volume arrays of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfile {
    pub prices: Vec<f64>,
    pub volumes: Vec<u64>,
}

pub fn calculate_volume_profile(
    bars: &[OhlcvBar],
    bins: usize,
) -> Result<VolumeProfile, ChartfolioError> {
    if bins == 0 {
        return Err(ChartfolioError::InvalidBins { bins });
    }
    if bars.is_empty() {
        return Ok(VolumeProfile {
            prices: Vec::new(),
            volumes: Vec::new(),
        });
    }

    let price_min = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let price_max = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    if price_max <= price_min {
        return Err(ChartfolioError::DegenerateSeries {
            reason: format!("flat price range at {price_min}"),
        });
    }

    let bin_size = (price_max - price_min) / bins as f64;
    let mut prices = Vec::with_capacity(bins);
    let mut volumes = Vec::with_capacity(bins);

    for b in 0..bins {
        let level = price_min + b as f64 * bin_size;
        let volume: u64 = bars
            .iter()
            .filter(|bar| bar.low <= level && bar.high >= level)
            .map(|bar| bar.volume)
            .sum();
        prices.push(level);
        volumes.push(volume);
    }

    Ok(VolumeProfile { prices, volumes })
}
