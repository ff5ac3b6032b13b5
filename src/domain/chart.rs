//! Chart response assembly.
//!
//! Fixed-field response structs; serde handles the wire mapping. Dates
//! serialize as `YYYY-MM-DD` via chrono's `NaiveDate` impl, which drops
//! time-of-day by construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::error::ChartfolioError;
use crate::domain::indicator::bollinger::calculate_bollinger;
use crate::domain::indicator::ema::calculate_ema;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::volume_profile::{calculate_volume_profile, VolumeProfile};
use crate::domain::indicator::{BollingerPoint, IndicatorPoint};
use crate::domain::series::PriceSeries;
use crate::domain::timeframe::Timeframe;

/// Indicator parameters attached to every chart response.
pub const SMA_PERIODS: [usize; 3] = [25, 50, 75];
pub const EMA_PERIOD: usize = 12;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub time: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub time: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerSeries {
    pub upper: Vec<LinePoint>,
    pub middle: Vec<LinePoint>,
    pub lower: Vec<LinePoint>,
}

/// Latest-quote block, attached verbatim when the quote lookup succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub current_price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_percent: f64,
    pub market_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    pub symbol: String,
    pub data: Vec<ChartBar>,
    pub sma25: Vec<LinePoint>,
    pub sma50: Vec<LinePoint>,
    pub sma75: Vec<LinePoint>,
    pub ema: Vec<LinePoint>,
    pub bollinger: BollingerSeries,
    pub quote: Option<Quote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeProfileResponse {
    pub symbol: String,
    pub volume_profile: VolumeProfile,
}

fn line_points(points: Vec<IndicatorPoint>) -> Vec<LinePoint> {
    points
        .into_iter()
        .map(|p| LinePoint {
            time: p.date,
            value: p.value,
        })
        .collect()
}

fn bollinger_series(points: Vec<BollingerPoint>) -> BollingerSeries {
    let mut series = BollingerSeries {
        upper: Vec::with_capacity(points.len()),
        middle: Vec::with_capacity(points.len()),
        lower: Vec::with_capacity(points.len()),
    };
    for p in points {
        series.upper.push(LinePoint {
            time: p.date,
            value: p.upper,
        });
        series.middle.push(LinePoint {
            time: p.date,
            value: p.middle,
        });
        series.lower.push(LinePoint {
            time: p.date,
            value: p.lower,
        });
    }
    series
}

/// Assemble the full chart payload for one symbol/timeframe.
///
/// An empty series is NotFound for the whole request; empty indicator
/// series (short history) are per-indicator, non-fatal states. A missing
/// quote is attached as `None`, never an error.
pub fn assemble_chart(
    symbol: &str,
    timeframe: Timeframe,
    series: &PriceSeries,
    quote: Option<Quote>,
) -> Result<ChartResponse, ChartfolioError> {
    if series.is_empty() {
        return Err(ChartfolioError::NoData {
            symbol: symbol.to_string(),
            timeframe,
        });
    }

    let bars = series.bars();
    let data = bars
        .iter()
        .map(|b| ChartBar {
            time: b.date,
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
            volume: b.volume,
        })
        .collect();

    let [sma_short, sma_mid, sma_long] = SMA_PERIODS;
    Ok(ChartResponse {
        symbol: symbol.to_string(),
        data,
        sma25: line_points(calculate_sma(bars, sma_short)),
        sma50: line_points(calculate_sma(bars, sma_mid)),
        sma75: line_points(calculate_sma(bars, sma_long)),
        ema: line_points(calculate_ema(bars, EMA_PERIOD)),
        bollinger: bollinger_series(calculate_bollinger(
            bars,
            BOLLINGER_PERIOD,
            BOLLINGER_MULTIPLIER,
        )),
        quote,
    })
}

/// Assemble the volume-profile payload for one symbol.
pub fn assemble_volume_profile(
    symbol: &str,
    timeframe: Timeframe,
    series: &PriceSeries,
    bins: usize,
) -> Result<VolumeProfileResponse, ChartfolioError> {
    if series.is_empty() {
        return Err(ChartfolioError::NoData {
            symbol: symbol.to_string(),
            timeframe,
        });
    }

    Ok(VolumeProfileResponse {
        symbol: symbol.to_string(),
        volume_profile: calculate_volume_profile(series.bars(), bins)?,
    })
}
