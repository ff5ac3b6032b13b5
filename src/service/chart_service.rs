//! Chart request orchestration.
//!
//! Cache-first: a fresh cached payload is returned without touching the
//! price source. The cache is an optimization only: a malformed or
//! missing entry, or a failing backend, falls through to a full
//! recomputation. Concurrent identical requests may compute twice; there
//! is deliberately no single-flight lock.

use std::time::Duration;

use crate::domain::chart::{
    assemble_chart, assemble_volume_profile, ChartResponse, VolumeProfileResponse,
};
use crate::domain::error::ChartfolioError;
use crate::domain::series::PriceSeries;
use crate::domain::timeframe::Timeframe;
use crate::ports::cache_port::ResultCache;
use crate::ports::price_port::PriceSource;

/// Freshness window for chart payloads.
pub const CHART_CACHE_TTL: Duration = Duration::from_secs(300);

/// Accepted volume-profile bin counts.
pub const MIN_BINS: usize = 10;
pub const MAX_BINS: usize = 100;
pub const DEFAULT_BINS: usize = 50;

pub fn chart_cache_key(symbol: &str, timeframe: Timeframe) -> String {
    format!("chart:{symbol}:{timeframe}")
}

pub struct ChartService<'a> {
    prices: &'a dyn PriceSource,
    cache: &'a dyn ResultCache,
    ttl: Duration,
}

impl<'a> ChartService<'a> {
    pub fn new(prices: &'a dyn PriceSource, cache: &'a dyn ResultCache) -> Self {
        Self {
            prices,
            cache,
            ttl: CHART_CACHE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn chart(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<ChartResponse, ChartfolioError> {
        let key = chart_cache_key(symbol, timeframe);

        if let Some(payload) = self.cache.get(&key) {
            match serde_json::from_str(&payload) {
                Ok(response) => {
                    log::debug!("cache hit for {key}");
                    return Ok(response);
                }
                Err(e) => log::warn!("discarding malformed cache entry for {key}: {e}"),
            }
        }
        log::debug!("cache miss for {key}");

        let bars = self.prices.fetch_ohlcv(symbol, timeframe)?;
        let series = PriceSeries::from_bars(bars);

        // A failed quote lookup degrades to a null quote field, it never
        // fails the chart request.
        let quote = match self.prices.latest_quote(symbol) {
            Ok(quote) => quote,
            Err(e) => {
                log::warn!("quote lookup failed for {symbol}: {e}");
                None
            }
        };

        let response = assemble_chart(symbol, timeframe, &series, quote)?;

        match serde_json::to_string(&response) {
            Ok(payload) => self.cache.put(&key, &payload, self.ttl),
            Err(e) => log::warn!("failed to serialize chart payload for {key}: {e}"),
        }

        Ok(response)
    }

    pub fn volume_profile(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        bins: usize,
    ) -> Result<VolumeProfileResponse, ChartfolioError> {
        if !(MIN_BINS..=MAX_BINS).contains(&bins) {
            return Err(ChartfolioError::InvalidBins { bins });
        }

        let bars = self.prices.fetch_ohlcv(symbol, timeframe)?;
        let series = PriceSeries::from_bars(bars);
        assemble_volume_profile(symbol, timeframe, &series, bins)
    }
}
