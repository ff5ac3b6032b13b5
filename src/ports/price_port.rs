//! Market-data access port trait.

use crate::domain::chart::Quote;
use crate::domain::error::ChartfolioError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::timeframe::Timeframe;

/// Opaque OHLCV and quote retrieval. Implementations own their transport,
/// timeouts and retries; the core only sees bars and quotes.
pub trait PriceSource {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<OhlcvBar>, ChartfolioError>;

    fn latest_price(&self, symbol: &str) -> Result<Option<f64>, ChartfolioError>;

    fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, ChartfolioError>;

    fn list_symbols(&self) -> Result<Vec<String>, ChartfolioError>;
}
