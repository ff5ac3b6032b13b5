//! Persistent-store access port trait.

use crate::domain::error::ChartfolioError;
use crate::domain::portfolio::{PurchaseLot, StockRef};

/// Purchase lots, stock reference data and fundamentals. CRUD beyond what
/// the valuation path reads is the store's own concern.
pub trait Repository {
    fn purchase_lots(&self) -> Result<Vec<PurchaseLot>, ChartfolioError>;

    fn stock(&self, stock_id: i64) -> Result<Option<StockRef>, ChartfolioError>;

    /// Most recent dividend yield (percent) on record for the symbol.
    fn latest_dividend_yield(&self, symbol: &str) -> Result<Option<f64>, ChartfolioError>;
}
