//! Portfolio valuation orchestration.
//!
//! Degraded-data policy: a failed price lookup falls back to the holding's
//! average purchase price, absent fundamentals default to a zero dividend
//! yield, and a stock id without reference data is skipped. Each case is
//! logged; none fails the request. Only an unreachable lot store is fatal.

use crate::domain::error::ChartfolioError;
use crate::domain::portfolio::{
    build_response, pool_lots, validate_lots, value_holding, PortfolioResponse,
};
use crate::ports::price_port::PriceSource;
use crate::ports::repository_port::Repository;

pub struct PortfolioService<'a> {
    repository: &'a dyn Repository,
    prices: &'a dyn PriceSource,
}

impl<'a> PortfolioService<'a> {
    pub fn new(repository: &'a dyn Repository, prices: &'a dyn PriceSource) -> Self {
        Self { repository, prices }
    }

    pub fn valuation(&self) -> Result<PortfolioResponse, ChartfolioError> {
        let lots = self.repository.purchase_lots()?;
        validate_lots(&lots)?;

        let mut valued = Vec::new();
        for (stock_id, pool) in pool_lots(&lots) {
            let stock = match self.repository.stock(stock_id) {
                Ok(Some(stock)) => stock,
                Ok(None) => {
                    log::warn!("no stock record for id {stock_id}, skipping holding");
                    continue;
                }
                Err(e) => {
                    log::warn!("stock lookup failed for id {stock_id}, skipping holding: {e}");
                    continue;
                }
            };

            let current_price = match self.prices.latest_price(&stock.symbol) {
                Ok(Some(price)) => price,
                Ok(None) => {
                    log::warn!(
                        "no current price for {}, falling back to average purchase price",
                        stock.symbol
                    );
                    pool.average_price()
                }
                Err(e) => {
                    log::warn!(
                        "price lookup failed for {}, falling back to average purchase price: {e}",
                        stock.symbol
                    );
                    pool.average_price()
                }
            };

            let dividend_yield = match self.repository.latest_dividend_yield(&stock.symbol) {
                Ok(Some(yield_pct)) => yield_pct,
                Ok(None) => 0.0,
                Err(e) => {
                    log::warn!("fundamentals lookup failed for {}: {e}", stock.symbol);
                    0.0
                }
            };

            valued.push(value_holding(stock, &pool, current_price, dividend_yield));
        }

        Ok(build_response(valued))
    }
}
