//! Portfolio valuation: lot pooling, per-holding math, summary totals.
//!
//! Lots for one stock are pooled at average cost; no FIFO/LIFO lot
//! tracking. Monetary fields are carried at full precision through
//! aggregation and rounded to 2 decimals only when the response structs
//! are built, so weights and totals never compound rounding error.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::error::ChartfolioError;

/// One purchase transaction record.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseLot {
    pub stock_id: i64,
    pub quantity: u32,
    pub unit_price: f64,
    pub date: NaiveDate,
}

/// Stock reference data resolved through the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct StockRef {
    pub id: i64,
    pub symbol: String,
    pub name: String,
    pub sector: Option<String>,
}

/// Pooled lot totals for one stock, full precision.
#[derive(Debug, Clone, PartialEq)]
pub struct PooledLots {
    pub total_quantity: u64,
    pub total_cost: f64,
}

impl PooledLots {
    pub fn average_price(&self) -> f64 {
        if self.total_quantity == 0 {
            0.0
        } else {
            self.total_cost / self.total_quantity as f64
        }
    }
}

/// One fully valued holding, full precision. Weight is assigned later,
/// once the portfolio total is known.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuedHolding {
    pub stock: StockRef,
    pub total_quantity: u64,
    pub average_price: f64,
    pub total_cost: f64,
    pub current_price: f64,
    pub current_value: f64,
    pub profit_loss: f64,
    pub profit_loss_rate: f64,
    pub dividend_yield: f64,
    pub annual_dividend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub stock_id: i64,
    pub symbol: String,
    pub name: String,
    pub sector: Option<String>,
    pub total_quantity: u64,
    pub average_price: f64,
    pub total_cost: f64,
    pub current_price: f64,
    pub current_value: f64,
    pub profit_loss: f64,
    pub profit_loss_rate: f64,
    pub dividend_yield: f64,
    pub annual_dividend: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_cost: f64,
    pub total_profit_loss: f64,
    pub profit_loss_rate: f64,
    pub total_annual_dividend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioResponse {
    pub summary: PortfolioSummary,
    pub holdings: Vec<Holding>,
}

/// Round to 2 decimals. Applied at the response boundary only.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reject malformed lots before any computation.
pub fn validate_lots(lots: &[PurchaseLot]) -> Result<(), ChartfolioError> {
    for lot in lots {
        if lot.quantity == 0 {
            return Err(ChartfolioError::InvalidLot {
                stock_id: lot.stock_id,
                reason: "quantity must be positive".into(),
            });
        }
        if lot.unit_price <= 0.0 {
            return Err(ChartfolioError::InvalidLot {
                stock_id: lot.stock_id,
                reason: format!("unit price must be positive, got {}", lot.unit_price),
            });
        }
    }
    Ok(())
}

/// Pool lots by stock id in ascending id order.
pub fn pool_lots(lots: &[PurchaseLot]) -> BTreeMap<i64, PooledLots> {
    let mut pools: BTreeMap<i64, PooledLots> = BTreeMap::new();
    for lot in lots {
        let pool = pools.entry(lot.stock_id).or_insert(PooledLots {
            total_quantity: 0,
            total_cost: 0.0,
        });
        pool.total_quantity += u64::from(lot.quantity);
        pool.total_cost += f64::from(lot.quantity) * lot.unit_price;
    }
    pools
}

/// Value one pooled holding at the given current price and dividend yield.
pub fn value_holding(
    stock: StockRef,
    pool: &PooledLots,
    current_price: f64,
    dividend_yield: f64,
) -> ValuedHolding {
    let current_value = current_price * pool.total_quantity as f64;
    let profit_loss = current_value - pool.total_cost;
    let profit_loss_rate = if pool.total_cost > 0.0 {
        profit_loss / pool.total_cost * 100.0
    } else {
        0.0
    };
    let annual_dividend = current_value * (dividend_yield / 100.0);

    ValuedHolding {
        stock,
        total_quantity: pool.total_quantity,
        average_price: pool.average_price(),
        total_cost: pool.total_cost,
        current_price,
        current_value,
        profit_loss,
        profit_loss_rate,
        dividend_yield,
        annual_dividend,
    }
}

/// Compute portfolio totals and per-holding weights, then round everything
/// for the response. An empty holding list yields an all-zero summary.
pub fn build_response(valued: Vec<ValuedHolding>) -> PortfolioResponse {
    let total_value: f64 = valued.iter().map(|h| h.current_value).sum();
    let total_cost: f64 = valued.iter().map(|h| h.total_cost).sum();
    let total_annual_dividend: f64 = valued.iter().map(|h| h.annual_dividend).sum();
    let total_profit_loss = total_value - total_cost;
    let profit_loss_rate = if total_cost > 0.0 {
        total_profit_loss / total_cost * 100.0
    } else {
        0.0
    };

    let holdings = valued
        .into_iter()
        .map(|h| {
            let weight = if total_value > 0.0 {
                h.current_value / total_value * 100.0
            } else {
                0.0
            };
            Holding {
                stock_id: h.stock.id,
                symbol: h.stock.symbol,
                name: h.stock.name,
                sector: h.stock.sector,
                total_quantity: h.total_quantity,
                average_price: round2(h.average_price),
                total_cost: round2(h.total_cost),
                current_price: round2(h.current_price),
                current_value: round2(h.current_value),
                profit_loss: round2(h.profit_loss),
                profit_loss_rate: round2(h.profit_loss_rate),
                dividend_yield: round2(h.dividend_yield),
                annual_dividend: round2(h.annual_dividend),
                weight: round2(weight),
            }
        })
        .collect();

    PortfolioResponse {
        summary: PortfolioSummary {
            total_value: round2(total_value),
            total_cost: round2(total_cost),
            total_profit_loss: round2(total_profit_loss),
            profit_loss_rate: round2(profit_loss_rate),
            total_annual_dividend: round2(total_annual_dividend),
        },
        holdings,
    }
}
