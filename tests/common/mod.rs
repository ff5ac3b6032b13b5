#![allow(dead_code)]

use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::HashMap;

use chartfolio::domain::chart::Quote;
use chartfolio::domain::error::ChartfolioError;
pub use chartfolio::domain::ohlcv::OhlcvBar;
use chartfolio::domain::portfolio::{PurchaseLot, StockRef};
use chartfolio::domain::timeframe::Timeframe;
use chartfolio::ports::price_port::PriceSource;
use chartfolio::ports::repository_port::Repository;

pub struct MockPriceSource {
    pub bars: HashMap<(String, Timeframe), Vec<OhlcvBar>>,
    pub prices: HashMap<String, f64>,
    pub quotes: HashMap<String, Quote>,
    pub failing_lookups: Vec<String>,
    pub fetch_calls: RefCell<usize>,
}

impl MockPriceSource {
    pub fn new() -> Self {
        Self {
            bars: HashMap::new(),
            prices: HashMap::new(),
            quotes: HashMap::new(),
            failing_lookups: Vec::new(),
            fetch_calls: RefCell::new(0),
        }
    }

    pub fn with_bars(mut self, symbol: &str, timeframe: Timeframe, bars: Vec<OhlcvBar>) -> Self {
        self.bars.insert((symbol.to_string(), timeframe), bars);
        self
    }

    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    pub fn with_quote(mut self, symbol: &str, quote: Quote) -> Self {
        self.quotes.insert(symbol.to_string(), quote);
        self
    }

    /// Make latest_price/latest_quote fail for the symbol.
    pub fn with_failing_lookup(mut self, symbol: &str) -> Self {
        self.failing_lookups.push(symbol.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetch_calls.borrow()
    }
}

impl PriceSource for MockPriceSource {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<OhlcvBar>, ChartfolioError> {
        *self.fetch_calls.borrow_mut() += 1;
        Ok(self
            .bars
            .get(&(symbol.to_string(), timeframe))
            .cloned()
            .unwrap_or_default())
    }

    fn latest_price(&self, symbol: &str) -> Result<Option<f64>, ChartfolioError> {
        if self.failing_lookups.iter().any(|s| s == symbol) {
            return Err(ChartfolioError::Upstream {
                reason: format!("price feed down for {symbol}"),
            });
        }
        Ok(self.prices.get(symbol).copied())
    }

    fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, ChartfolioError> {
        if self.failing_lookups.iter().any(|s| s == symbol) {
            return Err(ChartfolioError::Upstream {
                reason: format!("quote feed down for {symbol}"),
            });
        }
        Ok(self.quotes.get(symbol).cloned())
    }

    fn list_symbols(&self) -> Result<Vec<String>, ChartfolioError> {
        let mut symbols: Vec<String> = self.bars.keys().map(|(s, _)| s.clone()).collect();
        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}

pub struct MockRepository {
    pub lots: Vec<PurchaseLot>,
    pub stocks: HashMap<i64, StockRef>,
    pub yields: HashMap<String, f64>,
    pub lots_unavailable: bool,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            lots: Vec::new(),
            stocks: HashMap::new(),
            yields: HashMap::new(),
            lots_unavailable: false,
        }
    }

    pub fn with_lot(mut self, stock_id: i64, quantity: u32, unit_price: f64) -> Self {
        self.lots.push(PurchaseLot {
            stock_id,
            quantity,
            unit_price,
            date: date(2024, 1, 15),
        });
        self
    }

    pub fn with_stock(mut self, id: i64, symbol: &str, name: &str) -> Self {
        self.stocks.insert(
            id,
            StockRef {
                id,
                symbol: symbol.to_string(),
                name: name.to_string(),
                sector: Some("Technology".to_string()),
            },
        );
        self
    }

    pub fn with_yield(mut self, symbol: &str, yield_pct: f64) -> Self {
        self.yields.insert(symbol.to_string(), yield_pct);
        self
    }

    pub fn with_unavailable_lots(mut self) -> Self {
        self.lots_unavailable = true;
        self
    }
}

impl Repository for MockRepository {
    fn purchase_lots(&self) -> Result<Vec<PurchaseLot>, ChartfolioError> {
        if self.lots_unavailable {
            return Err(ChartfolioError::Upstream {
                reason: "lot store unreachable".into(),
            });
        }
        Ok(self.lots.clone())
    }

    fn stock(&self, stock_id: i64) -> Result<Option<StockRef>, ChartfolioError> {
        Ok(self.stocks.get(&stock_id).cloned())
    }

    fn latest_dividend_yield(&self, symbol: &str) -> Result<Option<f64>, ChartfolioError> {
        Ok(self.yields.get(symbol).copied())
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn make_bar(day: &str, close: f64) -> OhlcvBar {
    OhlcvBar {
        date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

/// `count` consecutive daily bars starting at `start`, closes oscillating
/// around `base`.
pub fn generate_bars(start: &str, count: usize, base: f64) -> Vec<OhlcvBar> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| {
            let close = base + ((i * 3) % 11) as f64 - 5.0;
            OhlcvBar {
                date: start
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap(),
                open: close - 0.5,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1000 + (i as u64 * 10),
            }
        })
        .collect()
}

pub fn sample_quote() -> Quote {
    Quote {
        current_price: 115.0,
        previous_close: 110.0,
        change: 5.0,
        change_percent: 4.55,
        market_time: "2024-03-01".into(),
    }
}
