//! CSV file price source adapter.
//!
//! One file per (symbol, timeframe): `{symbol}_{timeframe}.csv` with
//! columns `date,open,high,low,close,volume`. The latest price and the
//! synthesized quote come from the daily file.

use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::domain::chart::Quote;
use crate::domain::error::ChartfolioError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::timeframe::Timeframe;
use crate::ports::price_port::PriceSource;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, timeframe: Timeframe) -> PathBuf {
        self.base_path
            .join(format!("{}_{}.csv", symbol, timeframe.as_str()))
    }

    fn parse_field<T: std::str::FromStr>(
        record: &csv::StringRecord,
        index: usize,
        name: &str,
    ) -> Result<T, ChartfolioError>
    where
        T::Err: std::fmt::Display,
    {
        record
            .get(index)
            .ok_or_else(|| ChartfolioError::Upstream {
                reason: format!("missing {name} column"),
            })?
            .parse()
            .map_err(|e| ChartfolioError::Upstream {
                reason: format!("invalid {name} value: {e}"),
            })
    }

    fn read_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<OhlcvBar>, ChartfolioError> {
        let path = self.csv_path(symbol, timeframe);
        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ChartfolioError::NoData {
                    symbol: symbol.to_string(),
                    timeframe,
                }
            } else {
                ChartfolioError::Upstream {
                    reason: format!("failed to read {}: {}", path.display(), e),
                }
            }
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| ChartfolioError::Upstream {
                reason: format!("CSV parse error: {e}"),
            })?;

            let date_str = record.get(0).ok_or_else(|| ChartfolioError::Upstream {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                ChartfolioError::Upstream {
                    reason: format!("invalid date format: {e}"),
                }
            })?;

            bars.push(OhlcvBar {
                date,
                open: Self::parse_field(&record, 1, "open")?,
                high: Self::parse_field(&record, 2, "high")?,
                low: Self::parse_field(&record, 3, "low")?,
                close: Self::parse_field(&record, 4, "close")?,
                volume: Self::parse_field(&record, 5, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

impl PriceSource for CsvPriceAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<OhlcvBar>, ChartfolioError> {
        self.read_bars(symbol, timeframe)
    }

    fn latest_price(&self, symbol: &str) -> Result<Option<f64>, ChartfolioError> {
        match self.read_bars(symbol, Timeframe::Daily) {
            Ok(bars) => Ok(bars.last().map(|b| b.close)),
            Err(ChartfolioError::NoData { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, ChartfolioError> {
        let bars = match self.read_bars(symbol, Timeframe::Daily) {
            Ok(bars) => bars,
            Err(ChartfolioError::NoData { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        let Some(last) = bars.last() else {
            return Ok(None);
        };
        let previous_close = if bars.len() >= 2 {
            bars[bars.len() - 2].close
        } else {
            last.close
        };

        let change = last.close - previous_close;
        let change_percent = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };

        Ok(Some(Quote {
            current_price: last.close,
            previous_close,
            change,
            change_percent,
            market_time: last.date.format("%Y-%m-%d").to_string(),
        }))
    }

    fn list_symbols(&self) -> Result<Vec<String>, ChartfolioError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| ChartfolioError::Upstream {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let suffix = format!("_{}.csv", Timeframe::Daily.as_str());
        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| ChartfolioError::Upstream {
                reason: format!("directory entry error: {e}"),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if name_str.ends_with(&suffix) {
                let symbol = &name_str[..name_str.len() - suffix.len()];
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}
