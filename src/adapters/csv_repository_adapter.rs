//! CSV file repository adapter.
//!
//! Three files under one directory: `stocks.csv` (id,symbol,name,sector),
//! `purchases.csv` (stock_id,quantity,unit_price,date) and
//! `fundamentals.csv` (symbol,date,dividend_yield). An absent purchases or
//! fundamentals file reads as empty; a present-but-malformed file is an
//! upstream error.

use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::domain::error::ChartfolioError;
use crate::domain::portfolio::{PurchaseLot, StockRef};
use crate::ports::repository_port::Repository;

pub struct CsvRepositoryAdapter {
    base_path: PathBuf,
}

impl CsvRepositoryAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn read_file(&self, name: &str) -> Result<Option<String>, ChartfolioError> {
        let path = self.base_path.join(name);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ChartfolioError::Upstream {
                reason: format!("failed to read {}: {}", path.display(), e),
            }),
        }
    }

    fn field<'r>(
        record: &'r csv::StringRecord,
        index: usize,
        name: &str,
    ) -> Result<&'r str, ChartfolioError> {
        record.get(index).ok_or_else(|| ChartfolioError::Upstream {
            reason: format!("missing {name} column"),
        })
    }

    fn parse<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, ChartfolioError>
    where
        T::Err: std::fmt::Display,
    {
        value.parse().map_err(|e| ChartfolioError::Upstream {
            reason: format!("invalid {name} value '{value}': {e}"),
        })
    }

    fn parse_date(value: &str, name: &str) -> Result<NaiveDate, ChartfolioError> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| ChartfolioError::Upstream {
            reason: format!("invalid {name} value '{value}': {e}"),
        })
    }
}

impl Repository for CsvRepositoryAdapter {
    fn purchase_lots(&self) -> Result<Vec<PurchaseLot>, ChartfolioError> {
        let Some(content) = self.read_file("purchases.csv")? else {
            return Ok(Vec::new());
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut lots = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| ChartfolioError::Upstream {
                reason: format!("CSV parse error in purchases.csv: {e}"),
            })?;

            lots.push(PurchaseLot {
                stock_id: Self::parse(Self::field(&record, 0, "stock_id")?, "stock_id")?,
                quantity: Self::parse(Self::field(&record, 1, "quantity")?, "quantity")?,
                unit_price: Self::parse(Self::field(&record, 2, "unit_price")?, "unit_price")?,
                date: Self::parse_date(Self::field(&record, 3, "date")?, "date")?,
            });
        }
        Ok(lots)
    }

    fn stock(&self, stock_id: i64) -> Result<Option<StockRef>, ChartfolioError> {
        let Some(content) = self.read_file("stocks.csv")? else {
            return Ok(None);
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        for result in rdr.records() {
            let record = result.map_err(|e| ChartfolioError::Upstream {
                reason: format!("CSV parse error in stocks.csv: {e}"),
            })?;

            let id: i64 = Self::parse(Self::field(&record, 0, "id")?, "id")?;
            if id != stock_id {
                continue;
            }

            let sector = Self::field(&record, 3, "sector")?;
            return Ok(Some(StockRef {
                id,
                symbol: Self::field(&record, 1, "symbol")?.to_string(),
                name: Self::field(&record, 2, "name")?.to_string(),
                sector: if sector.is_empty() {
                    None
                } else {
                    Some(sector.to_string())
                },
            }));
        }
        Ok(None)
    }

    fn latest_dividend_yield(&self, symbol: &str) -> Result<Option<f64>, ChartfolioError> {
        let Some(content) = self.read_file("fundamentals.csv")? else {
            return Ok(None);
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut latest: Option<(NaiveDate, f64)> = None;

        for result in rdr.records() {
            let record = result.map_err(|e| ChartfolioError::Upstream {
                reason: format!("CSV parse error in fundamentals.csv: {e}"),
            })?;

            if Self::field(&record, 0, "symbol")? != symbol {
                continue;
            }

            let date = Self::parse_date(Self::field(&record, 1, "date")?, "date")?;
            let yield_pct: f64 =
                Self::parse(Self::field(&record, 2, "dividend_yield")?, "dividend_yield")?;

            if latest.map_or(true, |(d, _)| date > d) {
                latest = Some((date, yield_pct));
            }
        }
        Ok(latest.map(|(_, y)| y))
    }
}
