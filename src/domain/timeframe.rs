//! Chart timeframe (bar interval) and its wire representation.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ChartfolioError;

/// Bar interval for a price series. The wire strings (`1d`, `1wk`, `1mo`)
/// follow the upstream market-data convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Daily => "1d",
            Timeframe::Weekly => "1wk",
            Timeframe::Monthly => "1mo",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ChartfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Timeframe::Daily),
            "1wk" => Ok(Timeframe::Weekly),
            "1mo" => Ok(Timeframe::Monthly),
            other => Err(ChartfolioError::InvalidTimeframe {
                value: other.to_string(),
            }),
        }
    }
}
