//! Price series normalization and access.

use chrono::NaiveDate;

use crate::domain::ohlcv::OhlcvBar;

/// An ordered, gap-tolerant sequence of OHLCV bars for one symbol/interval.
///
/// Construction sorts ascending by date and drops duplicate dates, so the
/// invariant "strictly increasing, unique dates" holds regardless of
/// upstream ordering. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<OhlcvBar>,
}

impl PriceSeries {
    /// Normalize raw bars into a series. The sort is stable, so for
    /// duplicate dates the first bar in upstream order wins.
    pub fn from_bars(mut bars: Vec<OhlcvBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);
        Self { bars }
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bar(date: &str, close: f64) -> OhlcvBar {
        OhlcvBar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: close - 1.0,
            high: close + 1.0,
            low: close - 2.0,
            close,
            volume: 1000,
        }
    }

    #[test]
    fn sorts_ascending_by_date() {
        let series = PriceSeries::from_bars(vec![
            make_bar("2024-01-17", 3.0),
            make_bar("2024-01-15", 1.0),
            make_bar("2024-01-16", 2.0),
        ]);

        let dates: Vec<NaiveDate> = series.bars().iter().map(|b| b.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
            ]
        );
    }

    #[test]
    fn drops_duplicate_dates_keeping_first() {
        let series = PriceSeries::from_bars(vec![
            make_bar("2024-01-15", 1.0),
            make_bar("2024-01-16", 2.0),
            make_bar("2024-01-15", 9.0),
        ]);

        assert_eq!(series.len(), 2);
        assert!((series.bars()[0].close - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_series() {
        let series = PriceSeries::from_bars(vec![]);
        assert!(series.is_empty());
        assert_eq!(series.first_date(), None);
        assert_eq!(series.last_date(), None);
    }

    #[test]
    fn date_range() {
        let series = PriceSeries::from_bars(vec![
            make_bar("2024-01-16", 2.0),
            make_bar("2024-01-15", 1.0),
        ]);
        assert_eq!(
            series.first_date(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(
            series.last_date(),
            Some(NaiveDate::from_ymd_opt(2024, 1, 16).unwrap())
        );
    }
}
