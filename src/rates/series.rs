//! Reference-rate series keyed by business day
//!
//! The series is the engine's whole notion of a calendar: a date appears in
//! it exactly when that date is a business day with a published rate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single published rate observation as supplied by the caller.
///
/// The rate may arrive in percentage form (`5.25`) or already-fractional
/// form (`0.0525`); see [`normalize_rate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRecord {
    /// Publication business day.
    pub date: NaiveDate,
    /// Raw rate value as supplied.
    pub rate: Decimal,
}

/// Normalize a raw rate input to fractional form.
///
/// Values greater than 1 are interpreted as percentages and divided by 100;
/// values less than or equal to 1 are taken as already fractional. Every
/// ingestion path (JSON array, CSV, CLI flags) must apply this identically.
pub fn normalize_rate(raw: Decimal) -> Decimal {
    if raw > Decimal::ONE {
        raw / Decimal::ONE_HUNDRED
    } else {
        raw
    }
}

/// An ordered, deduplicated mapping from business day to fractional rate.
///
/// Keys are strictly increasing and rates are stored in fractional form.
/// Built once per computation from caller input and immutable thereafter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSeries {
    rates: BTreeMap<NaiveDate, Decimal>,
}

impl RateSeries {
    /// Build a series from raw records, normalizing each rate.
    ///
    /// Repeated dates keep the last record, matching the ingestion rule of
    /// the upstream feeds this engine consumes.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RateRecord>,
    {
        let mut rates = BTreeMap::new();
        for record in records {
            rates.insert(record.date, normalize_rate(record.rate));
        }
        Self { rates }
    }

    /// The fractional rate published on an exact business day, if any.
    pub fn rate(&self, date: NaiveDate) -> Option<Decimal> {
        self.rates.get(&date).copied()
    }

    /// Latest date present in the series.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.rates.keys().next_back().copied()
    }

    /// Number of business days in the series.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Business days in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rates.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_rate() {
        assert_eq!(normalize_rate(dec!(5.25)), dec!(0.0525));
        assert_eq!(normalize_rate(dec!(0.0525)), dec!(0.0525));
        // Exactly 1 means 100%, already fractional
        assert_eq!(normalize_rate(dec!(1)), dec!(1));
        assert_eq!(normalize_rate(dec!(1.01)), dec!(0.0101));
    }

    #[test]
    fn test_from_records_sorts_and_normalizes() {
        let series = RateSeries::from_records(vec![
            RateRecord { date: date(2024, 1, 3), rate: dec!(5.25) },
            RateRecord { date: date(2024, 1, 2), rate: dec!(0.05) },
        ]);

        assert_eq!(series.len(), 2);
        let dates: Vec<NaiveDate> = series.dates().collect();
        assert_eq!(dates, vec![date(2024, 1, 2), date(2024, 1, 3)]);
        assert_eq!(series.rate(date(2024, 1, 2)), Some(dec!(0.05)));
        assert_eq!(series.rate(date(2024, 1, 3)), Some(dec!(0.0525)));
    }

    #[test]
    fn test_duplicate_dates_last_wins() {
        let series = RateSeries::from_records(vec![
            RateRecord { date: date(2024, 1, 2), rate: dec!(5.0) },
            RateRecord { date: date(2024, 1, 2), rate: dec!(5.5) },
        ]);

        assert_eq!(series.len(), 1);
        assert_eq!(series.rate(date(2024, 1, 2)), Some(dec!(0.055)));
    }

    #[test]
    fn test_latest_date() {
        assert_eq!(RateSeries::default().latest_date(), None);

        let series = RateSeries::from_records(vec![
            RateRecord { date: date(2024, 1, 2), rate: dec!(0.05) },
            RateRecord { date: date(2024, 1, 5), rate: dec!(0.05) },
        ]);
        assert_eq!(series.latest_date(), Some(date(2024, 1, 5)));
    }

    #[test]
    fn test_missing_date_is_none() {
        let series = RateSeries::from_records(vec![RateRecord {
            date: date(2024, 1, 2),
            rate: dec!(0.05),
        }]);
        assert_eq!(series.rate(date(2024, 1, 3)), None);
    }
}
