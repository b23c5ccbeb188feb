//! Load rate series from CSV files or JSON arrays
//!
//! Both paths deserialize into [`RateRecord`] and build the series through
//! [`RateSeries::from_records`], so percentage-vs-fraction normalization is
//! applied identically regardless of the input format.

use super::{RateRecord, RateSeries};
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Load a rate series from a headered CSV file (`date,rate` columns).
pub fn load_rates<P: AsRef<Path>>(path: P) -> Result<RateSeries, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut records = Vec::new();

    for result in reader.deserialize() {
        let record: RateRecord = result?;
        records.push(record);
    }

    log::debug!("loaded {} rate observations from csv", records.len());
    Ok(RateSeries::from_records(records))
}

/// Load a rate series from any reader (e.g., string buffer, network stream).
pub fn load_rates_from_reader<R: std::io::Read>(reader: R) -> Result<RateSeries, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: RateRecord = result?;
        records.push(record);
    }

    Ok(RateSeries::from_records(records))
}

/// Build a rate series from a JSON array of `{"date": ..., "rate": ...}`.
pub fn rates_from_json(json: &str) -> Result<RateSeries, Box<dyn Error>> {
    let records: Vec<RateRecord> = serde_json::from_str(json)?;
    log::debug!("loaded {} rate observations from json", records.len());
    Ok(RateSeries::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const CSV_RATES: &str = "\
date,rate
2024-01-02,5.25
2024-01-03,5.25
2024-01-04,5.0
2024-01-05,4.75
";

    const JSON_RATES: &str = r#"[
        {"date": "2024-01-02", "rate": 5.25},
        {"date": "2024-01-03", "rate": 5.25},
        {"date": "2024-01-04", "rate": 5.0},
        {"date": "2024-01-05", "rate": 4.75}
    ]"#;

    #[test]
    fn test_load_from_csv_reader() {
        let series = load_rates_from_reader(CSV_RATES.as_bytes()).unwrap();

        assert_eq!(series.len(), 4);
        assert_eq!(series.rate(date(2024, 1, 2)), Some(dec!(0.0525)));
        assert_eq!(series.rate(date(2024, 1, 5)), Some(dec!(0.0475)));
    }

    #[test]
    fn test_load_from_json() {
        let series = rates_from_json(JSON_RATES).unwrap();

        assert_eq!(series.len(), 4);
        assert_eq!(series.rate(date(2024, 1, 4)), Some(dec!(0.05)));
    }

    #[test]
    fn test_csv_and_json_build_identical_series() {
        let from_csv = load_rates_from_reader(CSV_RATES.as_bytes()).unwrap();
        let from_json = rates_from_json(JSON_RATES).unwrap();

        assert_eq!(from_csv, from_json);
    }

    #[test]
    fn test_csv_and_json_produce_identical_accruals() {
        use crate::accrual::{compute_accrual, AccrualRequest, DayCountBasis};

        let from_csv = load_rates_from_reader(CSV_RATES.as_bytes()).unwrap();
        let from_json = rates_from_json(JSON_RATES).unwrap();

        let request = AccrualRequest::new(
            dec!(500000),
            date(2024, 1, 3),
            date(2024, 1, 5),
            1,
            DayCountBasis::Act365,
        );

        let csv_result = compute_accrual(&request, &from_csv).unwrap();
        let json_result = compute_accrual(&request, &from_json).unwrap();

        assert_eq!(csv_result.compounded_factor, json_result.compounded_factor);
        assert_eq!(csv_result.interest_total, json_result.interest_total);
        assert_eq!(csv_result.latest_rate_date, json_result.latest_rate_date);
    }

    #[test]
    fn test_malformed_csv_is_an_error() {
        let result = load_rates_from_reader("date,rate\nnot-a-date,5.0\n".as_bytes());
        assert!(result.is_err());
    }
}
