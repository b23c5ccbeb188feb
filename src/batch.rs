//! Batch runner for evaluating many accrual requests
//!
//! Pre-loads one rate series, then evaluates any number of independent
//! requests against it. Each computation builds its own calendar index and
//! shares nothing mutable, so fan-out needs no coordination.

use rayon::prelude::*;
use std::error::Error;
use std::path::Path;

use crate::accrual::{compute_accrual, AccrualRequest, AccrualResult};
use crate::error::AccrualError;
use crate::rates::{load_rates, RateSeries};

/// Pre-loaded runner for evaluating requests against one rate series
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::from_csv_path("sonia_rates.csv")?;
///
/// for request in requests {
///     let result = runner.run(&request)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunner {
    series: RateSeries,
}

impl BatchRunner {
    /// Create a runner with a pre-built series.
    pub fn new(series: RateSeries) -> Self {
        Self { series }
    }

    /// Create a runner by loading a rates CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            series: load_rates(path)?,
        })
    }

    /// The series the runner evaluates against.
    pub fn series(&self) -> &RateSeries {
        &self.series
    }

    /// Evaluate a single request.
    pub fn run(&self, request: &AccrualRequest) -> Result<AccrualResult, AccrualError> {
        compute_accrual(request, &self.series)
    }

    /// Evaluate many requests in parallel, preserving input order.
    pub fn run_all(
        &self,
        requests: &[AccrualRequest],
    ) -> Vec<Result<AccrualResult, AccrualError>> {
        log::debug!("running batch of {} accrual requests", requests.len());
        requests.par_iter().map(|request| self.run(request)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accrual::DayCountBasis;
    use crate::rates::RateRecord;
    use chrono::{Duration, NaiveDate};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily_series() -> RateSeries {
        let mut records = Vec::new();
        let mut day = date(2023, 12, 25);
        while day <= date(2024, 1, 31) {
            records.push(RateRecord { date: day, rate: dec!(0.05) });
            day += Duration::days(1);
        }
        RateSeries::from_records(records)
    }

    #[test]
    fn test_batch_matches_individual_runs() {
        let runner = BatchRunner::new(daily_series());

        let requests: Vec<AccrualRequest> = (1..=3)
            .map(|weeks| {
                AccrualRequest::new(
                    dec!(1000000),
                    date(2024, 1, 1),
                    date(2024, 1, 1) + Duration::days(7 * weeks),
                    1,
                    DayCountBasis::Act365,
                )
            })
            .collect();

        let batch = runner.run_all(&requests);

        assert_eq!(batch.len(), 3);
        for (request, outcome) in requests.iter().zip(&batch) {
            let individual = runner.run(request).unwrap();
            let from_batch = outcome.as_ref().unwrap();
            assert_eq!(from_batch.compounded_factor, individual.compounded_factor);
            assert_eq!(from_batch.interest_total, individual.interest_total);
        }
    }

    #[test]
    fn test_batch_reports_per_request_errors() {
        let runner = BatchRunner::new(daily_series());

        let good = AccrualRequest::new(
            dec!(1000000),
            date(2024, 1, 1),
            date(2024, 1, 8),
            1,
            DayCountBasis::Act365,
        );
        let mut bad = good.clone();
        bad.lookback = 0;

        let batch = runner.run_all(&[good, bad]);

        assert!(batch[0].is_ok());
        assert!(matches!(batch[1], Err(AccrualError::InvalidRequest { .. })));
    }
}
