//! Daily compounding engine for in-arrears interest accrual

use chrono::Duration;
use rust_decimal::{Decimal, RoundingStrategy};

use super::request::AccrualRequest;
use super::result::{AccrualResult, DailyObservation};
use super::split::split_margin;
use crate::error::AccrualError;
use crate::rates::{CalendarIndex, RateSeries};

/// Decimal places the running factor is held to under the 365 convention.
const FACTOR_SCALE: u32 = 18;

/// Compute one accrual: the single entry point of the engine.
///
/// Walks the calendar from `request.start` to `request.end` (exclusive),
/// compounding the lookback-shifted reference rate daily, then layers the
/// margin and credit adjustment spread on top.
pub fn compute_accrual(
    request: &AccrualRequest,
    series: &RateSeries,
) -> Result<AccrualResult, AccrualError> {
    AccrualEngine::new(request.clone()).compute(series)
}

/// Compounding engine bound to a single request.
pub struct AccrualEngine {
    request: AccrualRequest,
}

impl AccrualEngine {
    /// Create an engine for the given request.
    pub fn new(request: AccrualRequest) -> Self {
        Self { request }
    }

    /// Run the computation against a rate series.
    pub fn compute(&self, series: &RateSeries) -> Result<AccrualResult, AccrualError> {
        self.request.validate()?;
        let latest_rate_date = series
            .latest_date()
            .ok_or_else(|| AccrualError::invalid_request("no rates provided"))?;

        let calendar = CalendarIndex::new(series);

        // Validate up front that the series reaches far enough back for the
        // very first observation; gaps further back still surface mid-loop.
        let first_needed = calendar.on_or_before(self.request.start)?;
        calendar.shift_back(first_needed, self.request.lookback)?;

        let (factor, daily_observations) = self.compound_factor(&calendar, series)?;

        let split = split_margin(
            self.request.start,
            self.request.end,
            self.request.margin,
            self.request.margin_change_date,
            self.request.margin_after,
        );

        Ok(AccrualResult::assemble(
            &self.request,
            factor,
            split,
            latest_rate_date,
            daily_observations,
        ))
    }

    /// Walk `[start, end)` in business-day runs and accumulate the growth
    /// factor.
    ///
    /// Each iteration covers the span from the current date up to the next
    /// business day (or the end date, whichever is closer), so a Friday rate
    /// stretches over the weekend with a single multiplication. The loop
    /// always advances by at least one day and therefore terminates.
    fn compound_factor(
        &self,
        calendar: &CalendarIndex,
        series: &RateSeries,
    ) -> Result<(Decimal, Option<Vec<DailyObservation>>), AccrualError> {
        let basis = self.request.basis.as_decimal();
        let requantize = self.request.basis.requantizes_factor();

        let mut factor = Decimal::ONE;
        let mut trace: Option<Vec<DailyObservation>> = if self.request.daily_details {
            Some(Vec::with_capacity(self.request.day_count() as usize))
        } else {
            None
        };

        let mut current = self.request.start;
        while current < self.request.end {
            let (business_day, next_business_day) = if calendar.contains(current) {
                (current, calendar.on_or_after(current + Duration::days(1))?)
            } else {
                (calendar.on_or_before(current)?, calendar.on_or_after(current)?)
            };

            let until_next = (next_business_day - current).num_days();
            let until_end = (self.request.end - current).num_days();
            let days_applied = until_next.min(until_end);

            let observation_date = calendar.shift_back(business_day, self.request.lookback)?;
            // The calendar is derived from the series, so this lookup can
            // only miss if the two fell out of sync
            let rate = series
                .rate(observation_date)
                .ok_or(AccrualError::NotABusinessDay { date: observation_date })?;

            factor *= Decimal::ONE + rate * Decimal::from(days_applied) / basis;
            if requantize {
                factor = factor
                    .round_dp_with_strategy(FACTOR_SCALE, RoundingStrategy::MidpointAwayFromZero);
            }

            if let Some(trace) = trace.as_mut() {
                for offset in 0..days_applied {
                    let date = current + Duration::days(offset);
                    trace.push(DailyObservation {
                        date,
                        business_day,
                        observation_date,
                        daily_rate: rate,
                        cumulative_factor: factor,
                        days_applied,
                        is_business_day: date == business_day,
                    });
                }
            }

            current += Duration::days(days_applied);
        }

        Ok((factor, trace))
    }
}
