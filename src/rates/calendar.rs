//! Business-day navigation over a sparse rate calendar
//!
//! The calendar is whatever dates the rate series contains; there is no
//! holiday logic here. All navigation is binary search over the sorted day
//! vector, so the engine never scans the series linearly.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::RateSeries;
use crate::error::{AccrualError, SearchDirection};

/// Immutable index over the business days of one [`RateSeries`].
///
/// Holds the sorted day sequence plus a reverse date-to-position map.
/// Rebuilt from the series for every computation; never mutated.
#[derive(Debug, Clone)]
pub struct CalendarIndex {
    days: Vec<NaiveDate>,
    positions: HashMap<NaiveDate, usize>,
}

impl CalendarIndex {
    /// Build the index from a rate series.
    pub fn new(series: &RateSeries) -> Self {
        let days: Vec<NaiveDate> = series.dates().collect();
        let positions = days.iter().enumerate().map(|(i, d)| (*d, i)).collect();
        Self { days, positions }
    }

    /// True if the date is a business day in this calendar.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.positions.contains_key(&date)
    }

    /// Number of business days indexed.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True when the calendar holds no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Latest business day at or preceding `date`.
    pub fn on_or_before(&self, date: NaiveDate) -> Result<NaiveDate, AccrualError> {
        let mut lo: isize = 0;
        let mut hi: isize = self.days.len() as isize - 1;
        let mut answer = None;

        while lo <= hi {
            let mid = (lo + hi) / 2;
            if self.days[mid as usize] <= date {
                answer = Some(self.days[mid as usize]);
                lo = mid + 1;
            } else {
                hi = mid - 1;
            }
        }

        answer.ok_or(AccrualError::NoBusinessDay {
            date,
            direction: SearchDirection::OnOrBefore,
        })
    }

    /// Earliest business day at or following `date`.
    pub fn on_or_after(&self, date: NaiveDate) -> Result<NaiveDate, AccrualError> {
        let mut lo: isize = 0;
        let mut hi: isize = self.days.len() as isize - 1;
        let mut answer = None;

        while lo <= hi {
            let mid = (lo + hi) / 2;
            if self.days[mid as usize] >= date {
                answer = Some(self.days[mid as usize]);
                hi = mid - 1;
            } else {
                lo = mid + 1;
            }
        }

        answer.ok_or(AccrualError::NoBusinessDay {
            date,
            direction: SearchDirection::OnOrAfter,
        })
    }

    /// The business day `lookback` positions before `date`.
    ///
    /// `date` must itself be a business day in the calendar. Fails with
    /// [`AccrualError::InsufficientHistory`] when the series does not reach
    /// far enough back.
    pub fn shift_back(&self, date: NaiveDate, lookback: u32) -> Result<NaiveDate, AccrualError> {
        let position = *self
            .positions
            .get(&date)
            .ok_or(AccrualError::NotABusinessDay { date })?;

        position
            .checked_sub(lookback as usize)
            .map(|i| self.days[i])
            .ok_or(AccrualError::InsufficientHistory { date, lookback })
    }
}
