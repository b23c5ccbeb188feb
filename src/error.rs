//! Error types for accrual computations
//!
//! Every error is terminal for the computation that raised it: the engine
//! performs no retries and returns no partial result. Callers (CLI, batch
//! runner, any transport glue) decide how to surface the message.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Which side of a date a calendar search was looking on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// Latest business day at or preceding the query date.
    OnOrBefore,
    /// Earliest business day at or following the query date.
    OnOrAfter,
}

impl fmt::Display for SearchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchDirection::OnOrBefore => write!(f, "on or before"),
            SearchDirection::OnOrAfter => write!(f, "on or after"),
        }
    }
}

/// The error type for accrual computations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccrualError {
    /// Request failed validation before any calendar work was done.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request.
        reason: String,
    },

    /// A calendar query fell entirely outside the supplied rate series.
    #[error("no business day {direction} {date} in the supplied rates")]
    NoBusinessDay {
        /// The query date.
        date: NaiveDate,
        /// Search direction of the failed query.
        direction: SearchDirection,
    },

    /// A lookback shift was requested from a date the calendar does not contain.
    #[error("{date} is not a business day in the supplied rates")]
    NotABusinessDay {
        /// The offending date.
        date: NaiveDate,
    },

    /// The series does not extend far enough back for the requested lookback.
    #[error("rates do not go back {lookback} business days before {date}; add more history")]
    InsufficientHistory {
        /// The business day the shift started from.
        date: NaiveDate,
        /// How many business days back were requested.
        lookback: u32,
    },
}

impl AccrualError {
    /// Creates an invalid-request error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }
}
