//! Accrual request data structures

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AccrualError;

/// Default rate-observation lookback in business days
fn default_lookback() -> u32 {
    5
}

/// Day-count basis for interest accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum DayCountBasis {
    /// Actual/365 Fixed, the SONIA-style sterling convention.
    Act365,
    /// Actual/360, the SOFR-style money-market convention.
    Act360,
}

impl DayCountBasis {
    /// Number of days in the year basis.
    pub fn days(&self) -> u32 {
        match self {
            DayCountBasis::Act365 => 365,
            DayCountBasis::Act360 => 360,
        }
    }

    /// The basis as a decimal denominator.
    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.days())
    }

    /// Whether the running factor is re-quantized to 18 decimal places
    /// after every daily multiplication. Only the 365-day convention
    /// rounds intermediates; deviating changes financial results.
    pub fn requantizes_factor(&self) -> bool {
        matches!(self, DayCountBasis::Act365)
    }
}

impl TryFrom<u32> for DayCountBasis {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            365 => Ok(DayCountBasis::Act365),
            360 => Ok(DayCountBasis::Act360),
            other => Err(format!("unsupported day-count basis: {}", other)),
        }
    }
}

impl From<DayCountBasis> for u32 {
    fn from(basis: DayCountBasis) -> u32 {
        basis.days()
    }
}

/// A single accrual computation request.
///
/// Rates are fractional (0.05 = 5%); dates are calendar dates with the end
/// date exclusive. The transport or CLI layer is responsible for parsing
/// and for mapping any pricing-option label to a [`DayCountBasis`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrualRequest {
    /// Loan principal the interest accrues on.
    pub principal: Decimal,

    /// First day of the accrual period.
    pub start: NaiveDate,

    /// Day after the last accrued day (exclusive bound).
    pub end: NaiveDate,

    /// Rate-observation lookback in business days (at least 1).
    #[serde(default = "default_lookback")]
    pub lookback: u32,

    /// Day-count basis (365 or 360 on the wire).
    pub basis: DayCountBasis,

    /// Margin over the reference rate, per annum.
    #[serde(default)]
    pub margin: Decimal,

    /// Credit adjustment spread, per annum.
    #[serde(default)]
    pub cas: Decimal,

    /// Date the margin changes, if any.
    #[serde(default)]
    pub margin_change_date: Option<NaiveDate>,

    /// Margin that applies from the change date onwards.
    #[serde(default)]
    pub margin_after: Option<Decimal>,

    /// Whether to emit the per-day observation trace.
    #[serde(default)]
    pub daily_details: bool,
}

impl AccrualRequest {
    /// Create a request with no margin, no spread, and no daily trace.
    pub fn new(
        principal: Decimal,
        start: NaiveDate,
        end: NaiveDate,
        lookback: u32,
        basis: DayCountBasis,
    ) -> Self {
        Self {
            principal,
            start,
            end,
            lookback,
            basis,
            margin: Decimal::ZERO,
            cas: Decimal::ZERO,
            margin_change_date: None,
            margin_after: None,
            daily_details: false,
        }
    }

    /// Validate the request before any calendar work.
    pub fn validate(&self) -> Result<(), AccrualError> {
        if self.lookback < 1 {
            return Err(AccrualError::invalid_request(
                "lookback must be at least 1 business day",
            ));
        }
        if self.end <= self.start {
            return Err(AccrualError::invalid_request(
                "end date must be after start date",
            ));
        }
        Ok(())
    }

    /// Elapsed calendar days in the accrual period.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days()
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
    fn test_basis_conversions() {
        assert_eq!(DayCountBasis::try_from(365).unwrap(), DayCountBasis::Act365);
        assert_eq!(DayCountBasis::try_from(360).unwrap(), DayCountBasis::Act360);
        assert!(DayCountBasis::try_from(364).is_err());
        assert_eq!(u32::from(DayCountBasis::Act360), 360);
    }

    #[test]
    fn test_only_act365_requantizes() {
        assert!(DayCountBasis::Act365.requantizes_factor());
        assert!(!DayCountBasis::Act360.requantizes_factor());
    }

    #[test]
    fn test_validate() {
        let mut request = AccrualRequest::new(
            dec!(1000000),
            date(2024, 1, 1),
            date(2024, 1, 8),
            5,
            DayCountBasis::Act365,
        );
        assert!(request.validate().is_ok());
        assert_eq!(request.day_count(), 7);

        request.lookback = 0;
        assert!(request.validate().is_err());

        request.lookback = 5;
        request.end = request.start;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "principal": 1000000,
            "start": "2024-01-01",
            "end": "2024-01-08",
            "basis": 365
        }"#;

        let request: AccrualRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.lookback, 5);
        assert_eq!(request.basis, DayCountBasis::Act365);
        assert_eq!(request.margin, Decimal::ZERO);
        assert_eq!(request.cas, Decimal::ZERO);
        assert!(request.margin_change_date.is_none());
        assert!(!request.daily_details);
    }

    #[test]
    fn test_deserialize_rejects_unknown_basis() {
        let json = r#"{
            "principal": 1000000,
            "start": "2024-01-01",
            "end": "2024-01-08",
            "basis": 366
        }"#;

        assert!(serde_json::from_str::<AccrualRequest>(json).is_err());
    }
}
