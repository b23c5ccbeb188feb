//! Accrual System - Daily compounded in-arrears interest engine for RFR-linked loans
//!
//! This library provides:
//! - Compounded-in-arrears interest for SONIA/SOFR-style overnight rates
//! - Business-day lookback with binary-search calendar navigation
//! - Actual/365 and Actual/360 day-count conventions
//! - Margin and credit adjustment spread, with optional mid-period margin change
//! - Rate series ingestion from CSV files or JSON arrays
//! - Parallel batch evaluation of independent requests

pub mod accrual;
pub mod batch;
pub mod error;
pub mod rates;

// Re-export commonly used types
pub use accrual::{compute_accrual, AccrualEngine, AccrualRequest, AccrualResult, DayCountBasis};
pub use batch::BatchRunner;
pub use error::AccrualError;
pub use rates::{CalendarIndex, RateRecord, RateSeries};
