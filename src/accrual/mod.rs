//! Accrual engine: request model, compounding loop, margin split, results

mod engine;
mod request;
mod result;
mod split;

pub use engine::{compute_accrual, AccrualEngine};
pub use request::{AccrualRequest, DayCountBasis};
pub use result::{quantize_money, AccrualResult, DailyObservation, MarginBreakdown, MarginSegment};
pub use split::{split_margin, MarginSplit};
