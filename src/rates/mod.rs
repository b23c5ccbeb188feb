//! Rate series ingestion and business-day calendar navigation

mod calendar;
mod loader;
mod series;

pub use calendar::CalendarIndex;
pub use loader::{load_rates, load_rates_from_reader, rates_from_json};
pub use series::{normalize_rate, RateRecord, RateSeries};
