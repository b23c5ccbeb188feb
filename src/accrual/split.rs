//! Margin split around an optional mid-period change date

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// How the elapsed days divide between the pre- and post-change margins.
///
/// Invariant: `pre_days + post_days` equals the full calendar day count of
/// the accrual period in every branch, so day-weighted blending degenerates
/// correctly when either segment is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginSplit {
    /// Calendar days accrued at the pre-change margin.
    pub pre_days: i64,
    /// Calendar days accrued at the post-change margin.
    pub post_days: i64,
    /// Margin applied to the pre segment.
    pub margin_pre: Decimal,
    /// Margin applied to the post segment.
    pub margin_post: Decimal,
    /// The supplied change date, if any.
    pub effective_date: Option<NaiveDate>,
}

/// Partition `[start, end)` around an optional margin change date.
///
/// - No change date: all days accrue at `margin`.
/// - Change on or before `start`: all days accrue at the post-change margin.
/// - Change on or after `end`: all days accrue at the pre-change margin.
/// - Change strictly inside: days split at the boundary, each side at its
///   own margin. A missing `margin_after` falls back to `margin`.
pub fn split_margin(
    start: NaiveDate,
    end: NaiveDate,
    margin: Decimal,
    margin_change_date: Option<NaiveDate>,
    margin_after: Option<Decimal>,
) -> MarginSplit {
    let dc = (end - start).num_days();

    let mut pre_days = dc;
    let mut post_days = 0;
    let mut margin_pre = margin;
    let mut margin_post = margin_after.unwrap_or(margin);

    if let Some(effective) = margin_change_date {
        if effective <= start {
            pre_days = 0;
            post_days = dc;
            margin_pre = margin_post;
        } else if effective >= end {
            margin_post = margin_pre;
        } else {
            pre_days = (effective - start).num_days();
            post_days = (end - effective).num_days();
        }
    }

    MarginSplit {
        pre_days,
        post_days,
        margin_pre,
        margin_post,
        effective_date: margin_change_date,
    }
}
