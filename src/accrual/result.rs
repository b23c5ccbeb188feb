//! Accrual output structures and result assembly

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::request::{AccrualRequest, DayCountBasis};
use super::split::MarginSplit;

/// Round a monetary amount to 2 decimal places, half-up.
pub fn quantize_money(x: Decimal) -> Decimal {
    x.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One calendar day of the compounding walk.
///
/// Weekend and holiday dates share the business day, observation date, rate
/// and resulting factor of the run that covers them; only `date` and
/// `is_business_day` distinguish them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyObservation {
    /// Calendar day the interest accrued on.
    pub date: NaiveDate,
    /// Business day whose rate applied to this date.
    pub business_day: NaiveDate,
    /// Rate publication date after the lookback shift.
    pub observation_date: NaiveDate,
    /// Fractional daily rate read on the observation date.
    pub daily_rate: Decimal,
    /// Cumulative growth factor after this day's run was applied.
    pub cumulative_factor: Decimal,
    /// Calendar days the observation was stretched over.
    pub days_applied: i64,
    /// Whether this date is itself the applicable business day.
    pub is_business_day: bool,
}

/// One side of the margin split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginSegment {
    /// Calendar days accrued in this segment.
    pub days: i64,
    /// Per-annum margin applied to the segment.
    pub margin: Decimal,
}

/// Day counts and margins on either side of the change boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginBreakdown {
    /// Segment before the change date.
    pub pre: MarginSegment,
    /// Segment from the change date onwards.
    pub post: MarginSegment,
    /// The margin change date, when one was supplied.
    pub effective_date: Option<NaiveDate>,
}

/// Complete result of one accrual computation.
///
/// The three interest components are each rounded to 2 decimal places for
/// reporting, while `interest_total` is the rounded sum of the unrounded
/// components. The displayed total can therefore differ from the sum of the
/// displayed components by a cent; this reproduces the settlement
/// convention of the systems this engine reconciles against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrualResult {
    /// Total interest for the period.
    pub interest_total: Decimal,
    /// Compounded reference-rate interest.
    pub interest_rfr: Decimal,
    /// Margin interest across both segments.
    pub interest_margin: Decimal,
    /// Credit adjustment spread interest.
    pub interest_cas: Decimal,

    /// Final cumulative growth factor.
    pub compounded_factor: Decimal,
    /// Annualized reference rate implied by the factor.
    pub rfr_annualized: Decimal,
    /// Annualized reference rate plus day-weighted margin plus spread.
    pub blended_annualized: Decimal,

    /// Elapsed calendar days in the period.
    pub day_count: i64,
    /// Day-count basis used (serialized as 365 or 360).
    pub basis: DayCountBasis,
    /// Latest date present in the supplied rate series.
    pub latest_rate_date: NaiveDate,

    /// How the margin applied around the optional change date.
    pub margin_breakdown: MarginBreakdown,

    /// Per-day trace, present only when the request asked for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_observations: Option<Vec<DailyObservation>>,
}

impl AccrualResult {
    /// Combine the compounded factor and the margin split into the reported
    /// figures.
    pub(crate) fn assemble(
        request: &AccrualRequest,
        factor: Decimal,
        split: MarginSplit,
        latest_rate_date: NaiveDate,
        daily_observations: Option<Vec<DailyObservation>>,
    ) -> Self {
        let basis = request.basis.as_decimal();
        let day_count = request.day_count();
        let dc = Decimal::from(day_count);

        let dcf_total = dc / basis;
        let dcf_pre = Decimal::from(split.pre_days) / basis;
        let dcf_post = Decimal::from(split.post_days) / basis;

        let margin_component = split.margin_pre * dcf_pre + split.margin_post * dcf_post;

        let interest_rfr = (factor - Decimal::ONE) * request.principal;
        let interest_margin = margin_component * request.principal;
        let interest_cas = request.cas * dcf_total * request.principal;
        let interest_total = interest_rfr + interest_margin + interest_cas;

        let (rfr_annualized, margin_weighted) = if day_count != 0 {
            (
                (factor - Decimal::ONE) * basis / dc,
                margin_component / dcf_total,
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };
        let blended_annualized = rfr_annualized + margin_weighted + request.cas;

        Self {
            interest_total: quantize_money(interest_total),
            interest_rfr: quantize_money(interest_rfr),
            interest_margin: quantize_money(interest_margin),
            interest_cas: quantize_money(interest_cas),
            compounded_factor: factor,
            rfr_annualized,
            blended_annualized,
            day_count,
            basis: request.basis,
            latest_rate_date,
            margin_breakdown: MarginBreakdown {
                pre: MarginSegment {
                    days: split.pre_days,
                    margin: split.margin_pre,
                },
                post: MarginSegment {
                    days: split.post_days,
                    margin: split.margin_post,
                },
                effective_date: split.effective_date,
            },
            daily_observations,
        }
    }
}
