//! Accrual System CLI
//!
//! Command-line interface for computing one compounded-in-arrears accrual
//! from a rates CSV file.

use accrual_system::rates::{load_rates, normalize_rate};
use accrual_system::{compute_accrual, AccrualRequest, DayCountBasis};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Pricing option label, mapped onto a day-count basis.
///
/// The engine itself only ever sees the basis; the label is CLI policy.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PricingOption {
    /// Sterling overnight convention, Actual/365 Fixed
    Sonia,
    /// USD overnight convention, Actual/360
    Sofr,
}

impl PricingOption {
    fn basis(self) -> DayCountBasis {
        match self {
            PricingOption::Sonia => DayCountBasis::Act365,
            PricingOption::Sofr => DayCountBasis::Act360,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "accrual_system", version, about = "Compounded-in-arrears loan interest")]
struct Args {
    /// Rates CSV file with date,rate columns
    #[arg(long)]
    rates: PathBuf,

    /// Loan principal
    #[arg(long)]
    principal: Decimal,

    /// First day of the accrual period (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Day after the last accrued day (YYYY-MM-DD, exclusive)
    #[arg(long)]
    end: NaiveDate,

    /// Pricing option selecting the day-count basis
    #[arg(long, value_enum, default_value = "sonia")]
    pricing_option: PricingOption,

    /// Rate-observation lookback in business days
    #[arg(long, default_value_t = 5)]
    lookback: u32,

    /// Margin per annum (percent or fraction, e.g. 1.5 or 0.015)
    #[arg(long, default_value = "0")]
    margin: Decimal,

    /// Credit adjustment spread per annum (percent or fraction)
    #[arg(long, default_value = "0")]
    cas: Decimal,

    /// Date the margin changes (YYYY-MM-DD)
    #[arg(long)]
    margin_change_date: Option<NaiveDate>,

    /// Margin per annum from the change date onwards
    #[arg(long)]
    margin_after: Option<Decimal>,

    /// Print the per-day observation trace
    #[arg(long)]
    daily: bool,

    /// Write the per-day trace to a CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let series = load_rates(&args.rates)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("failed to load rates from {}", args.rates.display()))?;

    let mut request = AccrualRequest::new(
        args.principal,
        args.start,
        args.end,
        args.lookback,
        args.pricing_option.basis(),
    );
    request.margin = normalize_rate(args.margin);
    request.cas = normalize_rate(args.cas);
    request.margin_change_date = args.margin_change_date;
    request.margin_after = args.margin_after.map(normalize_rate);
    request.daily_details = args.daily || args.output.is_some();

    let result = compute_accrual(&request, &series)?;

    println!("Accrual System v0.1.0");
    println!("=====================\n");
    println!("Period: {} to {} ({} days, ACT/{})",
        args.start, args.end, result.day_count, u32::from(result.basis));
    println!("Principal: {:.2}", request.principal);
    println!("Lookback: {} business days", request.lookback);
    println!("Rates through: {}", result.latest_rate_date);
    println!();
    println!("Interest (RFR):    {:>14}", result.interest_rfr);
    println!("Interest (margin): {:>14}", result.interest_margin);
    println!("Interest (CAS):    {:>14}", result.interest_cas);
    println!("Interest (total):  {:>14}", result.interest_total);
    println!();
    println!("Compounded factor:   {}", result.compounded_factor);
    println!("RFR annualized:      {}", result.rfr_annualized);
    println!("Blended annualized:  {}", result.blended_annualized);

    let breakdown = &result.margin_breakdown;
    println!();
    println!("Margin split: {} days at {} / {} days at {}",
        breakdown.pre.days, breakdown.pre.margin, breakdown.post.days, breakdown.post.margin);
    if let Some(effective) = breakdown.effective_date {
        println!("Margin change effective: {}", effective);
    }

    if let Some(trace) = result.daily_observations.as_ref() {
        if args.daily {
            println!();
            println!("{:>12} {:>12} {:>12} {:>12} {:>22} {:>5} {:>4}",
                "Date", "BusDay", "ObsDate", "Rate", "Factor", "Days", "BD?");
            println!("{}", "-".repeat(86));
            for row in trace.iter().take(14) {
                println!("{:>12} {:>12} {:>12} {:>12} {:>22} {:>5} {:>4}",
                    row.date.to_string(),
                    row.business_day.to_string(),
                    row.observation_date.to_string(),
                    row.daily_rate.to_string(),
                    row.cumulative_factor.to_string(),
                    row.days_applied,
                    if row.is_business_day { "Y" } else { "N" },
                );
            }
            if trace.len() > 14 {
                println!("... ({} more days)", trace.len() - 14);
            }
        }

        if let Some(path) = args.output.as_ref() {
            let mut file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;

            writeln!(file, "Date,BusinessDay,ObservationDate,Rate,CumulativeFactor,DaysApplied,IsBusinessDay")?;
            for row in trace {
                writeln!(file, "{},{},{},{},{},{},{}",
                    row.date,
                    row.business_day,
                    row.observation_date,
                    row.daily_rate,
                    row.cumulative_factor,
                    row.days_applied,
                    row.is_business_day,
                )?;
            }

            println!("\nDaily trace written to: {}", path.display());
        }
    }

    Ok(())
}
