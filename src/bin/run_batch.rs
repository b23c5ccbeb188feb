//! Run a batch of accrual requests against one rates file
//!
//! Reads a rates CSV and a JSON array of requests, evaluates them in
//! parallel, and writes one summary row per request for reconciliation.

use accrual_system::{AccrualRequest, BatchRunner};
use anyhow::Context;
use std::env;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let rates_path = args.next().unwrap_or_else(|| "rates.csv".to_string());
    let requests_path = args.next().unwrap_or_else(|| "requests.json".to_string());
    let output_path = args.next().unwrap_or_else(|| "batch_output.csv".to_string());

    let start = Instant::now();
    println!("Loading rates from {}...", rates_path);

    let runner = BatchRunner::from_csv_path(&rates_path)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("failed to load rates from {}", rates_path))?;
    println!(
        "Loaded {} rate observations in {:?}",
        runner.series().len(),
        start.elapsed()
    );

    let requests_json = std::fs::read_to_string(&requests_path)
        .with_context(|| format!("failed to read {}", requests_path))?;
    let requests: Vec<AccrualRequest> = serde_json::from_str(&requests_json)
        .with_context(|| format!("failed to parse {}", requests_path))?;
    println!("Loaded {} requests", requests.len());

    println!("Computing accruals...");
    let compute_start = Instant::now();

    // Requests are independent; fan out across cores
    let results = runner.run_all(&requests);

    println!("Computations complete in {:?}", compute_start.elapsed());

    let mut file = File::create(&output_path)
        .with_context(|| format!("failed to create {}", output_path))?;

    writeln!(
        file,
        "Start,End,Basis,DayCount,Principal,InterestRFR,InterestMargin,InterestCAS,InterestTotal,CompoundedFactor,Error"
    )?;

    let mut failures = 0usize;
    for (request, outcome) in requests.iter().zip(&results) {
        match outcome {
            Ok(result) => {
                writeln!(
                    file,
                    "{},{},{},{},{},{},{},{},{},{},",
                    request.start,
                    request.end,
                    u32::from(result.basis),
                    result.day_count,
                    request.principal,
                    result.interest_rfr,
                    result.interest_margin,
                    result.interest_cas,
                    result.interest_total,
                    result.compounded_factor,
                )?;
            }
            Err(err) => {
                failures += 1;
                writeln!(
                    file,
                    "{},{},{},,{},,,,,,\"{}\"",
                    request.start,
                    request.end,
                    u32::from(request.basis),
                    request.principal,
                    err,
                )?;
            }
        }
    }

    println!("\nResults written to: {}", output_path);
    println!("  {} succeeded, {} failed", results.len() - failures, failures);

    Ok(())
}
