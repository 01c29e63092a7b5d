//! Price every row of an inputs CSV
//!
//! Usage: cargo run --bin run_batch -- --input data/sample_inputs.csv --output batch_rates.csv

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use pricing_buddy::inputs::load_inputs;
use pricing_buddy::scenario::BatchOutcome;
use pricing_buddy::{CurrencyTable, ScenarioRunner};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Calculate suggested rates for a CSV of inputs")]
struct Args {
    /// Inputs CSV
    #[arg(long, default_value = "data/sample_inputs.csv")]
    input: PathBuf,
    /// Output CSV
    #[arg(long, default_value = "batch_rates.csv")]
    output: PathBuf,
    /// Currency table CSV
    #[arg(long, default_value = pricing_buddy::currency::DEFAULT_CURRENCY_TABLE_PATH)]
    currency_table: PathBuf,
}

/// One output line
#[derive(Debug, serde::Serialize)]
struct OutputRow<'a> {
    id: &'a str,
    currency: &'static str,
    base_rate: Option<f64>,
    final_rate: Option<f64>,
    suggested_rate: Option<f64>,
    weekly_rate: Option<f64>,
    monthly_rate: Option<f64>,
    error: Option<String>,
}

impl<'a> From<&'a BatchOutcome> for OutputRow<'a> {
    fn from(outcome: &'a BatchOutcome) -> Self {
        match &outcome.outcome {
            Ok(result) => OutputRow {
                id: &outcome.id,
                currency: outcome.currency.code(),
                base_rate: Some(result.base_rate),
                final_rate: Some(result.final_rate),
                suggested_rate: Some(result.suggested_rate),
                weekly_rate: Some(result.weekly_rate),
                monthly_rate: Some(result.monthly_rate),
                error: None,
            },
            Err(err) => OutputRow {
                id: &outcome.id,
                currency: outcome.currency.code(),
                base_rate: None,
                final_rate: None,
                suggested_rate: None,
                weekly_rate: None,
                monthly_rate: None,
                error: Some(err.to_string()),
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading inputs from {}...", args.input.display());

    let entries = load_inputs(&args.input)
        .with_context(|| format!("loading inputs from {}", args.input.display()))?;
    println!("Loaded {} rows in {:?}", entries.len(), start.elapsed());

    let table = CurrencyTable::from_csv_path(&args.currency_table)
        .with_context(|| format!("loading currency table {}", args.currency_table.display()))?;
    let runner = ScenarioRunner::with_table(table);

    println!("Running calculations...");
    let calc_start = Instant::now();
    let outcomes = runner.run_entries(&entries);
    println!("Calculations complete in {:?}", calc_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for outcome in &outcomes {
        writer.serialize(OutputRow::from(outcome))?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    let failed = outcomes.iter().filter(|o| o.outcome.is_err()).count();
    let suggested: Vec<f64> = outcomes
        .iter()
        .filter_map(|o| o.outcome.as_ref().ok().map(|r| r.suggested_rate))
        .collect();

    println!("\nBatch Summary ({}):", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Rows:    {}", outcomes.len());
    println!("  Priced:  {}", suggested.len());
    println!("  Invalid: {}", failed);
    if let (Some(min), Some(max)) = (
        suggested.iter().copied().reduce(f64::min),
        suggested.iter().copied().reduce(f64::max),
    ) {
        println!("  Suggested rate range: {:.2} - {:.2} (mixed currencies)", min, max);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
