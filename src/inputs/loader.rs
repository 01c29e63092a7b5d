//! Load batches of rate inputs from CSV
//!
//! Columns: id, monthly_income_goal, hours_per_week, weeks_per_year,
//! monthly_expenses, market_average_rate, experience_multiplier,
//! confidence_factor, currency. Optional columns may be left blank.

use super::data::{RateInputs, DEFAULT_CONFIDENCE_FACTOR, DEFAULT_EXPERIENCE_MULTIPLIER, DEFAULT_WEEKS_PER_YEAR};
use super::form::{parse_optional, parse_or_default, parse_required};
use crate::currency::{Currency, UnknownCurrency};
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputLoadError {
    #[error("failed to open input file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {id}: {source}")]
    Currency {
        id: String,
        #[source]
        source: UnknownCurrency,
    },
}

/// One labelled row of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub id: String,
    pub inputs: RateInputs,
}

/// Raw CSV row. Numbers stay text here so a garbled cell reaches the
/// engine as NaN and is reported by field instead of failing the batch.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: String,
    #[serde(default)]
    monthly_income_goal: String,
    #[serde(default)]
    hours_per_week: String,
    #[serde(default)]
    weeks_per_year: String,
    #[serde(default)]
    monthly_expenses: String,
    #[serde(default)]
    market_average_rate: String,
    #[serde(default)]
    experience_multiplier: String,
    #[serde(default)]
    confidence_factor: String,
    #[serde(default)]
    currency: String,
}

impl CsvRow {
    fn to_entry(self) -> Result<BatchEntry, InputLoadError> {
        let currency = match self.currency.trim() {
            "" => Currency::BASE,
            code => code.parse().map_err(|source| InputLoadError::Currency {
                id: self.id.clone(),
                source,
            })?,
        };

        Ok(BatchEntry {
            inputs: RateInputs {
                monthly_income_goal: parse_required(&self.monthly_income_goal),
                hours_per_week: parse_required(&self.hours_per_week),
                weeks_per_year: parse_or_default(&self.weeks_per_year, DEFAULT_WEEKS_PER_YEAR),
                monthly_expenses: parse_required(&self.monthly_expenses),
                market_average_rate: parse_optional(&self.market_average_rate),
                experience_multiplier: parse_or_default(&self.experience_multiplier, DEFAULT_EXPERIENCE_MULTIPLIER),
                confidence_factor: parse_or_default(&self.confidence_factor, DEFAULT_CONFIDENCE_FACTOR),
                currency,
            },
            id: self.id,
        })
    }
}

/// Load all rows from a CSV file
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<BatchEntry>, InputLoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| InputLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_inputs_from_reader(file)
}

/// Load rows from any reader (e.g., string buffer, request body)
pub fn load_inputs_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<BatchEntry>, InputLoadError> {
    let mut csv_reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut entries = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        entries.push(row.to_entry()?);
    }

    log::info!("loaded {} rate input rows", entries.len());
    Ok(entries)
}
