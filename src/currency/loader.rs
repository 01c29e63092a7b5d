//! CSV-based currency table loader
//!
//! Loads conversion factors from data/currency_rates.csv

use super::{Currency, UnknownCurrency};
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default path to the currency table
pub const DEFAULT_CURRENCY_TABLE_PATH: &str = "data/currency_rates.csv";

#[derive(Debug, Error)]
pub enum CurrencyTableError {
    #[error("failed to open currency table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    UnknownCurrency(#[from] UnknownCurrency),
    #[error("invalid conversion factor for {currency}: {value}")]
    InvalidFactor { currency: Currency, value: f64 },
}

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    code: String,
    base_per_unit: f64,
}

/// Load conversion factors from CSV
/// Returns Vec<(currency, base units per unit)> in file order
pub fn load_currency_rates(path: &Path) -> Result<Vec<(Currency, f64)>, CurrencyTableError> {
    let file = File::open(path).map_err(|source| CurrencyTableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_currency_rates_from_reader(file)
}

/// Load conversion factors from any reader
pub fn load_currency_rates_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<(Currency, f64)>, CurrencyTableError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rates = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let currency: Currency = row.code.parse()?;

        if !row.base_per_unit.is_finite() || row.base_per_unit <= 0.0 {
            return Err(CurrencyTableError::InvalidFactor {
                currency,
                value: row.base_per_unit,
            });
        }

        rates.push((currency, row.base_per_unit));
    }

    log::info!("loaded {} currency rates", rates.len());
    Ok(rates)
}
