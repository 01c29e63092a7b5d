//! Static currency conversion table

use super::Currency;
use std::collections::BTreeMap;
use std::path::Path;

/// Fixed conversion factors, expressed as base units per one unit of a currency
///
/// The base currency always maps to exactly 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyTable {
    base_per_unit: BTreeMap<Currency, f64>,
}

impl CurrencyTable {
    /// Table holding only the identity entry for the base currency
    pub fn new() -> Self {
        let mut base_per_unit = BTreeMap::new();
        base_per_unit.insert(Currency::BASE, 1.0);
        Self { base_per_unit }
    }

    /// Built-in rates used when no table file is supplied
    pub fn default_rates() -> Self {
        Self::new().with_rate(Currency::Usd, 83.0) // ₹ per $
    }

    /// Load the table from the default location (data/currency_rates.csv)
    pub fn from_csv() -> Result<Self, super::CurrencyTableError> {
        Self::from_csv_path(Path::new(super::DEFAULT_CURRENCY_TABLE_PATH))
    }

    /// Load the table from a specific CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self, super::CurrencyTableError> {
        let rates = super::loader::load_currency_rates(path)?;
        Ok(rates
            .into_iter()
            .fold(Self::new(), |table, (currency, factor)| table.with_rate(currency, factor)))
    }

    /// Set the factor for a currency. The base currency entry is fixed at 1.0.
    pub fn with_rate(mut self, currency: Currency, base_per_unit: f64) -> Self {
        if !currency.is_base() {
            self.base_per_unit.insert(currency, base_per_unit);
        }
        self
    }

    /// Conversion factor for a currency, if the table carries a usable one
    pub fn base_per_unit(&self, currency: Currency) -> Option<f64> {
        self.base_per_unit
            .get(&currency)
            .copied()
            .filter(|factor| factor.is_finite() && *factor > 0.0)
    }

    pub fn supports(&self, currency: Currency) -> bool {
        self.base_per_unit(currency).is_some()
    }

    /// Convert an amount in `currency` into base units
    pub fn to_base(&self, amount: f64, currency: Currency) -> Option<f64> {
        self.base_per_unit(currency).map(|factor| amount * factor)
    }

    /// Convert an amount in base units into `currency`
    pub fn from_base(&self, amount: f64, currency: Currency) -> Option<f64> {
        self.base_per_unit(currency).map(|factor| amount / factor)
    }

    /// Currencies with a usable factor, in declaration order
    pub fn currencies(&self) -> Vec<Currency> {
        self.base_per_unit
            .keys()
            .copied()
            .filter(|c| self.supports(*c))
            .collect()
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::default_rates()
    }
}
