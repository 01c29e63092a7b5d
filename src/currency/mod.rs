//! Display currencies and the static conversion table
//!
//! All engine arithmetic happens in the canonical base currency (INR).
//! The table maps every supported currency to the number of base units one
//! unit of that currency is worth.

mod table;
pub mod loader;

pub use table::CurrencyTable;
pub use loader::{CurrencyTableError, DEFAULT_CURRENCY_TABLE_PATH};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency a user enters amounts in and reads results in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian rupee, the canonical base currency
    Inr,
    /// US dollar
    Usd,
}

impl Currency {
    /// Canonical currency in which intermediate arithmetic is performed
    pub const BASE: Currency = Currency::Inr;

    /// Every supported currency, base first
    pub const ALL: [Currency; 2] = [Currency::Inr, Currency::Usd];

    pub fn is_base(self) -> bool {
        self == Self::BASE
    }

    /// ISO 4217 code
    pub fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::BASE
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error for currency identifiers outside the supported set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" | "₹" => Ok(Currency::Inr),
            "USD" | "$" => Ok(Currency::Usd),
            _ => Err(UnknownCurrency(s.trim().to_string())),
        }
    }
}
