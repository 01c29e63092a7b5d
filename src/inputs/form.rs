//! Raw form fields as typed by the user, and their JSON counterpart

use super::data::{RateInputs, DEFAULT_CONFIDENCE_FACTOR, DEFAULT_EXPERIENCE_MULTIPLIER, DEFAULT_WEEKS_PER_YEAR};
use crate::currency::Currency;
use serde::{Deserialize, Serialize};

/// Unparsed calculator form
///
/// Weeks, experience and confidence start out pre-filled the way the form
/// shows them; everything else starts empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateForm {
    pub monthly_income_goal: String,
    pub hours_per_week: String,
    pub weeks_per_year: String,
    pub monthly_expenses: String,
    pub market_average_rate: String,
    pub experience_multiplier: String,
    pub confidence_factor: String,
}

impl Default for RateForm {
    fn default() -> Self {
        Self {
            monthly_income_goal: String::new(),
            hours_per_week: String::new(),
            weeks_per_year: DEFAULT_WEEKS_PER_YEAR.to_string(),
            monthly_expenses: String::new(),
            market_average_rate: String::new(),
            experience_multiplier: DEFAULT_EXPERIENCE_MULTIPLIER.to_string(),
            confidence_factor: DEFAULT_CONFIDENCE_FACTOR.to_string(),
        }
    }
}

impl RateForm {
    /// Convert to engine inputs for the given display currency
    ///
    /// Required fields that are empty or not numbers become NaN so the
    /// engine rejects them by name. A blank or garbled market rate is
    /// simply absent.
    pub fn to_inputs(&self, currency: Currency) -> RateInputs {
        RateInputs {
            monthly_income_goal: parse_required(&self.monthly_income_goal),
            hours_per_week: parse_required(&self.hours_per_week),
            weeks_per_year: parse_required(&self.weeks_per_year),
            monthly_expenses: parse_required(&self.monthly_expenses),
            market_average_rate: parse_optional(&self.market_average_rate),
            experience_multiplier: parse_required(&self.experience_multiplier),
            confidence_factor: parse_required(&self.confidence_factor),
            currency,
        }
    }
}

/// A number as it arrives in a JSON payload: either a JSON number or text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

/// Calculator inputs as sent by an API client
///
/// Every number may be missing, `null`, a JSON number or a string. Missing,
/// null or garbled required fields become NaN so the engine names them in
/// its `ValidationError`; missing weeks, experience and confidence take the
/// form defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRateInputs {
    #[serde(default)]
    pub monthly_income_goal: Option<RawNumber>,
    #[serde(default)]
    pub hours_per_week: Option<RawNumber>,
    #[serde(default)]
    pub weeks_per_year: Option<RawNumber>,
    #[serde(default)]
    pub monthly_expenses: Option<RawNumber>,
    #[serde(default)]
    pub market_average_rate: Option<RawNumber>,
    #[serde(default)]
    pub experience_multiplier: Option<RawNumber>,
    #[serde(default)]
    pub confidence_factor: Option<RawNumber>,
    #[serde(default)]
    pub currency: Currency,
}

impl RawRateInputs {
    pub fn to_inputs(&self) -> RateInputs {
        RateInputs {
            monthly_income_goal: required(&self.monthly_income_goal),
            hours_per_week: required(&self.hours_per_week),
            weeks_per_year: or_default(&self.weeks_per_year, DEFAULT_WEEKS_PER_YEAR),
            monthly_expenses: required(&self.monthly_expenses),
            market_average_rate: optional(&self.market_average_rate),
            experience_multiplier: or_default(&self.experience_multiplier, DEFAULT_EXPERIENCE_MULTIPLIER),
            confidence_factor: or_default(&self.confidence_factor, DEFAULT_CONFIDENCE_FACTOR),
            currency: self.currency,
        }
    }
}

fn required(raw: &Option<RawNumber>) -> f64 {
    match raw {
        Some(RawNumber::Number(value)) => *value,
        Some(RawNumber::Text(text)) => parse_required(text),
        None => f64::NAN,
    }
}

fn or_default(raw: &Option<RawNumber>, default: f64) -> f64 {
    match raw {
        Some(RawNumber::Number(value)) => *value,
        Some(RawNumber::Text(text)) => parse_or_default(text, default),
        None => default,
    }
}

fn optional(raw: &Option<RawNumber>) -> Option<f64> {
    match raw {
        Some(RawNumber::Number(value)) => Some(*value),
        Some(RawNumber::Text(text)) => parse_optional(text),
        None => None,
    }
}

/// Finite number in `raw`, if any. Whole-field parse: "12abc" is not 12.
pub(crate) fn parse_optional(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Required number; blank or garbled text becomes NaN for the engine to reject
pub(crate) fn parse_required(raw: &str) -> f64 {
    parse_optional(raw).unwrap_or(f64::NAN)
}

/// Like `parse_required`, but a blank field takes `default`
pub(crate) fn parse_or_default(raw: &str, default: f64) -> f64 {
    if raw.trim().is_empty() {
        default
    } else {
        parse_required(raw)
    }
}
