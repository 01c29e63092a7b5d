//! Rate input record and experience presets

use crate::currency::Currency;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Working weeks per year when the user leaves the field untouched
pub const DEFAULT_WEEKS_PER_YEAR: f64 = 48.0;

/// Neutral experience adjustment
pub const DEFAULT_EXPERIENCE_MULTIPLIER: f64 = 1.0;

/// 20% buffer on top of the base rate
pub const DEFAULT_CONFIDENCE_FACTOR: f64 = 0.2;

/// Everything the engine needs for one calculation
///
/// Built fresh for each submission and consumed by a single engine call.
/// Monetary amounts are in `currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateInputs {
    /// Desired take-home income per month
    pub monthly_income_goal: f64,

    /// Billable hours per week, in (0, 168]
    pub hours_per_week: f64,

    /// Working weeks per year
    #[serde(default = "default_weeks_per_year")]
    pub weeks_per_year: f64,

    /// Business expenses per month
    pub monthly_expenses: f64,

    /// Optional benchmark hourly rate. Non-finite values mean "no blending".
    #[serde(default)]
    pub market_average_rate: Option<f64>,

    /// Multiplicative seniority adjustment
    #[serde(default = "default_experience_multiplier")]
    pub experience_multiplier: f64,

    /// Fractional buffer added to the base rate (0.2 = 20%)
    #[serde(default = "default_confidence_factor")]
    pub confidence_factor: f64,

    #[serde(default)]
    pub currency: Currency,
}

fn default_weeks_per_year() -> f64 { DEFAULT_WEEKS_PER_YEAR }
fn default_experience_multiplier() -> f64 { DEFAULT_EXPERIENCE_MULTIPLIER }
fn default_confidence_factor() -> f64 { DEFAULT_CONFIDENCE_FACTOR }

impl RateInputs {
    /// Create inputs in the base currency with default weeks, experience and confidence
    pub fn new(monthly_income_goal: f64, hours_per_week: f64, monthly_expenses: f64) -> Self {
        Self {
            monthly_income_goal,
            hours_per_week,
            weeks_per_year: DEFAULT_WEEKS_PER_YEAR,
            monthly_expenses,
            market_average_rate: None,
            experience_multiplier: DEFAULT_EXPERIENCE_MULTIPLIER,
            confidence_factor: DEFAULT_CONFIDENCE_FACTOR,
            currency: Currency::BASE,
        }
    }

    pub fn with_weeks_per_year(mut self, weeks: f64) -> Self {
        self.weeks_per_year = weeks;
        self
    }

    pub fn with_market_rate(mut self, rate: f64) -> Self {
        self.market_average_rate = Some(rate);
        self
    }

    pub fn with_experience(mut self, multiplier: f64) -> Self {
        self.experience_multiplier = multiplier;
        self
    }

    pub fn with_level(self, level: ExperienceLevel) -> Self {
        self.with_experience(level.multiplier())
    }

    pub fn with_confidence(mut self, factor: f64) -> Self {
        self.confidence_factor = factor;
        self
    }

    pub fn in_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Market rate to blend with, if one was given as a finite number
    pub fn market_rate(&self) -> Option<f64> {
        self.market_average_rate.filter(|rate| rate.is_finite())
    }
}

/// Named seniority presets for the experience multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Intermediate,
    Senior,
    Expert,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Junior,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Senior,
        ExperienceLevel::Expert,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            ExperienceLevel::Junior => 0.8,
            ExperienceLevel::Intermediate => 1.0,
            ExperienceLevel::Senior => 1.3,
            ExperienceLevel::Expert => 1.6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.name() == wanted)
            .ok_or_else(|| format!("unknown experience level: {}", s.trim()))
    }
}
