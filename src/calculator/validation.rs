//! Field-level validation failures

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Input fields the engine checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    MonthlyIncomeGoal,
    HoursPerWeek,
    WeeksPerYear,
    MonthlyExpenses,
    MarketAverageRate,
    ExperienceMultiplier,
    ConfidenceFactor,
    Currency,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::MonthlyIncomeGoal => "monthly_income_goal",
            Field::HoursPerWeek => "hours_per_week",
            Field::WeeksPerYear => "weeks_per_year",
            Field::MonthlyExpenses => "monthly_expenses",
            Field::MarketAverageRate => "market_average_rate",
            Field::ExperienceMultiplier => "experience_multiplier",
            Field::ConfidenceFactor => "confidence_factor",
            Field::Currency => "currency",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Missing, not a number, or infinite
    NotANumber,
    /// Must be strictly greater than zero
    NotPositive,
    /// Must be zero or more
    Negative,
    /// Exceeds an upper bound
    AboveMaximum { max: f64 },
    /// No usable conversion factor for the selected currency
    UnsupportedCurrency,
    /// Valid on its own, but the rate derived from it overflows
    OutOfRange,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotANumber => write!(f, "must be a valid number"),
            Violation::NotPositive => write!(f, "must be greater than 0"),
            Violation::Negative => write!(f, "must not be negative"),
            Violation::AboveMaximum { max } => write!(f, "must be at most {}", max),
            Violation::UnsupportedCurrency => write!(f, "has no conversion rate"),
            Violation::OutOfRange => write!(f, "is too large to compute a rate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub violation: Violation,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.violation)
    }
}

/// The engine's only failure: one or more input fields are unusable
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("invalid input: {}", join_errors(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Offending fields, in checking order
    pub fn fields(&self) -> Vec<Field> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn violation(&self, field: Field) -> Option<Violation> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.violation)
    }
}

/// Accumulates field failures across a validation pass
#[derive(Debug, Default)]
pub(crate) struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, field: Field, violation: Violation) {
        self.errors.push(FieldError { field, violation });
    }

    /// Finite and > 0, optionally capped
    pub(crate) fn positive(&mut self, field: Field, value: f64, max: Option<f64>) {
        if !value.is_finite() {
            self.fail(field, Violation::NotANumber);
        } else if value <= 0.0 {
            self.fail(field, Violation::NotPositive);
        } else if let Some(max) = max.filter(|max| value > *max) {
            self.fail(field, Violation::AboveMaximum { max });
        }
    }

    /// Finite and >= 0
    pub(crate) fn non_negative(&mut self, field: Field, value: f64) {
        if !value.is_finite() {
            self.fail(field, Violation::NotANumber);
        } else if value < 0.0 {
            self.fail(field, Violation::Negative);
        }
    }

    pub(crate) fn currency_supported(&mut self, supported: bool) {
        if !supported {
            self.fail(Field::Currency, Violation::UnsupportedCurrency);
        }
    }

    /// Flag the field behind the first non-finite value only
    pub(crate) fn first_out_of_range(&mut self, values: &[(Field, f64)]) {
        if let Some(&(field, _)) = values.iter().find(|(_, value)| !value.is_finite()) {
            self.fail(field, Violation::OutOfRange);
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { errors: self.errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checker_collects_every_failure() {
        let mut checker = Checker::default();
        checker.positive(Field::MonthlyIncomeGoal, f64::NAN, None);
        checker.positive(Field::HoursPerWeek, 200.0, Some(168.0));
        checker.non_negative(Field::MonthlyExpenses, -1.0);
        checker.non_negative(Field::ConfidenceFactor, 0.0);

        let err = checker.finish().unwrap_err();
        assert_eq!(
            err.fields(),
            vec![Field::MonthlyIncomeGoal, Field::HoursPerWeek, Field::MonthlyExpenses]
        );
        assert_eq!(err.violation(Field::HoursPerWeek), Some(Violation::AboveMaximum { max: 168.0 }));
        assert!(!err.has_field(Field::ConfidenceFactor));
    }

    #[test]
    fn test_boundaries() {
        let mut checker = Checker::default();
        checker.positive(Field::HoursPerWeek, 168.0, Some(168.0));
        checker.non_negative(Field::MonthlyExpenses, 0.0);
        assert!(checker.finish().is_ok());

        let mut checker = Checker::default();
        checker.positive(Field::WeeksPerYear, 0.0, None);
        assert_eq!(
            checker.finish().unwrap_err().violation(Field::WeeksPerYear),
            Some(Violation::NotPositive)
        );
    }

    #[test]
    fn test_only_first_overflow_is_reported() {
        let mut checker = Checker::default();
        checker.first_out_of_range(&[
            (Field::WeeksPerYear, 1920.0),
            (Field::MonthlyIncomeGoal, f64::INFINITY),
            (Field::HoursPerWeek, f64::INFINITY),
        ]);
        let err = checker.finish().unwrap_err();
        assert_eq!(err.fields(), vec![Field::MonthlyIncomeGoal]);
        assert_eq!(err.violation(Field::MonthlyIncomeGoal), Some(Violation::OutOfRange));
        assert_eq!(
            err.to_string(),
            "invalid input: monthly_income_goal is too large to compute a rate"
        );
    }

    #[test]
    fn test_message_names_fields() {
        let mut checker = Checker::default();
        checker.positive(Field::HoursPerWeek, 200.0, Some(168.0));
        checker.currency_supported(false);
        let message = checker.finish().unwrap_err().to_string();
        assert_eq!(
            message,
            "invalid input: hours_per_week must be at most 168; currency has no conversion rate"
        );
    }
}
