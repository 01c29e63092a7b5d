//! Scenario runner for repeated and batch rate calculations
//!
//! Builds the calculator once (currency table and config), then prices many
//! inputs or variations of one input without reloading anything.

use crate::calculator::{CalculatorConfig, RateCalculator, RateResult, ValidationError};
use crate::currency::{Currency, CurrencyTable, CurrencyTableError};
use crate::inputs::{BatchEntry, RateInputs};
use rayon::prelude::*;

/// Outcome of one labelled batch row
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub id: String,
    pub currency: Currency,
    pub outcome: Result<RateResult, ValidationError>,
}

/// Pre-built runner for many calculations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// for multiplier in [0.8, 1.0, 1.3] {
///     let result = runner.run(&inputs.clone().with_experience(multiplier));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    calculator: RateCalculator,
}

impl ScenarioRunner {
    /// Create runner with the built-in currency table
    pub fn new() -> Self {
        Self {
            calculator: RateCalculator::default(),
        }
    }

    /// Create runner by loading the currency table from data/currency_rates.csv
    pub fn from_csv() -> Result<Self, CurrencyTableError> {
        Ok(Self::with_table(CurrencyTable::from_csv()?))
    }

    /// Create runner from a specific currency table file
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, CurrencyTableError> {
        Ok(Self::with_table(CurrencyTable::from_csv_path(path)?))
    }

    pub fn with_table(table: CurrencyTable) -> Self {
        Self::with_calculator(RateCalculator::new(table, CalculatorConfig::default()))
    }

    pub fn with_calculator(calculator: RateCalculator) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &RateCalculator {
        &self.calculator
    }

    /// Run a single calculation
    pub fn run(&self, inputs: &RateInputs) -> Result<RateResult, ValidationError> {
        self.calculator.compute(inputs)
    }

    /// Run many calculations in parallel, preserving input order
    pub fn run_batch(&self, inputs: &[RateInputs]) -> Vec<Result<RateResult, ValidationError>> {
        inputs.par_iter().map(|i| self.calculator.compute(i)).collect()
    }

    /// Run labelled batch rows in parallel, logging rows that fail validation
    pub fn run_entries(&self, entries: &[BatchEntry]) -> Vec<BatchOutcome> {
        let outcomes: Vec<BatchOutcome> = entries
            .par_iter()
            .map(|entry| BatchOutcome {
                id: entry.id.clone(),
                currency: entry.inputs.currency,
                outcome: self.calculator.compute(&entry.inputs),
            })
            .collect();

        for outcome in &outcomes {
            if let Err(err) = &outcome.outcome {
                log::warn!("row {}: {}", outcome.id, err);
            }
        }

        outcomes
    }

    /// Interpret the same figures in every currency of the table
    pub fn run_currencies(&self, inputs: &RateInputs) -> Vec<(Currency, Result<RateResult, ValidationError>)> {
        self.calculator
            .currencies()
            .currencies()
            .into_iter()
            .map(|currency| {
                let priced = inputs.clone().in_currency(currency);
                (currency, self.calculator.compute(&priced))
            })
            .collect()
    }

    /// Vary the experience multiplier, holding everything else fixed
    pub fn sweep_experience(&self, inputs: &RateInputs, multipliers: &[f64]) -> Vec<Result<RateResult, ValidationError>> {
        multipliers
            .iter()
            .map(|&m| self.calculator.compute(&inputs.clone().with_experience(m)))
            .collect()
    }

    /// Vary the confidence factor, holding everything else fixed
    pub fn sweep_confidence(&self, inputs: &RateInputs, factors: &[f64]) -> Vec<Result<RateResult, ValidationError>> {
        factors
            .iter()
            .map(|&c| self.calculator.compute(&inputs.clone().with_confidence(c)))
            .collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
