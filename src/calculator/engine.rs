//! Core rate engine

use super::result::{RateBreakdown, RateResult};
use super::validation::{Checker, Field, ValidationError};
use crate::currency::CurrencyTable;
use crate::inputs::RateInputs;

/// Tunable constants of the calculation
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    /// Upper bound for hours per week (inclusive)
    pub max_hours_per_week: f64,

    /// Weeks in the monthly projection, independent of weeks_per_year
    pub weeks_per_month: f64,

    /// Decimal places of every presented amount
    pub decimal_places: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_hours_per_week: 168.0, // hours in a week
            weeks_per_month: 4.0,
            decimal_places: 2,
        }
    }
}

/// Stateless rate engine over a fixed currency table
#[derive(Debug, Clone)]
pub struct RateCalculator {
    currencies: CurrencyTable,
    config: CalculatorConfig,
}

/// Compute rates with the default configuration
pub fn compute_rate(inputs: &RateInputs, currencies: &CurrencyTable) -> Result<RateResult, ValidationError> {
    RateCalculator::new(currencies.clone(), CalculatorConfig::default()).compute(inputs)
}

impl RateCalculator {
    pub fn new(currencies: CurrencyTable, config: CalculatorConfig) -> Self {
        Self { currencies, config }
    }

    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Check every required field and the currency
    pub fn validate(&self, inputs: &RateInputs) -> Result<(), ValidationError> {
        self.check(inputs).map(|_| ())
    }

    /// Check only the fields collected on the first form step
    pub fn validate_basics(&self, inputs: &RateInputs) -> Result<(), ValidationError> {
        let mut checker = Checker::default();
        self.check_basics(&mut checker, inputs);
        checker.finish()
    }

    fn check_basics(&self, checker: &mut Checker, inputs: &RateInputs) {
        checker.positive(Field::MonthlyIncomeGoal, inputs.monthly_income_goal, None);
        checker.positive(Field::HoursPerWeek, inputs.hours_per_week, Some(self.config.max_hours_per_week));
        checker.positive(Field::WeeksPerYear, inputs.weeks_per_year, None);
        checker.non_negative(Field::MonthlyExpenses, inputs.monthly_expenses);
    }

    /// Validate and return the base-units-per-unit factor of the input currency
    fn check(&self, inputs: &RateInputs) -> Result<f64, ValidationError> {
        let factor = self.currencies.base_per_unit(inputs.currency);

        let mut checker = Checker::default();
        self.check_basics(&mut checker, inputs);
        checker.positive(Field::ExperienceMultiplier, inputs.experience_multiplier, None);
        checker.non_negative(Field::ConfidenceFactor, inputs.confidence_factor);
        checker.currency_supported(factor.is_some());
        checker.finish()?;

        // currency_supported guarantees the factor is present
        Ok(factor.unwrap_or(1.0))
    }

    /// Compute suggested rates for one submission
    pub fn compute(&self, inputs: &RateInputs) -> Result<RateResult, ValidationError> {
        let factor = self.check(inputs)?;

        // Everything below is in base units until the final conversion
        let monthly_income_goal = inputs.monthly_income_goal * factor;
        let monthly_expenses = inputs.monthly_expenses * factor;
        let market_rate = inputs.market_rate().map(|rate| rate * factor);

        let yearly_expenses = monthly_expenses * 12.0;
        let yearly_income_goal = monthly_income_goal * 12.0 + yearly_expenses;

        let total_working_hours = inputs.hours_per_week * inputs.weeks_per_year;
        let base_rate = yearly_income_goal / total_working_hours;

        let adjusted_rate = base_rate * (1.0 + inputs.confidence_factor);
        let final_rate = adjusted_rate * inputs.experience_multiplier;

        let suggested_rate = match market_rate {
            Some(market) => (final_rate + market) / 2.0,
            None => final_rate,
        };

        let weekly_rate = suggested_rate * inputs.hours_per_week;
        let monthly_rate = weekly_rate * self.config.weeks_per_month;

        log::debug!(
            "computed rate in base units: base={:.4} final={:.4} suggested={:.4} (market={:?})",
            base_rate, final_rate, suggested_rate, market_rate
        );

        let present = |base_amount: f64| self.round(base_amount / factor);

        let result = RateResult {
            currency: inputs.currency,
            base_rate: present(base_rate),
            final_rate: present(final_rate),
            suggested_rate: present(suggested_rate),
            weekly_rate: present(weekly_rate),
            monthly_rate: present(monthly_rate),
            market_blended: market_rate.is_some(),
            breakdown: RateBreakdown {
                yearly_expenses: present(yearly_expenses),
                yearly_income_goal: present(yearly_income_goal),
                total_working_hours: self.round(total_working_hours),
                adjusted_rate: present(adjusted_rate),
            },
        };
        Self::check_in_range(&result)?;
        Ok(result)
    }

    /// Reject results where a finite input still overflowed, naming the
    /// input that caused the first infinite step
    fn check_in_range(result: &RateResult) -> Result<(), ValidationError> {
        let mut checker = Checker::default();
        checker.first_out_of_range(&[
            (Field::WeeksPerYear, result.breakdown.total_working_hours),
            (Field::MonthlyExpenses, result.breakdown.yearly_expenses),
            (Field::MonthlyIncomeGoal, result.breakdown.yearly_income_goal),
            (Field::HoursPerWeek, result.base_rate),
            (Field::ConfidenceFactor, result.breakdown.adjusted_rate),
            (Field::ExperienceMultiplier, result.final_rate),
            (Field::MarketAverageRate, result.suggested_rate),
            (Field::HoursPerWeek, result.weekly_rate),
            (Field::HoursPerWeek, result.monthly_rate),
        ]);
        checker.finish().map_err(|err| {
            log::warn!("rate overflowed: {}", err);
            err
        })
    }

    fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.config.decimal_places as i32);
        let scaled = value * scale;
        // Huge values have no fractional digits left to round
        if scaled.is_finite() {
            scaled.round() / scale
        } else {
            value
        }
    }
}

impl Default for RateCalculator {
    fn default() -> Self {
        Self::new(CurrencyTable::default_rates(), CalculatorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Violation;
    use crate::currency::Currency;
    use approx::assert_abs_diff_eq;

    fn scenario_one() -> RateInputs {
        RateInputs::new(50_000.0, 40.0, 10_000.0)
            .with_weeks_per_year(48.0)
            .with_experience(1.0)
            .with_confidence(0.2)
    }

    fn usd_inputs() -> RateInputs {
        RateInputs::new(4_000.0, 30.0, 500.0)
            .with_weeks_per_year(46.0)
            .with_market_rate(35.0)
            .with_experience(1.3)
            .with_confidence(0.15)
            .in_currency(Currency::Usd)
    }

    #[test]
    fn test_scenario_without_market_rate() {
        let result = RateCalculator::default().compute(&scenario_one()).unwrap();

        assert_eq!(result.breakdown.yearly_income_goal, 720_000.0);
        assert_eq!(result.breakdown.yearly_expenses, 120_000.0);
        assert_eq!(result.breakdown.total_working_hours, 1920.0);
        assert_eq!(result.base_rate, 375.0);
        assert_eq!(result.final_rate, 450.0);
        assert_eq!(result.suggested_rate, 450.0);
        assert_eq!(result.weekly_rate, 18_000.0);
        assert_eq!(result.monthly_rate, 72_000.0);
        assert!(!result.market_blended);
        assert_eq!(result.currency, Currency::Inr);
    }

    #[test]
    fn test_scenario_with_market_rate() {
        let inputs = scenario_one().with_market_rate(1200.0);
        let result = RateCalculator::default().compute(&inputs).unwrap();

        assert_eq!(result.final_rate, 450.0);
        assert_eq!(result.suggested_rate, 825.0);
        assert_eq!(result.weekly_rate, 33_000.0);
        assert_eq!(result.monthly_rate, 132_000.0);
        assert!(result.market_blended);
    }

    #[test]
    fn test_scenario_too_many_hours() {
        let mut inputs = scenario_one();
        inputs.hours_per_week = 200.0;

        let err = RateCalculator::default().compute(&inputs).unwrap_err();
        assert_eq!(err.fields(), vec![Field::HoursPerWeek]);
        assert_eq!(err.violation(Field::HoursPerWeek), Some(Violation::AboveMaximum { max: 168.0 }));
    }

    #[test]
    fn test_free_function_matches_engine() {
        let table = CurrencyTable::default_rates();
        let via_fn = compute_rate(&scenario_one(), &table).unwrap();
        let via_engine = RateCalculator::new(table, CalculatorConfig::default())
            .compute(&scenario_one())
            .unwrap();
        assert_eq!(via_fn, via_engine);
    }

    #[test]
    fn test_deterministic() {
        let calculator = RateCalculator::default();
        for inputs in [scenario_one(), scenario_one().with_market_rate(999.99), usd_inputs()] {
            let first = calculator.compute(&inputs).unwrap();
            let second = calculator.compute(&inputs).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.suggested_rate.to_bits(), second.suggested_rate.to_bits());
        }
    }

    #[test]
    fn test_income_goal_monotonic() {
        let calculator = RateCalculator::default();
        let results: Vec<RateResult> = [10_000.0, 20_000.0, 50_000.0, 120_000.0]
            .iter()
            .map(|&income| {
                let mut inputs = scenario_one().with_market_rate(800.0);
                inputs.monthly_income_goal = income;
                calculator.compute(&inputs).unwrap()
            })
            .collect();

        for pair in results.windows(2) {
            assert!(pair[1].base_rate > pair[0].base_rate);
            assert!(pair[1].final_rate > pair[0].final_rate);
            assert!(pair[1].suggested_rate > pair[0].suggested_rate);
        }
    }

    #[test]
    fn test_confidence_and_experience_monotonic() {
        let calculator = RateCalculator::default();

        let by_confidence: Vec<f64> = [0.0, 0.1, 0.25, 0.5]
            .iter()
            .map(|&c| calculator.compute(&scenario_one().with_confidence(c)).unwrap().final_rate)
            .collect();
        assert!(by_confidence.windows(2).all(|w| w[1] > w[0]));

        let by_experience: Vec<RateResult> = [0.8, 1.0, 1.3, 1.6]
            .iter()
            .map(|&m| calculator.compute(&scenario_one().with_experience(m)).unwrap())
            .collect();
        for pair in by_experience.windows(2) {
            assert!(pair[1].final_rate > pair[0].final_rate);
            assert!(pair[1].suggested_rate > pair[0].suggested_rate);
        }
    }

    #[test]
    fn test_absent_market_rate_leaves_final_rate() {
        let calculator = RateCalculator::default();
        for inputs in [
            scenario_one(),
            scenario_one().with_market_rate(f64::NAN),
            scenario_one().with_market_rate(f64::INFINITY),
            usd_inputs().with_confidence(0.33),
        ] {
            let mut inputs = inputs;
            if inputs.market_rate().is_some() {
                inputs.market_average_rate = None;
            }
            let result = calculator.compute(&inputs).unwrap();
            assert_eq!(result.suggested_rate, result.final_rate);
            assert!(!result.market_blended);
        }
    }

    #[test]
    fn test_market_blend_is_plain_average() {
        let calculator = RateCalculator::default();
        for market in [0.0, 100.0, 450.0, 1200.0, 5000.5] {
            let result = calculator.compute(&scenario_one().with_market_rate(market)).unwrap();
            assert_abs_diff_eq!(result.suggested_rate, (result.final_rate + market) / 2.0, epsilon = 0.01);
        }
    }

    fn assert_rejected(field: Field, corrupt: impl Fn(&mut RateInputs)) {
        let mut inputs = scenario_one();
        corrupt(&mut inputs);
        let err = RateCalculator::default().compute(&inputs).unwrap_err();
        assert_eq!(err.fields(), vec![field], "inputs: {:?}", inputs);
    }

    #[test]
    fn test_validation_gate() {
        assert_rejected(Field::MonthlyIncomeGoal, |i| i.monthly_income_goal = f64::NAN);
        assert_rejected(Field::MonthlyIncomeGoal, |i| i.monthly_income_goal = 0.0);
        assert_rejected(Field::MonthlyIncomeGoal, |i| i.monthly_income_goal = -100.0);
        assert_rejected(Field::HoursPerWeek, |i| i.hours_per_week = 0.0);
        assert_rejected(Field::HoursPerWeek, |i| i.hours_per_week = 168.5);
        assert_rejected(Field::HoursPerWeek, |i| i.hours_per_week = f64::INFINITY);
        assert_rejected(Field::WeeksPerYear, |i| i.weeks_per_year = 0.0);
        assert_rejected(Field::WeeksPerYear, |i| i.weeks_per_year = f64::NAN);
        assert_rejected(Field::MonthlyExpenses, |i| i.monthly_expenses = -1.0);
        assert_rejected(Field::MonthlyExpenses, |i| i.monthly_expenses = f64::NAN);
        assert_rejected(Field::ExperienceMultiplier, |i| i.experience_multiplier = 0.0);
        assert_rejected(Field::ExperienceMultiplier, |i| i.experience_multiplier = f64::NAN);
        assert_rejected(Field::ConfidenceFactor, |i| i.confidence_factor = -0.1);
        assert_rejected(Field::ConfidenceFactor, |i| i.confidence_factor = f64::NEG_INFINITY);
    }

    #[test]
    fn test_validation_reports_all_fields() {
        let mut inputs = scenario_one();
        inputs.monthly_income_goal = f64::NAN;
        inputs.monthly_expenses = f64::NAN;
        inputs.confidence_factor = -1.0;

        let err = RateCalculator::default().compute(&inputs).unwrap_err();
        assert_eq!(
            err.fields(),
            vec![Field::MonthlyIncomeGoal, Field::MonthlyExpenses, Field::ConfidenceFactor]
        );
    }

    #[test]
    fn test_boundary_values_accepted() {
        let mut inputs = scenario_one();
        inputs.hours_per_week = 168.0;
        inputs.monthly_expenses = 0.0;
        inputs.confidence_factor = 0.0;

        let result = RateCalculator::default().compute(&inputs).unwrap();
        assert_eq!(result.final_rate, result.base_rate);
    }

    #[test]
    fn test_unsupported_currency() {
        let calculator = RateCalculator::new(CurrencyTable::new(), CalculatorConfig::default());
        let err = calculator.compute(&usd_inputs()).unwrap_err();
        assert_eq!(err.fields(), vec![Field::Currency]);

        assert!(calculator.compute(&scenario_one()).is_ok());
    }

    #[test]
    fn test_currency_round_trip() {
        let table = CurrencyTable::default_rates();
        let factor = table.base_per_unit(Currency::Usd).unwrap();
        let calculator = RateCalculator::new(table, CalculatorConfig::default());

        let in_usd = usd_inputs();
        let direct = calculator.compute(&in_usd).unwrap();

        let mut in_inr = in_usd.clone().in_currency(Currency::Inr);
        in_inr.monthly_income_goal *= factor;
        in_inr.monthly_expenses *= factor;
        in_inr.market_average_rate = in_usd.market_average_rate.map(|m| m * factor);
        let via_base = calculator.compute(&in_inr).unwrap();

        assert_abs_diff_eq!(via_base.suggested_rate / factor, direct.suggested_rate, epsilon = 0.01);
        assert_abs_diff_eq!(via_base.base_rate / factor, direct.base_rate, epsilon = 0.01);
    }

    #[test]
    fn test_usd_figures() {
        // 4000*12 + 500*12 = 54000 per year over 30*46 = 1380 hours
        let result = RateCalculator::default().compute(&usd_inputs()).unwrap();
        assert_abs_diff_eq!(result.base_rate, 39.13, epsilon = 1e-9);
        assert_abs_diff_eq!(result.breakdown.yearly_income_goal, 54_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.breakdown.total_working_hours, 1380.0, epsilon = 1e-9);
        assert_eq!(result.currency, Currency::Usd);
    }

    #[test]
    fn test_currency_toggle_has_no_residue() {
        let calculator = RateCalculator::default();
        let inr = scenario_one();
        let usd = scenario_one().in_currency(Currency::Usd);

        let before = calculator.compute(&inr).unwrap();
        let _ = calculator.compute(&usd).unwrap();
        let after = calculator.compute(&inr).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_weeks_per_month_is_configurable() {
        let config = CalculatorConfig {
            weeks_per_month: 52.0 / 12.0,
            ..Default::default()
        };
        let calculator = RateCalculator::new(CurrencyTable::default_rates(), config);
        let result = calculator.compute(&scenario_one()).unwrap();
        assert_abs_diff_eq!(result.monthly_rate, 78_000.0, epsilon = 0.01);
    }

    fn assert_overflow(field: Field, inputs: RateInputs) {
        let err = RateCalculator::default().compute(&inputs).unwrap_err();
        assert_eq!(err.fields(), vec![field], "inputs: {:?}", inputs);
        assert_eq!(err.violation(field), Some(Violation::OutOfRange));
    }

    #[test]
    fn test_overflowing_inputs_are_rejected() {
        assert_overflow(
            Field::MonthlyIncomeGoal,
            RateInputs::new(1e307, 40.0, 0.0).in_currency(Currency::Usd),
        );
        assert_overflow(
            Field::MonthlyExpenses,
            RateInputs::new(50_000.0, 40.0, 1e307).in_currency(Currency::Usd),
        );
        assert_overflow(
            Field::MarketAverageRate,
            scenario_one().with_market_rate(1e307).in_currency(Currency::Usd),
        );
        assert_overflow(Field::ExperienceMultiplier, scenario_one().with_experience(1e308));
        assert_overflow(Field::ConfidenceFactor, scenario_one().with_confidence(1e308));
        assert_overflow(Field::WeeksPerYear, scenario_one().with_weeks_per_year(1e308));
    }

    #[test]
    fn test_large_finite_result_is_kept() {
        // 1e306 * 12 stays finite even though it cannot be scaled for rounding
        let result = RateCalculator::default()
            .compute(&RateInputs::new(1e306, 40.0, 0.0))
            .unwrap();
        assert!(result.breakdown.yearly_income_goal.is_finite());
        assert!(result.suggested_rate.is_finite());
    }

    #[test]
    fn test_validate_basics_ignores_fine_tuning_fields() {
        let mut inputs = scenario_one();
        inputs.experience_multiplier = f64::NAN;
        let calculator = RateCalculator::default();

        assert!(calculator.validate_basics(&inputs).is_ok());
        assert!(calculator.validate(&inputs).is_err());
    }
}
