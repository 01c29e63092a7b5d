//! Calculation output

use crate::currency::Currency;
use serde::{Deserialize, Serialize};

/// Suggested rates for one calculation, in the display currency
///
/// Every monetary figure is rounded for presentation; nothing downstream
/// should feed these back into further arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateResult {
    /// Display currency of every amount below
    pub currency: Currency,

    /// Hourly rate covering income and expenses, before adjustments
    pub base_rate: f64,

    /// Base rate after confidence and experience adjustment
    pub final_rate: f64,

    /// Final rate, averaged with the market rate when one was given
    pub suggested_rate: f64,

    /// Suggested rate over one working week
    pub weekly_rate: f64,

    /// Weekly rate over a four-week month
    pub monthly_rate: f64,

    /// Whether a market rate was blended in
    pub market_blended: bool,

    pub breakdown: RateBreakdown,
}

/// Intermediate figures behind the headline rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBreakdown {
    pub yearly_expenses: f64,
    /// Take-home goal plus expenses, per year
    pub yearly_income_goal: f64,
    pub total_working_hours: f64,
    /// Base rate with the confidence buffer only
    pub adjusted_rate: f64,
}

impl RateResult {
    /// Premium of the suggested rate over the bare base rate, as a fraction
    pub fn markup_over_base(&self) -> f64 {
        if self.base_rate <= 0.0 {
            0.0
        } else {
            self.suggested_rate / self.base_rate - 1.0
        }
    }

    /// One-line human readable summary
    pub fn summary_line(&self) -> String {
        let symbol = self.currency.symbol();
        format!(
            "{}{:.2}/hour ({}{:.2}/week, {}{:.2}/month)",
            symbol, self.suggested_rate, symbol, self.weekly_rate, symbol, self.monthly_rate
        )
    }
}
