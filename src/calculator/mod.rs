//! Rate calculation engine
//!
//! Turns a validated [`RateInputs`](crate::inputs::RateInputs) into a
//! [`RateResult`]:
//! 1. **Validate** every required field, collecting all failures
//! 2. **Normalize** monetary inputs into the base currency
//! 3. **Annualize** income and expenses, divide by annual working hours
//! 4. **Adjust** for confidence and experience, blend with a market rate
//! 5. **Project** weekly and monthly amounts, convert back and round
//!
//! # Example
//!
//! ```rust
//! use pricing_buddy::{compute_rate, CurrencyTable, RateInputs};
//!
//! let inputs = RateInputs::new(50_000.0, 40.0, 10_000.0);
//! let result = compute_rate(&inputs, &CurrencyTable::default_rates()).unwrap();
//! assert_eq!(result.suggested_rate, 450.0);
//! ```

mod engine;
mod result;
mod validation;

pub use engine::{compute_rate, CalculatorConfig, RateCalculator};
pub use result::{RateBreakdown, RateResult};
pub use validation::{Field, FieldError, ValidationError, Violation};
