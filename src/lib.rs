//! Pricing Buddy - Freelance hourly rate engine
//!
//! This library provides:
//! - Suggested hourly, weekly and monthly rates from income goals and expenses
//! - Confidence and experience adjustments, optional market-rate blending
//! - Fixed-table currency conversion with base-currency arithmetic
//! - Platform rate benchmarks, a step-by-step form model and batch runs

pub mod inputs;
pub mod currency;
pub mod calculator;
pub mod market;
pub mod wizard;
pub mod scenario;

// Re-export commonly used types
pub use inputs::{RateInputs, RateForm, ExperienceLevel};
pub use currency::{Currency, CurrencyTable};
pub use calculator::{compute_rate, RateCalculator, CalculatorConfig, RateResult, ValidationError};
pub use wizard::{RateWizard, WizardStep};
pub use scenario::ScenarioRunner;
