//! Step-by-step calculator form
//!
//! Collect the basics, fine-tune the adjustments, then show the results.
//! The engine knows nothing about steps; the wizard only decides when to
//! call it. Changing the display currency on the results step re-invokes the
//! engine explicitly.

use crate::calculator::{RateCalculator, RateResult, ValidationError};
use crate::currency::Currency;
use crate::inputs::RateForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Income goal, hours, weeks and expenses
    Basics,
    /// Market rate, experience multiplier and confidence factor
    FineTune,
    Results,
}

impl WizardStep {
    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Basics => "Basics",
            WizardStep::FineTune => "Fine-tune",
            WizardStep::Results => "Results",
        }
    }
}

/// Caller-owned form state
#[derive(Debug, Clone)]
pub struct RateWizard {
    pub form: RateForm,
    currency: Currency,
    step: WizardStep,
    result: Option<RateResult>,
}

impl RateWizard {
    pub fn new(currency: Currency) -> Self {
        Self {
            form: RateForm::default(),
            currency,
            step: WizardStep::Basics,
            result: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Result of the last successful calculation, shown on the results step
    pub fn result(&self) -> Option<&RateResult> {
        self.result.as_ref()
    }

    /// Move forward one step
    ///
    /// Leaving the basics step requires valid basic fields; leaving the
    /// fine-tune step runs the full calculation. On failure the step is
    /// unchanged.
    pub fn advance(&mut self, calculator: &RateCalculator) -> Result<WizardStep, ValidationError> {
        let inputs = self.form.to_inputs(self.currency);

        self.step = match self.step {
            WizardStep::Basics => {
                calculator.validate_basics(&inputs)?;
                WizardStep::FineTune
            }
            WizardStep::FineTune => {
                self.result = Some(calculator.compute(&inputs)?);
                WizardStep::Results
            }
            WizardStep::Results => WizardStep::Results,
        };

        Ok(self.step)
    }

    /// Move back one step, dropping the result when leaving the results step
    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::Basics | WizardStep::FineTune => WizardStep::Basics,
            WizardStep::Results => {
                self.result = None;
                WizardStep::FineTune
            }
        };
        self.step
    }

    /// Switch the display currency
    ///
    /// Form amounts are read as being in the new currency. On the results
    /// step the rate is recomputed right away.
    pub fn set_currency(&mut self, currency: Currency, calculator: &RateCalculator) -> Result<(), ValidationError> {
        self.currency = currency;

        if self.step == WizardStep::Results {
            match calculator.compute(&self.form.to_inputs(currency)) {
                Ok(result) => self.result = Some(result),
                Err(err) => {
                    self.result = None;
                    self.step = WizardStep::FineTune;
                    return Err(err);
                }
            }
        }

        Ok(())
    }

    /// Start over with an empty form, keeping the currency
    pub fn reset(&mut self) {
        *self = Self::new(self.currency);
    }
}

impl Default for RateWizard {
    fn default() -> Self {
        Self::new(Currency::BASE)
    }
}
