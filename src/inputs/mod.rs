//! Rate inputs: the per-submission data model, raw form parsing and batch loading

mod data;
mod form;
pub mod loader;

pub use data::{RateInputs, ExperienceLevel, DEFAULT_WEEKS_PER_YEAR, DEFAULT_EXPERIENCE_MULTIPLIER, DEFAULT_CONFIDENCE_FACTOR};
pub use form::{RateForm, RawNumber, RawRateInputs};
pub use loader::{load_inputs, load_inputs_from_reader, BatchEntry, InputLoadError};
