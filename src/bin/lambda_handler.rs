//! AWS Lambda handler for rate calculations
//!
//! Accepts the calculator inputs as JSON and returns the suggested rates, or
//! the list of rejected fields so the caller can show per-field feedback.

use chrono::{DateTime, Utc};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use pricing_buddy::calculator::FieldError;
use pricing_buddy::inputs::RawRateInputs;
use pricing_buddy::{market, RateCalculator, RateResult};
use serde::{Deserialize, Serialize};

/// Input for one calculation
///
/// Numbers arrive loosely typed so a missing or null field is reported in
/// `errors` by name instead of failing the whole payload.
#[derive(Debug, Deserialize)]
pub struct RateRequest {
    #[serde(flatten)]
    pub inputs: RawRateInputs,

    /// Platform whose midpoint replaces the market rate (e.g. "upwork")
    #[serde(default)]
    pub benchmark: Option<String>,
}

/// Output of one calculation
#[derive(Debug, Serialize)]
pub struct RateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RateResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub computed_at: DateTime<Utc>,
    pub execution_time_us: u64,
}

impl RateResponse {
    fn new(start: std::time::Instant) -> Self {
        Self {
            result: None,
            errors: Vec::new(),
            error: None,
            computed_at: Utc::now(),
            execution_time_us: start.elapsed().as_micros() as u64,
        }
    }
}

fn respond(calculator: &RateCalculator, request: RateRequest) -> RateResponse {
    let start = std::time::Instant::now();
    let mut inputs = request.inputs.to_inputs();

    if let Some(name) = request.benchmark.as_deref() {
        let benchmarks = market::default_benchmarks();
        match market::find(&benchmarks, name) {
            Some(benchmark) => match benchmark.market_rate_in(inputs.currency, calculator.currencies()) {
                Some(rate) => inputs.market_average_rate = Some(rate),
                None => {
                    return RateResponse {
                        error: Some(format!(
                            "cannot convert {} benchmark from {} to {}",
                            benchmark.platform,
                            benchmark.currency.code(),
                            inputs.currency.code()
                        )),
                        ..RateResponse::new(start)
                    };
                }
            },
            None => {
                return RateResponse {
                    error: Some(format!("unknown platform benchmark: {}", name)),
                    ..RateResponse::new(start)
                };
            }
        }
    }

    match calculator.compute(&inputs) {
        Ok(result) => RateResponse {
            result: Some(result),
            ..RateResponse::new(start)
        },
        Err(err) => {
            log::info!("rejected request: {}", err);
            RateResponse {
                errors: err.errors().to_vec(),
                error: Some(err.to_string()),
                ..RateResponse::new(start)
            }
        }
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<RateRequest>) -> Result<RateResponse, Error> {
    let calculator = RateCalculator::default();
    Ok(respond(&calculator, event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
