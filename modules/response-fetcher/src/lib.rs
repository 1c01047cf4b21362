pub mod config;
pub mod error;
pub mod output;

pub use config::{FetcherConfig, API_PATH};
pub use error::{FetchError, Result};
pub use output::{MemoryOutput, OutputLocation, StdoutOutput, RESPONSE_ELEMENT_ID};

use serde_json::{Number, Value};
use tracing::Instrument;
use uuid::Uuid;

/// Prefix rendered in front of every failure description.
pub const ERROR_PREFIX: &str = "Error: ";

/// Result of one fetch-and-render cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(Value),
    Failure(String),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    /// Text written to the output location: the payload indented by two
    /// spaces with keys in body order, or the error prefix plus message.
    pub fn render(&self) -> String {
        match self {
            FetchOutcome::Success(payload) => {
                serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
            }
            FetchOutcome::Failure(message) => format!("{ERROR_PREFIX}{message}"),
        }
    }
}

impl From<Result<Value>> for FetchOutcome {
    fn from(result: Result<Value>) -> Self {
        match result {
            Ok(payload) => FetchOutcome::Success(payload),
            Err(e) => FetchOutcome::Failure(e.to_string()),
        }
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Decode a response body the way a browser's `res.json()` does: invalid
/// UTF-8 becomes U+FFFD and a leading byte order mark is skipped. Integral
/// floats such as `1.0` are stored as integers so they render as `1`.
pub fn decode_body(body: &[u8]) -> Result<Value> {
    let lossy = String::from_utf8_lossy(body);
    let text = lossy.strip_prefix('\u{feff}').unwrap_or(&lossy[..]);
    let mut value: Value = serde_json::from_str(text)?;
    collapse_integral_floats(&mut value);
    Ok(value)
}

fn collapse_integral_floats(value: &mut Value) {
    match value {
        Value::Number(n) => {
            let integral = n
                .as_f64()
                .filter(|f| n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER);
            if let Some(f) = integral {
                *n = Number::from(f as i64);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(collapse_integral_floats),
        Value::Object(map) => map.values_mut().for_each(collapse_integral_floats),
        _ => {}
    }
}

/// Queries the backend's `/api` endpoint and renders what comes back.
///
/// Invocations are independent: nothing serializes or cancels overlapping
/// calls, so a shared output location shows whichever render ran last.
pub struct ResponseFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl ResponseFetcher {
    pub fn new(config: &FetcherConfig) -> Self {
        // No timeout: an invocation waits as long as the transport does.
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint_url(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the endpoint and decode the body as JSON. The status code is not
    /// inspected; any response with a JSON body succeeds.
    pub async fn fetch(&self) -> Result<Value> {
        let resp = self.client.get(&self.endpoint).send().await?;

        let status = resp.status();
        tracing::debug!(status = status.as_u16(), "Response received");

        let body = resp.bytes().await?;
        decode_body(&body)
    }

    /// Run one cycle: fetch, then overwrite `output` exactly once with either
    /// the formatted payload or the error text.
    pub async fn call_backend<O>(&self, output: &O) -> FetchOutcome
    where
        O: OutputLocation + ?Sized,
    {
        let invocation = Uuid::new_v4();
        let span = tracing::info_span!(
            "fetch_response",
            %invocation,
            endpoint = %self.endpoint,
            output = output.id()
        );

        async {
            let outcome = FetchOutcome::from(self.fetch().await);
            match &outcome {
                FetchOutcome::Success(_) => tracing::info!("Rendered response"),
                FetchOutcome::Failure(message) => {
                    tracing::warn!(error = %message, "Fetch failed, rendering error")
                }
            }
            output.set_text(&outcome.render());
            outcome
        }
        .instrument(span)
        .await
    }
}
