//! HTTP calls against the prediction service.

use serde::{Deserialize, Serialize};

use super::descriptor::{self, FeatureValues, ModelDescriptor};
use crate::http_client;

const MAX_MODEL_INFO_BYTES: usize = 1024 * 1024;
const MAX_PREDICT_RESPONSE_BYTES: usize = 64 * 1024;
const MAX_HEALTH_RESPONSE_BYTES: usize = 64 * 1024;

/// Failure reading a GET endpoint (`/model-info`, `/health`).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Failure of a `POST /predict` call.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The service answered with a non-2xx status.
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },
    /// No response was received.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// A 2xx response whose body could not be understood.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Successful prediction as returned by the service.
///
/// Only `label` is read; any other fields in the reply are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionLabel {
    pub label: String,
}

/// Body of `GET /health`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    features: &'a FeatureValues,
}

#[derive(Debug, Default, Deserialize)]
struct PredictSuccessWire {
    label: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PredictErrorWire {
    error: Option<String>,
}

/// Join a base URL and an endpoint path without doubling slashes.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Fetch the model description from `GET {base}/model-info`.
pub fn fetch_model_info(base_url: &str) -> Result<ModelDescriptor, FetchError> {
    let body = get_text(&endpoint_url(base_url, "model-info"), MAX_MODEL_INFO_BYTES)?;
    descriptor::parse_model_info(&body).map_err(|err| FetchError::InvalidResponse(err.to_string()))
}

/// Fetch `GET {base}/health`.
pub fn check_health(base_url: &str) -> Result<HealthStatus, FetchError> {
    let body = get_text(&endpoint_url(base_url, "health"), MAX_HEALTH_RESPONSE_BYTES)?;
    serde_json::from_str(body.trim()).map_err(|err| FetchError::InvalidResponse(err.to_string()))
}

/// Post the feature values to `POST {base}/predict`.
pub fn request_prediction(
    base_url: &str,
    features: &FeatureValues,
) -> Result<PredictionLabel, PredictError> {
    let url = endpoint_url(base_url, "predict");
    let request = http_client::agent()
        .post(&url)
        .set("Accept", "application/json")
        .set("Content-Type", "application/json");
    match request.send_json(PredictRequest { features }) {
        Ok(response) => {
            let body = http_client::read_response_text(response, MAX_PREDICT_RESPONSE_BYTES)
                .map_err(|err| PredictError::Malformed(err.to_string()))?;
            parse_predict_success(&body)
        }
        Err(ureq::Error::Status(status, response)) => {
            let body = http_client::read_response_text(response, MAX_PREDICT_RESPONSE_BYTES)
                .unwrap_or_default();
            Err(PredictError::Server {
                status,
                message: parse_server_error(&body),
            })
        }
        Err(ureq::Error::Transport(err)) => Err(PredictError::Transport(err.to_string())),
    }
}

fn get_text(url: &str, max_bytes: usize) -> Result<String, FetchError> {
    let response = match http_client::agent().get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, _)) => return Err(FetchError::Status(code)),
        Err(ureq::Error::Transport(err)) => return Err(FetchError::Transport(err.to_string())),
    };
    http_client::read_response_text(response, max_bytes)
        .map_err(|err| FetchError::InvalidResponse(err.to_string()))
}

fn parse_predict_success(body: &str) -> Result<PredictionLabel, PredictError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictError::Malformed("Empty response body".to_string()));
    }
    let wire: PredictSuccessWire = serde_json::from_str(trimmed)
        .map_err(|err| PredictError::Malformed(format!("{err}: {trimmed}")))?;
    let label = wire
        .label
        .ok_or_else(|| PredictError::Malformed(format!("Missing label: {trimmed}")))?;
    Ok(PredictionLabel { label })
}

/// Pull a non-empty `error` string out of an error body, if any.
fn parse_server_error(body: &str) -> Option<String> {
    let wire: PredictErrorWire = serde_json::from_str(body.trim()).ok()?;
    wire.error.filter(|message| !message.trim().is_empty())
}
