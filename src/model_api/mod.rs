//! Client for the remote prediction service.
//!
//! The service is a black box with three endpoints: `GET /model-info`
//! describes the model's features, ranges and presets, `POST /predict`
//! classifies a feature vector and `GET /health` reports liveness. The
//! console reaches it through [`ModelService`] so tests can script replies.

pub mod api;
mod descriptor;

pub use api::{FetchError, HealthStatus, PredictError, PredictionLabel};
pub use descriptor::{FeatureRange, FeatureValues, ModelDescriptor, preset_display_name};

/// Operations the console needs from the prediction service.
///
/// Calls block; the console runs them on background threads.
pub trait ModelService: Send + Sync {
    fn model_info(&self) -> Result<ModelDescriptor, FetchError>;
    fn predict(&self, features: &FeatureValues) -> Result<PredictionLabel, PredictError>;
    fn health(&self) -> Result<HealthStatus, FetchError>;
}

/// [`ModelService`] over HTTP rooted at a base URL.
#[derive(Clone, Debug)]
pub struct HttpModelService {
    base_url: String,
}

impl HttpModelService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ModelService for HttpModelService {
    fn model_info(&self) -> Result<ModelDescriptor, FetchError> {
        api::fetch_model_info(&self.base_url)
    }

    fn predict(&self, features: &FeatureValues) -> Result<PredictionLabel, PredictError> {
        api::request_prediction(&self.base_url, features)
    }

    fn health(&self) -> Result<HealthStatus, FetchError> {
        api::check_health(&self.base_url)
    }
}
