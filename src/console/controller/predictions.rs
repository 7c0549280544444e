use super::jobs::PredictionJob;
use super::*;
use crate::model_api::{PredictError, PredictionLabel};

impl ConsoleController {
    /// Send the current values for classification.
    ///
    /// Gated by [`ConsoleController::can_predict`] in the UI, not here. Each
    /// call supersedes the previous one: only the latest request's result is
    /// applied.
    pub fn predict(&mut self) {
        let request_id = self.jobs.next_predict_request_id();
        let features = self.values.values().clone();
        tracing::info!(request_id, features = features.len(), "Requesting prediction");
        self.ui.prediction = PredictionOutcome::Pending;
        self.set_status(PREDICTING_TEXT, StatusTone::Busy);
        self.jobs.begin_prediction(PredictionJob {
            request_id,
            features,
        });
    }

    pub(super) fn apply_prediction_result(
        &mut self,
        request_id: u64,
        result: Result<PredictionLabel, PredictError>,
    ) {
        if !self.jobs.is_latest_prediction(request_id) {
            tracing::debug!(request_id, "Dropping superseded prediction result");
            return;
        }
        self.jobs.clear_prediction();
        match result {
            Ok(prediction) => {
                tracing::info!(request_id, label = %prediction.label, "Prediction received");
                self.set_status(format!("Prediction: {}", prediction.label), StatusTone::Info);
                self.ui.prediction = PredictionOutcome::Success(prediction);
            }
            Err(err) => {
                tracing::warn!(request_id, "Prediction failed: {err}");
                let message = failure_message(err);
                self.set_status(message.clone(), StatusTone::Error);
                self.ui.prediction = PredictionOutcome::Failure(message);
            }
        }
    }
}

/// User-facing text for a failed prediction.
fn failure_message(err: PredictError) -> String {
    match err {
        PredictError::Server {
            message: Some(message),
            ..
        } => message,
        PredictError::Server { message: None, .. } => PREDICTION_FAILED_MESSAGE.to_string(),
        PredictError::Transport(_) | PredictError::Malformed(_) => {
            NETWORK_ERROR_MESSAGE.to_string()
        }
    }
}
