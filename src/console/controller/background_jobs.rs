use super::jobs::JobMessage;
use super::*;

impl ConsoleController {
    /// Apply every finished background result. Called once per frame.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => break,
            };
            match message {
                JobMessage::ModelInfoLoaded(message) => {
                    self.apply_model_info_result(message.result)
                }
                JobMessage::PredictionFinished(message) => {
                    self.apply_prediction_result(message.request_id, message.result)
                }
                JobMessage::HealthChecked(message) => self.apply_health_result(message.result),
            }
        }
    }
}
