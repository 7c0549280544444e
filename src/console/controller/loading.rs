use super::*;
use crate::model_api::FetchError;

impl ConsoleController {
    /// Kick off the one metadata load this console will ever make.
    pub fn start(&mut self) {
        if self.jobs.begin_model_info_load() {
            tracing::info!("Loading model info");
            self.ui.load = LoadOutcome::Pending;
            self.set_status("Loading model info…", StatusTone::Busy);
        }
    }

    /// Pending -> Ready seeds the values exactly once; later deliveries are ignored.
    pub(super) fn apply_model_info_result(&mut self, result: Result<ModelDescriptor, FetchError>) {
        self.jobs.clear_model_info_load();
        if self.ui.load != LoadOutcome::Pending {
            tracing::debug!("Model info already applied; ignoring duplicate result");
            return;
        }
        match result {
            Ok(descriptor) => {
                tracing::info!(
                    features = descriptor.features.len(),
                    presets = descriptor.presets.len(),
                    "Model info loaded"
                );
                self.values = ValueStore::seeded(&descriptor);
                self.descriptor = descriptor;
                self.ui.load = LoadOutcome::Ready;
                let text = if self.descriptor.features.is_empty() {
                    "Model info loaded, but it lists no features".to_string()
                } else {
                    format!("Model ready: {} features", self.descriptor.features.len())
                };
                let tone = if self.descriptor.features.is_empty() {
                    StatusTone::Warning
                } else {
                    StatusTone::Info
                };
                self.set_status(text, tone);
            }
            Err(err) => {
                tracing::warn!("Model info load failed: {err}");
                self.ui.load = LoadOutcome::Failed(MODEL_INFO_FAILED_MESSAGE.to_string());
                self.set_status(MODEL_INFO_FAILED_MESSAGE, StatusTone::Error);
            }
        }
    }
}
