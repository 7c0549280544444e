//! View-model for the prediction console.
//!
//! Owns the model metadata, the feature values and the outcome of the last
//! load/predict. Network calls run on background threads; their results are
//! applied in [`ConsoleController::poll_background_jobs`], which the UI calls
//! every frame, so all state changes happen on the UI thread.

use crate::console::state::*;
use crate::console::ui::style::{self, StatusTone};
use crate::console::values::{ValueError, ValueStore};
use crate::console::view_model::{self, FeatureRowView, PresetButtonView};
use crate::model_api::{FeatureValues, HttpModelService, ModelDescriptor, ModelService};
use std::sync::Arc;
use std::time::{Duration, Instant};

mod background_jobs;
mod health;
mod jobs;
mod loading;
mod predictions;
#[cfg(test)]
mod test_support;

use jobs::ConsoleJobs;

/// One console session: created on mount, dropped on unmount.
pub struct ConsoleController {
    pub ui: ConsoleUiState,
    descriptor: ModelDescriptor,
    values: ValueStore,
    jobs: ConsoleJobs,
}

impl ConsoleController {
    pub fn new(service: Arc<dyn ModelService>) -> Self {
        Self {
            ui: ConsoleUiState::default(),
            descriptor: ModelDescriptor::default(),
            values: ValueStore::default(),
            jobs: ConsoleJobs::new(service),
        }
    }

    /// Console talking HTTP to `endpoint`.
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self::new(Arc::new(HttpModelService::new(endpoint)))
    }

    pub fn descriptor(&self) -> &ModelDescriptor {
        &self.descriptor
    }

    pub fn values(&self) -> &FeatureValues {
        self.values.values()
    }

    pub fn value(&self, feature: &str) -> Option<f64> {
        self.values.get(feature)
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.ui.load
    }

    pub fn prediction_outcome(&self) -> &PredictionOutcome {
        &self.ui.prediction
    }

    /// Slider edit: replace one value, keep the rest.
    pub fn set_feature_value(&mut self, feature: &str, value: f64) {
        self.values.set_feature_value(feature, value);
    }

    /// Validated edit for callers that are not bound to a slider.
    pub fn set_feature_value_checked(&mut self, feature: &str, value: f64) -> Result<(), ValueError> {
        self.values
            .set_feature_value_checked(&self.descriptor, feature, value)
    }

    /// Replace all values with the named preset and clear the shown result.
    ///
    /// Unknown names are ignored. Returns whether a preset was applied.
    pub fn apply_preset(&mut self, name: &str) -> bool {
        let Some(preset) = self.descriptor.preset(name) else {
            tracing::debug!("Ignoring unknown preset {name:?}");
            return false;
        };
        self.values.replace_with(preset);
        // A result still in flight belongs to the old inputs.
        self.jobs.clear_prediction();
        self.ui.prediction = PredictionOutcome::Empty;
        self.set_status(
            format!("Preset applied: {}", crate::model_api::preset_display_name(name)),
            StatusTone::Info,
        );
        true
    }

    /// Whether every listed feature has a value.
    pub fn can_predict(&self) -> bool {
        self.values.can_predict(&self.descriptor.features)
    }

    pub fn missing_features(&self) -> Vec<&str> {
        self.values.missing_features(&self.descriptor.features)
    }

    pub fn prediction_text(&self) -> Option<String> {
        self.ui.prediction.display_text()
    }

    pub fn feature_rows(&self) -> Vec<FeatureRowView> {
        view_model::feature_rows(&self.descriptor, self.values.values())
    }

    pub fn preset_buttons(&self) -> Vec<PresetButtonView> {
        view_model::preset_buttons(&self.descriptor)
    }

    /// True while any background request is outstanding.
    pub fn has_pending_work(&self) -> bool {
        self.jobs.model_info_in_progress()
            || self.jobs.prediction_in_progress()
            || self.jobs.health_check_in_progress()
    }

    /// Poll job results until nothing is outstanding or `timeout` elapses.
    ///
    /// For headless callers; the UI polls once per frame instead.
    pub fn wait_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.poll_background_jobs();
            if !self.has_pending_work() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.badge_label = style::status_badge_label(tone).into();
        self.ui.status.badge_color = style::status_badge_color(tone);
    }
}
