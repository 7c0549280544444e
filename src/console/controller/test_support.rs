use super::*;
use crate::model_api::{FeatureRange, FetchError, HealthStatus, PredictError, PredictionLabel};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

type PredictFn = dyn Fn(&FeatureValues) -> Result<PredictionLabel, PredictError> + Send + Sync;

/// In-process [`ModelService`] with canned replies.
pub(super) struct ScriptedService {
    model_info: Mutex<Option<Result<ModelDescriptor, FetchError>>>,
    predict: Box<PredictFn>,
    health: Mutex<Option<Result<HealthStatus, FetchError>>>,
    pub(super) model_info_calls: AtomicUsize,
    pub(super) requests: Mutex<Vec<FeatureValues>>,
}

impl ScriptedService {
    pub(super) fn new(
        model_info: Result<ModelDescriptor, FetchError>,
        predict: impl Fn(&FeatureValues) -> Result<PredictionLabel, PredictError>
        + Send
        + Sync
        + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            model_info: Mutex::new(Some(model_info)),
            predict: Box::new(predict),
            health: Mutex::new(None),
            model_info_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(super) fn set_health(&self, result: Result<HealthStatus, FetchError>) {
        *self.health.lock().unwrap() = Some(result);
    }

    pub(super) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl ModelService for ScriptedService {
    fn model_info(&self) -> Result<ModelDescriptor, FetchError> {
        self.model_info_calls.fetch_add(1, Ordering::SeqCst);
        self.model_info
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(FetchError::Transport("already served".into())))
    }

    fn predict(&self, features: &FeatureValues) -> Result<PredictionLabel, PredictError> {
        self.requests.lock().unwrap().push(features.clone());
        (self.predict)(features)
    }

    fn health(&self) -> Result<HealthStatus, FetchError> {
        self.health
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(FetchError::Transport("no health scripted".into())))
    }
}

pub(super) fn label(text: &str) -> PredictionLabel {
    PredictionLabel {
        label: text.to_string(),
    }
}

pub(super) fn values(pairs: &[(&str, f64)]) -> FeatureValues {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

/// Two features on 0..=10 with a `benign_typical` preset of a=2, b=8 and a
/// sparse `only_a` preset.
pub(super) fn descriptor_ab() -> ModelDescriptor {
    let mut descriptor = ModelDescriptor {
        features: vec!["a".into(), "b".into()],
        note: "For testing only.".into(),
        ..ModelDescriptor::default()
    };
    for name in ["a", "b"] {
        descriptor.ranges.insert(
            name.into(),
            FeatureRange {
                min: 0.0,
                max: 10.0,
            },
        );
    }
    descriptor.presets.insert(
        ModelDescriptor::SEED_PRESET.into(),
        values(&[("a", 2.0), ("b", 8.0)]),
    );
    descriptor
        .presets
        .insert("malignant_typical".into(), values(&[("a", 9.0), ("b", 10.0)]));
    descriptor
        .presets
        .insert("only_a".into(), values(&[("a", 4.0)]));
    descriptor
}

/// Controller whose metadata load has already been applied.
pub(super) fn loaded_controller(service: Arc<ScriptedService>) -> ConsoleController {
    let mut controller = ConsoleController::new(service);
    controller.start();
    assert!(controller.wait_until_idle(Duration::from_secs(5)));
    controller
}
