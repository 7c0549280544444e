use crate::model_api::{
    FeatureValues, FetchError, HealthStatus, ModelDescriptor, ModelService, PredictError,
    PredictionLabel,
};
use std::{
    sync::{
        Arc,
        mpsc::{Receiver, Sender},
    },
    thread,
};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    ModelInfoLoaded(ModelInfoResult),
    PredictionFinished(PredictionResult),
    HealthChecked(HealthCheckResult),
}

#[derive(Debug)]
pub(crate) struct ModelInfoResult {
    pub(crate) result: Result<ModelDescriptor, FetchError>,
}

#[derive(Debug)]
pub(crate) struct PredictionJob {
    pub(crate) request_id: u64,
    pub(crate) features: FeatureValues,
}

#[derive(Debug)]
pub(crate) struct PredictionResult {
    pub(crate) request_id: u64,
    pub(crate) result: Result<PredictionLabel, PredictError>,
}

#[derive(Debug)]
pub(crate) struct HealthCheckResult {
    pub(crate) result: Result<HealthStatus, FetchError>,
}

/// Background work for one console; results come back over a single channel.
pub(crate) struct ConsoleJobs {
    service: Arc<dyn ModelService>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    model_info_requested: bool,
    model_info_in_progress: bool,
    health_check_in_progress: bool,
    next_predict_request_id: u64,
    latest_predict_request_id: Option<u64>,
}

impl ConsoleJobs {
    pub(super) fn new(service: Arc<dyn ModelService>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            service,
            message_tx,
            message_rx,
            model_info_requested: false,
            model_info_in_progress: false,
            health_check_in_progress: false,
            next_predict_request_id: 1,
            latest_predict_request_id: None,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn model_info_in_progress(&self) -> bool {
        self.model_info_in_progress
    }

    /// Start the metadata fetch; only the first call per console does anything.
    pub(super) fn begin_model_info_load(&mut self) -> bool {
        if self.model_info_requested {
            return false;
        }
        self.model_info_requested = true;
        self.model_info_in_progress = true;
        let service = self.service.clone();
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = service.model_info();
            let _ = tx.send(JobMessage::ModelInfoLoaded(ModelInfoResult { result }));
        });
        true
    }

    pub(super) fn clear_model_info_load(&mut self) {
        self.model_info_in_progress = false;
    }

    /// Allocate a request id and mark it as the only one whose result counts.
    pub(super) fn next_predict_request_id(&mut self) -> u64 {
        let request_id = self.next_predict_request_id;
        self.next_predict_request_id = self.next_predict_request_id.wrapping_add(1).max(1);
        self.latest_predict_request_id = Some(request_id);
        request_id
    }

    pub(super) fn is_latest_prediction(&self, request_id: u64) -> bool {
        self.latest_predict_request_id == Some(request_id)
    }

    pub(super) fn prediction_in_progress(&self) -> bool {
        self.latest_predict_request_id.is_some()
    }

    pub(super) fn clear_prediction(&mut self) {
        self.latest_predict_request_id = None;
    }

    pub(super) fn begin_prediction(&self, job: PredictionJob) {
        let service = self.service.clone();
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = service.predict(&job.features);
            let _ = tx.send(JobMessage::PredictionFinished(PredictionResult {
                request_id: job.request_id,
                result,
            }));
        });
    }

    pub(super) fn health_check_in_progress(&self) -> bool {
        self.health_check_in_progress
    }

    pub(super) fn begin_health_check(&mut self) {
        if self.health_check_in_progress {
            return;
        }
        self.health_check_in_progress = true;
        let service = self.service.clone();
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = service.health();
            let _ = tx.send(JobMessage::HealthChecked(HealthCheckResult { result }));
        });
    }

    pub(super) fn clear_health_check(&mut self) {
        self.health_check_in_progress = false;
    }
}
