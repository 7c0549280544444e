//! State types rendered by the console UI.

use egui::Color32;

use crate::console::ui::style::{self, StatusTone};
use crate::model_api::PredictionLabel;

/// Shown when `/model-info` could not be loaded.
pub const MODEL_INFO_FAILED_MESSAGE: &str = "Failed to load model info.";
/// Shown while a prediction request is in flight.
pub const PREDICTING_TEXT: &str = "Predicting…";
/// Fallback when the service rejects a prediction without a message.
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed.";
/// Shown when the prediction request got no usable response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Progress of the one-time metadata load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadOutcome {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

/// Result of the most recent prediction request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PredictionOutcome {
    #[default]
    Empty,
    Pending,
    Success(PredictionLabel),
    Failure(String),
}

impl PredictionOutcome {
    /// Text shown in the result area, if any.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Pending => Some(PREDICTING_TEXT.to_string()),
            Self::Success(prediction) => Some(format!("Prediction: {}", prediction.label)),
            Self::Failure(message) => Some(message.clone()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Last known reachability of the service, refreshed on request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ServiceHealth {
    #[default]
    Unknown,
    Checking,
    Online,
    Unreachable(String),
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn loading() -> Self {
        Self {
            text: "Loading model info…".into(),
            badge_label: style::status_badge_label(StatusTone::Busy).into(),
            badge_color: style::status_badge_color(StatusTone::Busy),
        }
    }
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleUiState {
    pub status: StatusBarState,
    pub load: LoadOutcome,
    pub prediction: PredictionOutcome,
    pub health: ServiceHealth,
}

impl Default for ConsoleUiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::loading(),
            load: LoadOutcome::default(),
            prediction: PredictionOutcome::default(),
            health: ServiceHealth::default(),
        }
    }
}
