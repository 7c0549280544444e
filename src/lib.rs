//! Library exports for the desktop console, the probe tool and tests.
/// Per-user application directories.
pub mod app_dirs;
/// Persistent settings.
pub mod config;
/// Console view-model and egui front end.
pub mod console;
mod http_client;
/// Tracing subscriber setup.
pub mod logging;
/// Prediction service client.
pub mod model_api;
