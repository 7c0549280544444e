//! Interactive prediction console: metadata loading, feature values and the
//! predict request lifecycle, plus the egui front end that renders them.

pub mod controller;
pub mod state;
pub mod ui;
pub mod values;
pub mod view_model;

pub use controller::ConsoleController;
pub use state::{LoadOutcome, PredictionOutcome, ServiceHealth};
pub use values::{ValueError, ValueStore};
