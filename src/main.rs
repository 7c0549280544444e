//! Entry point for the egui-based prediction console.
use eframe::egui;
use predict_console::config;
use predict_console::console::ui::{ConsoleApp, MIN_VIEWPORT_SIZE};
use predict_console::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let startup = config::load_or_default().map_err(|err| {
        tracing::error!("Failed to load config: {err}");
        format!("Failed to load config: {err}")
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_min_inner_size(MIN_VIEWPORT_SIZE)
            .with_inner_size([760.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Prediction Console",
        native_options,
        Box::new(move |_cc| match startup {
            Ok(config) => {
                tracing::info!("Using prediction service at {}", config.endpoint);
                Ok(Box::new(ConsoleApp::new(&config)))
            }
            Err(message) => Ok(Box::new(LaunchError { message })),
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start console");
                ui.label(&self.message);
            });
        });
    }
}
