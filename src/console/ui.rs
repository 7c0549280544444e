//! egui renderer for the prediction console.
//!
//! Presentation only: every state change goes through [`ConsoleController`].

use std::sync::Arc;
use std::time::Duration;

use crate::config::ConsoleConfig;
use crate::console::controller::ConsoleController;
use crate::console::state::{LoadOutcome, PredictionOutcome, ServiceHealth};
use crate::console::view_model::{self, FeatureRowView};
use crate::model_api::HttpModelService;
use eframe::egui::{self, Color32, Frame, Margin, RichText, SliderClamping, Ui};

pub mod style;

/// Smallest window that still fits a slider row and the result line.
pub const MIN_VIEWPORT_SIZE: [f32; 2] = [560.0, 420.0];
const JOB_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Renders the console using the shared controller state.
pub struct ConsoleApp {
    controller: ConsoleController,
    endpoint: String,
    visuals_set: bool,
}

impl ConsoleApp {
    /// Create the console and start loading model metadata.
    pub fn new(config: &ConsoleConfig) -> Self {
        let service = HttpModelService::new(&config.endpoint);
        let endpoint = service.base_url().to_string();
        Self::with_controller(ConsoleController::new(Arc::new(service)), endpoint)
    }

    pub fn with_controller(mut controller: ConsoleController, endpoint: String) -> Self {
        controller.start();
        Self {
            controller,
            endpoint,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::new().fill(palette.bg_primary).inner_margin(Margin::same(8)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Prediction Console");
                    ui.separator();
                    ui.label(RichText::new(&self.endpoint).color(palette.text_muted));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let checking = self.controller.ui.health == ServiceHealth::Checking;
                        if ui
                            .add_enabled(!checking, egui::Button::new("Check service"))
                            .clicked()
                        {
                            self.controller.check_service_health();
                        }
                        ui.label(health_text(&self.controller.ui.health));
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(Color32::from_rgb(0, 0, 0)))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(22.0);
                    ui.label(RichText::new(&status.badge_label).color(Color32::WHITE));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(Color32::WHITE));
                });
            });
    }

    fn render_body(&mut self, ui: &mut Ui) {
        match self.controller.load_outcome().clone() {
            LoadOutcome::Pending => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading model info…");
                });
                return;
            }
            LoadOutcome::Failed(message) => {
                ui.colored_label(style::palette().warning, message);
                return;
            }
            LoadOutcome::Ready => {}
        }
        if let Some(note) = self.controller.descriptor().note() {
            ui.label(RichText::new(note).italics().color(style::palette().text_muted));
            ui.add_space(6.0);
        }
        self.render_presets(ui);
        ui.add_space(8.0);
        self.render_predict_row(ui);
        ui.separator();
        egui::ScrollArea::vertical()
            .id_salt("features_scroll")
            .show(ui, |ui| {
                for row in self.controller.feature_rows() {
                    self.render_feature_row(ui, &row);
                    ui.add_space(4.0);
                }
            });
    }

    fn render_presets(&mut self, ui: &mut Ui) {
        let buttons = self.controller.preset_buttons();
        if buttons.is_empty() {
            return;
        }
        ui.horizontal_wrapped(|ui| {
            ui.label("Presets:");
            for button in buttons {
                if ui.button(&button.label).clicked() {
                    self.controller.apply_preset(&button.name);
                }
            }
        });
    }

    fn render_predict_row(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.horizontal(|ui| {
            let can_predict = self.controller.can_predict();
            if ui
                .add_enabled(can_predict, egui::Button::new("Predict"))
                .clicked()
            {
                self.controller.predict();
            }
            if let Some(text) = self.controller.prediction_text() {
                let color = match self.controller.prediction_outcome() {
                    PredictionOutcome::Success(_) => palette.success,
                    PredictionOutcome::Failure(_) => palette.warning,
                    _ => palette.text_primary,
                };
                if self.controller.prediction_outcome().is_pending() {
                    ui.spinner();
                }
                ui.label(RichText::new(text).strong().color(color));
            }
        });
        let missing = self.controller.missing_features();
        if !missing.is_empty() && !self.controller.descriptor().features.is_empty() {
            ui.label(
                RichText::new(format!("Missing values: {}", missing.join(", ")))
                    .small()
                    .color(palette.text_muted),
            );
        }
    }

    fn render_feature_row(&mut self, ui: &mut Ui, row: &FeatureRowView) {
        let palette = style::palette();
        ui.horizontal(|ui| {
            let label = ui.add_sized([220.0, 18.0], egui::Label::new(&row.label));
            if !row.help.is_empty() {
                label.on_hover_text(&row.help);
            }
            let mut value = row.value.unwrap_or_else(|| row.range.midpoint());
            let slider = egui::Slider::new(&mut value, row.range.min..=row.range.max)
                .step_by(1.0)
                .show_value(false)
                .clamping(SliderClamping::Edits);
            if ui.add(slider).changed() {
                self.controller.set_feature_value(&row.feature, value);
            }
            match row.value {
                Some(current) => {
                    let color = if row.out_of_range {
                        palette.warning
                    } else {
                        palette.text_primary
                    };
                    let text = ui.label(
                        RichText::new(view_model::format_value(current)).color(color),
                    );
                    if row.out_of_range {
                        text.on_hover_text(format!(
                            "Outside the expected range {}–{}",
                            view_model::format_value(row.range.min),
                            view_model::format_value(row.range.max)
                        ));
                    }
                }
                None => {
                    ui.label(RichText::new("unset").color(palette.text_muted));
                }
            }
        });
        if !row.help.is_empty() {
            ui.label(RichText::new(&row.help).small().color(palette.text_muted));
        }
    }
}

fn health_text(health: &ServiceHealth) -> String {
    match health {
        ServiceHealth::Unknown => String::new(),
        ServiceHealth::Checking => "Checking…".into(),
        ServiceHealth::Online => "Online".into(),
        ServiceHealth::Unreachable(_) => "Unreachable".into(),
    }
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| self.render_body(ui));
        if self.controller.has_pending_work() {
            ctx.request_repaint_after(JOB_POLL_INTERVAL);
        }
    }
}
