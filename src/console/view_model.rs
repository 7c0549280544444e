//! Helpers to convert model metadata and values into egui-facing view structs.

use crate::model_api::{FeatureRange, FeatureValues, ModelDescriptor, preset_display_name};

/// One slider row.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureRowView {
    pub feature: String,
    pub label: String,
    pub help: String,
    pub range: FeatureRange,
    /// `None` after a sparse preset dropped this feature.
    pub value: Option<f64>,
    /// Set when a preset placed the value outside the slider bounds.
    pub out_of_range: bool,
}

/// One preset button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresetButtonView {
    pub name: String,
    pub label: String,
}

/// Build slider rows in the model's feature order.
pub fn feature_rows(descriptor: &ModelDescriptor, values: &FeatureValues) -> Vec<FeatureRowView> {
    descriptor
        .features
        .iter()
        .map(|feature| {
            let range = descriptor.range(feature);
            let value = values.get(feature).copied();
            FeatureRowView {
                feature: feature.clone(),
                label: descriptor.label(feature).to_string(),
                help: descriptor.help_text(feature).to_string(),
                range,
                value,
                out_of_range: value.is_some_and(|value| !range.contains(value)),
            }
        })
        .collect()
}

pub fn preset_buttons(descriptor: &ModelDescriptor) -> Vec<PresetButtonView> {
    descriptor
        .preset_names()
        .map(|name| PresetButtonView {
            name: name.to_string(),
            label: preset_display_name(name),
        })
        .collect()
}

/// Format a value for display next to its slider.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
