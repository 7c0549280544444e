//! Model metadata as served by `GET /model-info`.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

/// Feature name to numeric value; also the `features` object of a predict request.
pub type FeatureValues = BTreeMap<String, f64>;

/// Inclusive slider bounds for one feature.
///
/// A bound missing from the wire falls back to the matching default bound.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    #[serde(default = "default_min")]
    pub min: f64,
    #[serde(default = "default_max")]
    pub max: f64,
}

fn default_min() -> f64 {
    FeatureRange::DEFAULT.min
}

fn default_max() -> f64 {
    FeatureRange::DEFAULT.max
}

impl FeatureRange {
    /// Bounds used for features the service did not describe.
    pub const DEFAULT: Self = Self {
        min: 1.0,
        max: 10.0,
    };

    /// Midpoint rounded half-up to a whole number.
    pub fn midpoint(self) -> f64 {
        ((self.min + self.max) / 2.0 + 0.5).floor()
    }

    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for FeatureRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Immutable description of the model, fixed once the metadata load succeeds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelDescriptor {
    /// Display order and the authoritative set of feature keys.
    pub features: Vec<String>,
    pub ranges: HashMap<String, FeatureRange>,
    pub labels: HashMap<String, String>,
    pub help_text: HashMap<String, String>,
    pub presets: BTreeMap<String, FeatureValues>,
    pub note: String,
}

impl ModelDescriptor {
    /// Name of the preset used to seed initial values.
    pub const SEED_PRESET: &'static str = "benign_typical";

    pub fn range(&self, feature: &str) -> FeatureRange {
        self.ranges.get(feature).copied().unwrap_or_default()
    }

    /// Display label, falling back to the raw identifier.
    pub fn label<'a>(&'a self, feature: &'a str) -> &'a str {
        self.labels.get(feature).map(String::as_str).unwrap_or(feature)
    }

    pub fn help_text(&self, feature: &str) -> &str {
        self.help_text.get(feature).map(String::as_str).unwrap_or("")
    }

    pub fn preset(&self, name: &str) -> Option<&FeatureValues> {
        self.presets.get(name)
    }

    /// Preset names in stable (sorted) order.
    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|name| name == feature)
    }

    pub fn note(&self) -> Option<&str> {
        let note = self.note.trim();
        (!note.is_empty()).then_some(note)
    }
}

/// Turn `benign_typical` into `Benign Typical` for preset buttons.
pub fn preset_display_name(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ModelInfoWire {
    #[serde(default, deserialize_with = "null_as_default")]
    selected_features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    ranges: HashMap<String, FeatureRange>,
    #[serde(default, deserialize_with = "null_as_default")]
    labels: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    helptext: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    presets: BTreeMap<String, FeatureValues>,
    #[serde(default, deserialize_with = "null_as_default")]
    note: String,
}

impl From<ModelInfoWire> for ModelDescriptor {
    fn from(wire: ModelInfoWire) -> Self {
        Self {
            features: wire.selected_features,
            ranges: wire.ranges,
            labels: wire.labels,
            help_text: wire.helptext,
            presets: wire.presets,
            note: wire.note,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn parse_model_info(body: &str) -> Result<ModelDescriptor, serde_json::Error> {
    let wire: ModelInfoWire = serde_json::from_str(body.trim())?;
    Ok(wire.into())
}
