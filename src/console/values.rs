//! Current feature values edited by sliders and presets.

use crate::model_api::{FeatureValues, ModelDescriptor};

/// Rejections from [`ValueStore::set_feature_value_checked`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("Unknown feature {0:?}")]
    InvalidFeature(String),
    #[error("{feature} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        feature: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Mapping from feature name to its current value.
///
/// Only the console controller mutates it. Slider edits merge a single entry;
/// presets replace the whole map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueStore {
    values: FeatureValues,
}

impl ValueStore {
    /// Initial values for a freshly loaded model: the seed preset's value when
    /// it has one, otherwise the range midpoint.
    pub fn seeded(descriptor: &ModelDescriptor) -> Self {
        let seed = descriptor.preset(ModelDescriptor::SEED_PRESET);
        let values = descriptor
            .features
            .iter()
            .map(|feature| {
                let value = seed
                    .and_then(|preset| preset.get(feature).copied())
                    .unwrap_or_else(|| descriptor.range(feature).midpoint());
                (feature.clone(), value)
            })
            .collect();
        Self { values }
    }

    pub fn values(&self) -> &FeatureValues {
        &self.values
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.values.get(feature).copied()
    }

    /// Store `value` for `feature`, leaving every other entry untouched.
    ///
    /// The caller guarantees `feature` is a known key; no range clamping is
    /// applied. Slider bounds are the only enforcement.
    pub fn set_feature_value(&mut self, feature: &str, value: f64) {
        self.values.insert(feature.to_string(), value);
    }

    /// Like [`Self::set_feature_value`] but rejects unknown keys and values
    /// outside the declared range.
    pub fn set_feature_value_checked(
        &mut self,
        descriptor: &ModelDescriptor,
        feature: &str,
        value: f64,
    ) -> Result<(), ValueError> {
        if !descriptor.has_feature(feature) {
            return Err(ValueError::InvalidFeature(feature.to_string()));
        }
        let range = descriptor.range(feature);
        if !range.contains(value) {
            return Err(ValueError::OutOfRange {
                feature: feature.to_string(),
                value,
                min: range.min,
                max: range.max,
            });
        }
        self.set_feature_value(feature, value);
        Ok(())
    }

    /// Replace every value with a copy of `preset`; absent features are dropped.
    pub fn replace_with(&mut self, preset: &FeatureValues) {
        self.values = preset.clone();
    }

    /// True when every listed feature has a usable value and the list is non-empty.
    pub fn can_predict(&self, features: &[String]) -> bool {
        !features.is_empty() && self.missing_features(features).is_empty()
    }

    /// Listed features without a finite value, in display order.
    pub fn missing_features<'a>(&self, features: &'a [String]) -> Vec<&'a str> {
        features
            .iter()
            .filter(|feature| !self.get(feature).is_some_and(f64::is_finite))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_api::FeatureRange;

    fn descriptor_ab() -> ModelDescriptor {
        let mut descriptor = ModelDescriptor {
            features: vec!["a".into(), "b".into()],
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
        descriptor
    }

    fn preset(pairs: &[(&str, f64)]) -> FeatureValues {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn seeds_from_benign_typical_preset() {
        let mut descriptor = descriptor_ab();
        descriptor.presets.insert(
            ModelDescriptor::SEED_PRESET.into(),
            preset(&[("a", 2.0), ("b", 8.0)]),
        );
        let store = ValueStore::seeded(&descriptor);
        assert_eq!(store.values(), &preset(&[("a", 2.0), ("b", 8.0)]));

        let mut store = store;
        store.set_feature_value("a", 5.0);
        assert_eq!(store.values(), &preset(&[("a", 5.0), ("b", 8.0)]));
        assert!(store.can_predict(&descriptor.features));
    }

    #[test]
    fn seeds_midpoint_when_preset_lacks_feature() {
        let mut descriptor = descriptor_ab();
        descriptor.features.push("c".into());
        descriptor
            .presets
            .insert(ModelDescriptor::SEED_PRESET.into(), preset(&[("a", 3.0)]));
        let store = ValueStore::seeded(&descriptor);
        assert_eq!(store.get("a"), Some(3.0));
        assert_eq!(store.get("b"), Some(5.0));
        // "c" has no range, so the 1..=10 default applies.
        assert_eq!(store.get("c"), Some(6.0));
        assert_eq!(store.values().len(), 3);
    }

    #[test]
    fn seeding_ignores_preset_keys_outside_feature_list() {
        let mut descriptor = descriptor_ab();
        descriptor.presets.insert(
            ModelDescriptor::SEED_PRESET.into(),
            preset(&[("a", 1.0), ("b", 1.0), ("stray", 4.0)]),
        );
        let store = ValueStore::seeded(&descriptor);
        assert_eq!(store.get("stray"), None);
    }

    #[test]
    fn cannot_predict_without_features_or_values() {
        let store = ValueStore::default();
        assert!(!store.can_predict(&[]));
        let descriptor = descriptor_ab();
        assert!(!store.can_predict(&descriptor.features));
        assert_eq!(store.missing_features(&descriptor.features), vec!["a", "b"]);
    }

    #[test]
    fn non_finite_values_count_as_missing() {
        let descriptor = descriptor_ab();
        let mut store = ValueStore::seeded(&descriptor);
        store.set_feature_value("b", f64::NAN);
        assert!(!store.can_predict(&descriptor.features));
        assert_eq!(store.missing_features(&descriptor.features), vec!["b"]);
    }

    #[test]
    fn replace_drops_features_absent_from_preset() {
        let descriptor = descriptor_ab();
        let mut store = ValueStore::seeded(&descriptor);
        store.replace_with(&preset(&[("a", 9.0)]));
        assert_eq!(store.values(), &preset(&[("a", 9.0)]));
        assert!(!store.can_predict(&descriptor.features));
    }

    #[test]
    fn set_value_does_not_clamp() {
        let mut store = ValueStore::default();
        store.set_feature_value("a", 42.0);
        assert_eq!(store.get("a"), Some(42.0));
    }

    #[test]
    fn checked_set_rejects_unknown_and_out_of_range() {
        let descriptor = descriptor_ab();
        let mut store = ValueStore::seeded(&descriptor);
        assert_eq!(
            store.set_feature_value_checked(&descriptor, "zzz", 1.0),
            Err(ValueError::InvalidFeature("zzz".into()))
        );
        assert!(matches!(
            store.set_feature_value_checked(&descriptor, "a", 11.0),
            Err(ValueError::OutOfRange { .. })
        ));
        assert_eq!(store.get("a"), Some(5.0));
        store
            .set_feature_value_checked(&descriptor, "a", 10.0)
            .unwrap();
        assert_eq!(store.get("a"), Some(10.0));
    }
}
