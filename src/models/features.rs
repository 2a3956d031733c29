use serde::Serialize;

/// Number of fields the trained scaler and classifiers expect.
pub const FEATURE_COUNT: usize = 20;

/// Training-time column names, in training order.
///
/// The scaler and every classifier were fit against exactly this layout.
/// Reordering it silently invalidates every prediction.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "use_social_media",
    "avg_social_time",
    "purposeless_use_freq",
    "distracted_by_sm",
    "restless_without_sm",
    "easily_distracted",
    "worry_level",
    "concentration_difficulty",
    "comparison_freq",
    "comparison_feelings",
    "seek_validation",
    "feel_depressed",
    "interest_fluctuation",
    "sleep_issues",
    "gender_Female",
    "gender_Male",
    "relationship_status_In a relationship",
    "relationship_status_Married",
    "relationship_status_Single",
];

/// Position of a column in the feature layout.
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_NAMES.iter().position(|n| *n == name)
}

/// Encoded questionnaire answers, before standardization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        feature_index(name).map(|i| self.0[i])
    }
}

/// A feature vector after the fitted per-field standardization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledFeatureVector(Vec<f64>);

impl ScaledFeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
