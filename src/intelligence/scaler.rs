use serde::Deserialize;

use crate::errors::AssessmentError;
use crate::models::{FeatureVector, ScaledFeatureVector};

use super::artifacts::ArtifactError;

/// Per-field standardization fitted at training time.
///
/// `scaled[i] = (raw[i] - mean[i]) / scale[i]`. The parameters are loaded
/// once and never refit.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    feature_names: Option<Vec<String>>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// On-disk form of the scaler artifact.
#[derive(Debug, Deserialize)]
pub struct ScalerArtifact {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        Self::from_artifact(ScalerArtifact {
            feature_names: None,
            mean,
            scale,
        })
    }

    pub fn from_artifact(artifact: ScalerArtifact) -> Result<Self, ArtifactError> {
        let invalid = |reason: String| ArtifactError::Invalid {
            artifact: "scaler".into(),
            reason,
        };

        if artifact.mean.is_empty() {
            return Err(invalid("no fields".into()));
        }
        if artifact.mean.len() != artifact.scale.len() {
            return Err(invalid(format!(
                "mean has {} fields but scale has {}",
                artifact.mean.len(),
                artifact.scale.len()
            )));
        }
        if let Some(names) = &artifact.feature_names {
            if names.len() != artifact.mean.len() {
                return Err(invalid(format!(
                    "{} feature names for {} fields",
                    names.len(),
                    artifact.mean.len()
                )));
            }
        }
        if let Some(i) = artifact
            .mean
            .iter()
            .chain(artifact.scale.iter())
            .position(|x| !x.is_finite())
        {
            return Err(invalid(format!("non-finite parameter at index {i}")));
        }

        // Constant training columns were fit with a zero scale.
        let scale = artifact
            .scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok(Self {
            feature_names: artifact.feature_names,
            mean: artifact.mean,
            scale,
        })
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    /// Confirm the scaler was fit on exactly this column layout.
    pub fn check_schema(&self, expected: &[&str]) -> Result<(), ArtifactError> {
        if self.n_features() != expected.len() {
            return Err(AssessmentError::ScalerMismatch {
                expected: self.n_features(),
                actual: expected.len(),
            }
            .into());
        }

        if let Some(names) = &self.feature_names {
            if let Some((position, (found, wanted))) = names
                .iter()
                .zip(expected.iter())
                .enumerate()
                .find(|(_, (found, wanted))| found.as_str() != **wanted)
            {
                return Err(AssessmentError::ScalerColumn {
                    position,
                    expected: wanted.to_string(),
                    found: found.clone(),
                }
                .into());
            }
        }

        Ok(())
    }

    pub fn transform(&self, features: &FeatureVector) -> Result<ScaledFeatureVector, AssessmentError> {
        if features.len() != self.n_features() {
            return Err(AssessmentError::ScalerMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }

        let scaled = features
            .as_slice()
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect();

        Ok(ScaledFeatureVector::new(scaled))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
