use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::AssessmentError;
use crate::models::FEATURE_NAMES;

use super::classifier::{Classifier, KNearestNeighbors, LogisticRegression};
use super::ensemble::Ensemble;
use super::pipeline::ModelBundle;
use super::scaler::{ScalerArtifact, StandardScaler};
use super::tree::{DecisionTree, GradientBoosting, RandomForest};

/// Why the model bundle could not be loaded. Always fatal at start-up.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid {artifact} artifact: {reason}")]
    Invalid { artifact: String, reason: String },

    #[error(transparent)]
    Schema(#[from] AssessmentError),
}

/// What was loaded from one artifact file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactInfo {
    pub name: String,
    pub kind: String,
    pub n_features: usize,
    pub file: String,
    pub sha256: String,
}

// ---------------------------------------------------------------------------
// Classifier artifacts
// ---------------------------------------------------------------------------

/// On-disk classifier, tagged by algorithm family.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression {
        #[serde(default)]
        name: Option<String>,
        coef: Vec<f64>,
        intercept: f64,
    },
    KNearestNeighbors {
        #[serde(default)]
        name: Option<String>,
        k: usize,
        points: Vec<Vec<f64>>,
        labels: Vec<u8>,
    },
    RandomForest {
        #[serde(default)]
        name: Option<String>,
        n_features: usize,
        trees: Vec<DecisionTree>,
    },
    GradientBoosting {
        #[serde(default)]
        name: Option<String>,
        n_features: usize,
        #[serde(default)]
        base_margin: f64,
        trees: Vec<DecisionTree>,
    },
}

impl ClassifierArtifact {
    /// Validate and build the model; `default_name` applies when the
    /// artifact does not name itself.
    pub fn build(self, default_name: &str) -> Result<Box<dyn Classifier>, ArtifactError> {
        let named = |name: Option<String>| name.unwrap_or_else(|| default_name.to_string());

        Ok(match self {
            ClassifierArtifact::LogisticRegression {
                name,
                coef,
                intercept,
            } => Box::new(LogisticRegression::new(named(name), coef, intercept)?),
            ClassifierArtifact::KNearestNeighbors {
                name,
                k,
                points,
                labels,
            } => Box::new(KNearestNeighbors::new(named(name), k, points, labels)?),
            ClassifierArtifact::RandomForest {
                name,
                n_features,
                trees,
            } => Box::new(RandomForest::new(named(name), n_features, trees)?),
            ClassifierArtifact::GradientBoosting {
                name,
                n_features,
                base_margin,
                trees,
            } => Box::new(GradientBoosting::new(named(name), n_features, base_margin, trees)?),
        })
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn read(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: serde::de::DeserializeOwned>(path: &Path, bytes: &[u8]) -> Result<T, ArtifactError> {
    serde_json::from_slice(bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".into())
}

pub fn load_scaler(path: &Path) -> Result<(StandardScaler, ArtifactInfo), ArtifactError> {
    let bytes = read(path)?;
    let artifact: ScalerArtifact = parse(path, &bytes)?;
    let scaler = StandardScaler::from_artifact(artifact)?;

    let info = ArtifactInfo {
        name: file_stem(path),
        kind: "standard_scaler".into(),
        n_features: scaler.n_features(),
        file: file_label(path),
        sha256: sha256_hex(&bytes),
    };
    Ok((scaler, info))
}

pub fn load_classifier(path: &Path) -> Result<(Box<dyn Classifier>, ArtifactInfo), ArtifactError> {
    let bytes = read(path)?;
    let artifact: ClassifierArtifact = parse(path, &bytes)?;
    let model = artifact.build(&file_stem(path))?;

    let info = ArtifactInfo {
        name: model.name().to_string(),
        kind: model.kind().to_string(),
        n_features: model.n_features(),
        file: file_label(path),
        sha256: sha256_hex(&bytes),
    };
    Ok((model, info))
}

/// Load the scaler and every classifier from `dir` and verify they all
/// accept the encoder's feature layout.
pub fn load_bundle(
    dir: &Path,
    scaler_file: &str,
    classifier_files: &[String],
) -> Result<ModelBundle, ArtifactError> {
    let (scaler, scaler_info) = load_scaler(&dir.join(scaler_file))?;
    tracing::info!(
        file = %scaler_info.file,
        fields = scaler_info.n_features,
        sha256 = %scaler_info.sha256,
        "Scaler loaded"
    );

    let mut models = Vec::with_capacity(classifier_files.len());
    let mut artifacts = vec![scaler_info];
    for file in classifier_files {
        let (model, info) = load_classifier(&dir.join(file))?;
        tracing::info!(
            model = %info.name,
            kind = %info.kind,
            fields = info.n_features,
            sha256 = %info.sha256,
            "Classifier loaded"
        );
        models.push(model);
        artifacts.push(info);
    }

    let ensemble = Ensemble::new(models)?;
    ModelBundle::new(scaler, ensemble, artifacts)
}

/// Check scaler and ensemble against the training-time layout.
pub fn verify_schema(scaler: &StandardScaler, ensemble: &Ensemble) -> Result<(), ArtifactError> {
    scaler.check_schema(&FEATURE_NAMES)?;
    ensemble.check_input(FEATURE_NAMES.len())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
