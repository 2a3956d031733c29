use std::sync::Arc;

use serde_json::json;

use smcheck::api::router::create_router;
use smcheck::config::{AppConfig, LogFormat};
use smcheck::intelligence::{ClassifierArtifact, Ensemble, ModelBundle, StandardScaler};
use smcheck::intelligence::scaler::ScalerArtifact;
use smcheck::models::{LikertAnswers, RawAnswers, FEATURE_COUNT, FEATURE_NAMES};
use smcheck::AppState;

const LIKERT: std::ops::Range<usize> = 3..15;

/// Scaler centred on a "typical" respondent: age 25, usage rank 3.5,
/// every Likert item at 3.
#[allow(dead_code)]
pub fn fixture_scaler() -> StandardScaler {
    let mut mean = vec![0.5; FEATURE_COUNT];
    let mut scale = vec![1.0; FEATURE_COUNT];
    mean[0] = 25.0;
    scale[0] = 10.0;
    mean[2] = 3.5;
    for i in LIKERT {
        mean[i] = 3.0;
    }

    StandardScaler::from_artifact(ScalerArtifact {
        feature_names: Some(FEATURE_NAMES.iter().map(|s| s.to_string()).collect()),
        mean,
        scale,
    })
    .expect("fixture scaler is valid")
}

/// Four classifiers of different kinds, each keyed on an easy-to-steer
/// part of the answers:
/// - log_reg: sum of Likert items above 3
/// - knn: closer to the all-high than the all-low Likert profile
///   (equidistant goes to the all-low point, listed first)
/// - rf: worry_level above 3
/// - xgb: daily usage of at least 3 hours
#[allow(dead_code)]
pub fn fixture_artifacts() -> Vec<serde_json::Value> {
    let mut coef = vec![0.0; FEATURE_COUNT];
    let mut high = vec![0.0; FEATURE_COUNT];
    let mut low = vec![0.0; FEATURE_COUNT];
    for i in LIKERT {
        coef[i] = 1.0;
        high[i] = 2.0;
        low[i] = -2.0;
    }

    vec![
        json!({ "kind": "logistic_regression", "name": "log_reg", "coef": coef, "intercept": 0.0 }),
        json!({ "kind": "k_nearest_neighbors", "name": "knn", "k": 1, "points": [low, high], "labels": [0, 1] }),
        json!({ "kind": "random_forest", "name": "rf", "n_features": FEATURE_COUNT, "trees": [
            { "nodes": [
                { "split": { "feature": 7, "threshold": 0.0, "left": 1, "right": 2 } },
                { "leaf": [1.0, 0.0] },
                { "leaf": [0.0, 1.0] }
            ] }
        ] }),
        json!({ "kind": "gradient_boosting", "name": "xgb", "n_features": FEATURE_COUNT, "base_margin": 0.0, "trees": [
            { "nodes": [
                { "split": { "feature": 2, "threshold": 0.0, "left": 1, "right": 2 } },
                { "leaf": [-1.0] },
                { "leaf": [1.0] }
            ] }
        ] }),
    ]
}

#[allow(dead_code)]
pub fn fixture_bundle() -> ModelBundle {
    let models = fixture_artifacts()
        .into_iter()
        .map(|json| {
            let artifact: ClassifierArtifact =
                serde_json::from_value(json).expect("fixture artifact parses");
            artifact.build("fixture").expect("fixture artifact is valid")
        })
        .collect();

    let ensemble = Ensemble::new(models).expect("fixture ensemble is non-empty");
    ModelBundle::new(fixture_scaler(), ensemble, Vec::new()).expect("fixture bundle matches schema")
}

/// A submission with every Likert item at `likert`.
#[allow(dead_code)]
pub fn answers(likert: u8, daily_usage: &str) -> RawAnswers {
    RawAnswers {
        age: 25,
        uses_social_media: "Yes".into(),
        daily_usage: daily_usage.into(),
        likert: LikertAnswers::uniform(likert),
        gender: "Female".into(),
        relationship_status: "Single".into(),
    }
}

#[allow(dead_code)]
pub fn build_test_app() -> axum::Router {
    let config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        model_dir: "models".into(),
        scaler_file: "scaler_class.json".into(),
        classifier_files: vec![],
        log_format: LogFormat::Text,
    };

    let state = AppState {
        config,
        bundle: Arc::new(fixture_bundle()),
        metrics_handle: smcheck::metrics::init_metrics(),
    };

    create_router(state)
}
