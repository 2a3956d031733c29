use crate::errors::AssessmentError;
use crate::models::ScaledFeatureVector;

use super::artifacts::ArtifactError;

/// A pretrained binary classifier.
///
/// Every model in the ensemble is driven through this trait alone; the
/// voter never looks at which algorithm sits behind it.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Algorithm family, for display.
    fn kind(&self) -> &'static str;

    /// Length of the input vector the model was trained on.
    fn n_features(&self) -> usize;

    /// `true` for the positive class.
    ///
    /// Callers must pass a vector of exactly [`Classifier::n_features`]
    /// fields; see [`check_shape`].
    fn predict(&self, features: &ScaledFeatureVector) -> Result<bool, AssessmentError>;
}

/// Reject a vector the classifier was not trained on.
pub fn check_shape(
    model: &dyn Classifier,
    features: &ScaledFeatureVector,
) -> Result<(), AssessmentError> {
    if model.n_features() != features.len() {
        return Err(AssessmentError::Shape {
            model: model.name().to_string(),
            expected: model.n_features(),
            actual: features.len(),
        });
    }
    Ok(())
}

pub(crate) fn prediction_failed(model: &str, reason: impl Into<String>) -> AssessmentError {
    AssessmentError::Classifier {
        model: model.to_string(),
        reason: reason.into(),
    }
}

pub(crate) fn invalid(model: &str, reason: impl Into<String>) -> ArtifactError {
    ArtifactError::Invalid {
        artifact: model.to_string(),
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Logistic regression
// ---------------------------------------------------------------------------

/// Linear decision function: positive when `coef · x + intercept > 0`.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    name: String,
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(name: impl Into<String>, coef: Vec<f64>, intercept: f64) -> Result<Self, ArtifactError> {
        let name = name.into();
        if coef.is_empty() {
            return Err(invalid(&name, "no coefficients"));
        }
        if !intercept.is_finite() || coef.iter().any(|c| !c.is_finite()) {
            return Err(invalid(&name, "non-finite coefficient"));
        }
        Ok(Self {
            name,
            coef,
            intercept,
        })
    }

    pub fn decision_function(&self, features: &ScaledFeatureVector) -> f64 {
        self.intercept
            + self
                .coef
                .iter()
                .zip(features.as_slice())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

impl Classifier for LogisticRegression {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, features: &ScaledFeatureVector) -> Result<bool, AssessmentError> {
        let z = self.decision_function(features);
        if !z.is_finite() {
            return Err(prediction_failed(&self.name, "non-finite decision value"));
        }
        Ok(z > 0.0)
    }
}

// ---------------------------------------------------------------------------
// k-nearest neighbours
// ---------------------------------------------------------------------------

/// Uniform-weight k-NN over the stored training points.
///
/// Positive only on a strict majority of the `k` neighbours; an even split
/// goes to the lower class label.
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    name: String,
    k: usize,
    points: Vec<Vec<f64>>,
    labels: Vec<u8>,
}

impl KNearestNeighbors {
    pub fn new(
        name: impl Into<String>,
        k: usize,
        points: Vec<Vec<f64>>,
        labels: Vec<u8>,
    ) -> Result<Self, ArtifactError> {
        let name = name.into();
        let Some(first) = points.first() else {
            return Err(invalid(&name, "no training points"));
        };
        let dim = first.len();
        if dim == 0 {
            return Err(invalid(&name, "training points have no fields"));
        }
        if points.iter().any(|p| p.len() != dim) {
            return Err(invalid(&name, "training points differ in length"));
        }
        if points.iter().flatten().any(|x| !x.is_finite()) {
            return Err(invalid(&name, "non-finite training point"));
        }
        if labels.len() != points.len() {
            return Err(invalid(
                &name,
                format!("{} labels for {} points", labels.len(), points.len()),
            ));
        }
        if labels.iter().any(|l| *l > 1) {
            return Err(invalid(&name, "labels must be 0 or 1"));
        }
        if k == 0 || k > points.len() {
            return Err(invalid(
                &name,
                format!("k must be between 1 and {}, got {k}", points.len()),
            ));
        }
        Ok(Self {
            name,
            k,
            points,
            labels,
        })
    }
}

impl Classifier for KNearestNeighbors {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "k_nearest_neighbors"
    }

    fn n_features(&self) -> usize {
        self.points[0].len()
    }

    fn predict(&self, features: &ScaledFeatureVector) -> Result<bool, AssessmentError> {
        let x = features.as_slice();
        let mut neighbours: Vec<(f64, u8)> = self
            .points
            .iter()
            .zip(self.labels.iter())
            .map(|(p, label)| {
                let d2 = p.iter().zip(x).map(|(a, b)| (a - b) * (a - b)).sum::<f64>();
                (d2, *label)
            })
            .collect();

        if neighbours.iter().any(|(d2, _)| !d2.is_finite()) {
            return Err(prediction_failed(&self.name, "non-finite distance"));
        }

        // Stable: equidistant points keep training order.
        neighbours.sort_by(|a, b| a.0.total_cmp(&b.0));

        let positives = neighbours
            .iter()
            .take(self.k)
            .filter(|(_, label)| *label == 1)
            .count();

        Ok(positives * 2 > self.k)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(values: &[f64]) -> ScaledFeatureVector {
        ScaledFeatureVector::new(values.to_vec())
    }

    #[test]
    fn test_logistic_sign_of_decision_function() {
        let model = LogisticRegression::new("log_reg", vec![1.0, -2.0], 0.5).unwrap();
        assert!(model.predict(&vector(&[1.0, 0.5])).unwrap()); // 0.5
        assert!(!model.predict(&vector(&[0.0, 1.0])).unwrap()); // -1.5
        // Exactly zero is the negative class.
        assert!(!model.predict(&vector(&[-0.5, 0.0])).unwrap());
    }

    #[test]
    fn test_logistic_non_finite_input_fails() {
        let model = LogisticRegression::new("log_reg", vec![1.0], 0.0).unwrap();
        let err = model.predict(&vector(&[f64::NAN])).unwrap_err();
        assert_eq!(err.kind(), "classifier");
    }

    #[test]
    fn test_knn_majority_of_nearest() {
        let model = KNearestNeighbors::new(
            "knn",
            3,
            vec![
                vec![0.0, 0.0],
                vec![0.1, 0.0],
                vec![0.0, 0.1],
                vec![5.0, 5.0],
                vec![5.1, 5.0],
            ],
            vec![0, 0, 1, 1, 1],
        )
        .unwrap();

        assert!(!model.predict(&vector(&[0.0, 0.0])).unwrap());
        assert!(model.predict(&vector(&[5.0, 5.1])).unwrap());
    }

    #[test]
    fn test_knn_even_split_goes_negative() {
        let model = KNearestNeighbors::new(
            "knn",
            2,
            vec![vec![1.0], vec![-1.0]],
            vec![1, 0],
        )
        .unwrap();
        assert!(!model.predict(&vector(&[0.0])).unwrap());
    }

    #[test]
    fn test_knn_rejects_bad_artifacts() {
        assert!(KNearestNeighbors::new("knn", 1, vec![], vec![]).is_err());
        assert!(KNearestNeighbors::new("knn", 3, vec![vec![0.0]], vec![1]).is_err());
        assert!(KNearestNeighbors::new("knn", 1, vec![vec![0.0]], vec![2]).is_err());
        assert!(KNearestNeighbors::new("knn", 1, vec![vec![0.0], vec![0.0, 1.0]], vec![0, 1]).is_err());
    }

    #[test]
    fn test_check_shape() {
        let model = LogisticRegression::new("log_reg", vec![1.0; 19], 0.0).unwrap();
        let err = check_shape(&model, &vector(&[0.0; 20])).unwrap_err();
        assert_eq!(
            err,
            AssessmentError::Shape {
                model: "log_reg".into(),
                expected: 19,
                actual: 20
            }
        );
        assert!(check_shape(&model, &vector(&[0.0; 19])).is_ok());
    }
}
