use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Why a single submission could not be assessed.
///
/// None of these are retried: the pipeline is deterministic, so a second
/// attempt would fail the same way.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("unrecognized {field} answer: {label:?}")]
    Encoding { field: &'static str, label: String },

    #[error("scaler expects {expected} fields but the encoder produced {actual}")]
    ScalerMismatch { expected: usize, actual: usize },

    #[error("scaler column {position} is {found:?}, expected {expected:?}")]
    ScalerColumn {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("model {model} expects {expected} fields, got {actual}")]
    Shape {
        model: String,
        expected: usize,
        actual: usize,
    },

    #[error("model {model} failed to predict: {reason}")]
    Classifier { model: String, reason: String },
}

impl AssessmentError {
    /// Short label used for the failure metric.
    pub fn kind(&self) -> &'static str {
        match self {
            AssessmentError::Encoding { .. } => "encoding",
            AssessmentError::ScalerMismatch { .. } | AssessmentError::ScalerColumn { .. } => {
                "scaler_mismatch"
            }
            AssessmentError::Shape { .. } => "shape",
            AssessmentError::Classifier { .. } => "classifier",
        }
    }

    /// True when the fault lies with the submitted answers rather than the
    /// deployed artifacts.
    pub fn is_user_error(&self) -> bool {
        matches!(self, AssessmentError::Encoding { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

impl From<AssessmentError> for AppError {
    fn from(e: AssessmentError) -> Self {
        if e.is_user_error() {
            AppError::BadRequest(e.to_string())
        } else {
            AppError::Internal(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_error_is_bad_request() {
        let err = AssessmentError::Encoding {
            field: "daily_usage",
            label: "Decades".into(),
        };
        let resp = AppError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_schema_drift_is_internal() {
        let err = AssessmentError::Shape {
            model: "knn".into(),
            expected: 19,
            actual: 20,
        };
        assert_eq!(err.kind(), "shape");
        let resp = AppError::from(err).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
