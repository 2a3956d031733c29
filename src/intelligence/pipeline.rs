use std::time::Instant;

use chrono::Utc;
use metrics::{counter, histogram};
use uuid::Uuid;

use crate::errors::AssessmentError;
use crate::models::{Assessment, RawAnswers};

use super::artifacts::{verify_schema, ArtifactError, ArtifactInfo};
use super::encoder::encode_scaled;
use super::ensemble::Ensemble;
use super::guidance::guidance_for;
use super::scaler::StandardScaler;

/// Scaler and classifiers loaded once at start-up, read-only afterwards.
#[derive(Debug)]
pub struct ModelBundle {
    pub scaler: StandardScaler,
    pub ensemble: Ensemble,
    /// Scaler first, then classifiers in ensemble order.
    pub artifacts: Vec<ArtifactInfo>,
}

impl ModelBundle {
    pub fn new(
        scaler: StandardScaler,
        ensemble: Ensemble,
        artifacts: Vec<ArtifactInfo>,
    ) -> Result<Self, ArtifactError> {
        verify_schema(&scaler, &ensemble)?;
        Ok(Self {
            scaler,
            ensemble,
            artifacts,
        })
    }
}

/// Run one submission through the pipeline:
/// 1. Encode answers into the training layout
/// 2. Standardize with the fitted scaler
/// 3. Collect a ballot from every classifier
/// 4. Attach the tier's guidance
pub fn assess(answers: &RawAnswers, bundle: &ModelBundle) -> Result<Assessment, AssessmentError> {
    let start = Instant::now();
    let assessment_id = Uuid::new_v4();

    let result = encode_scaled(answers, &bundle.scaler)
        .and_then(|scaled| bundle.ensemble.vote(&scaled));

    let vote = match result {
        Ok(vote) => vote,
        Err(e) => {
            counter!("assessment_failures_total", "kind" => e.kind()).increment(1);
            if e.is_user_error() {
                tracing::warn!(%assessment_id, error = %e, "Submission rejected");
            } else {
                tracing::error!(%assessment_id, error = %e, "Assessment failed");
            }
            return Err(e);
        }
    };

    counter!("assessments_total", "tier" => vote.tier.as_str()).increment(1);
    histogram!("assessment_latency_seconds").record(start.elapsed().as_secs_f64());

    tracing::info!(
        %assessment_id,
        votes = vote.votes,
        total = vote.total,
        tier = %vote.tier,
        "Assessment complete"
    );

    Ok(Assessment {
        assessment_id,
        assessed_at: Utc::now(),
        summary: vote.summary(),
        votes: vote.votes,
        total: vote.total,
        tier: vote.tier,
        guidance: guidance_for(vote.tier),
        ballots: vote.ballots,
    })
}

#[cfg(test)]
mod tests {
    use metrics_exporter_prometheus::PrometheusBuilder;

    use super::*;
    use crate::intelligence::classifier::{Classifier, LogisticRegression};
    use crate::models::{LikertAnswers, RiskTier, FEATURE_COUNT};

    /// Identity scaler and one model that fires when the Likert answers
    /// average above 3.
    fn bundle() -> ModelBundle {
        let scaler = StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT]).unwrap();
        let mut coef = vec![0.0; FEATURE_COUNT];
        coef[3..15].fill(1.0);
        let model: Box<dyn Classifier> = Box::new(LogisticRegression::new("log_reg", coef, -36.0).unwrap());
        let ensemble = Ensemble::new(vec![model]).unwrap();
        ModelBundle::new(scaler, ensemble, Vec::new()).unwrap()
    }

    fn answers(likert: u8, usage: &str) -> RawAnswers {
        RawAnswers {
            age: 25,
            uses_social_media: "Yes".into(),
            daily_usage: usage.into(),
            likert: LikertAnswers::uniform(likert),
            gender: "Female".into(),
            relationship_status: "Single".into(),
        }
    }

    #[test]
    fn test_assess_attaches_guidance() {
        let assessment = assess(&answers(5, "Between 4 and 5 hours"), &bundle()).unwrap();
        assert_eq!(assessment.tier, RiskTier::High);
        assert_eq!(assessment.guidance.tier, RiskTier::High);
        assert_eq!(assessment.summary, "1 of our 1 models predict you are addicted.");

        let assessment = assess(&answers(1, "Less than an Hour"), &bundle()).unwrap();
        assert_eq!(assessment.tier, RiskTier::None);
    }

    #[test]
    fn test_assessment_metrics_recorded() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let bundle = bundle();

        metrics::with_local_recorder(&recorder, || {
            assert!(assess(&answers(5, "Between 4 and 5 hours"), &bundle).is_ok());
            let err = assess(&answers(5, "Decades"), &bundle).unwrap_err();
            assert_eq!(err.kind(), "encoding");
        });

        let text = handle.render();
        assert!(text.contains(r#"assessments_total{tier="high"} 1"#), "{text}");
        assert!(text.contains(r#"assessment_failures_total{kind="encoding"} 1"#), "{text}");
        assert!(text.contains("assessment_latency_seconds_count 1"), "{text}");
    }
}
