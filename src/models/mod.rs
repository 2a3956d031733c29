pub mod answers;
pub mod features;
pub mod questionnaire;
pub mod verdict;

pub use answers::{
    parse_yes_no, DailyUsage, Gender, LikertAnswers, RawAnswers, RelationshipStatus,
    AGE_RANGE, LIKERT_KEYS, LIKERT_RANGE,
};
pub use features::{feature_index, FeatureVector, ScaledFeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use questionnaire::{default_answers, questionnaire, Question, Widget};
pub use verdict::{Ballot, RiskTier, VoteResult};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::intelligence::guidance::Guidance;

// ---------------------------------------------------------------------------
// Assessment — what the form host renders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    /// Correlates log lines for one submission; never stored.
    pub assessment_id: Uuid,
    pub assessed_at: DateTime<Utc>,
    pub votes: usize,
    pub total: usize,
    pub tier: RiskTier,
    pub summary: String,
    pub ballots: Vec<Ballot>,
    pub guidance: &'static Guidance,
}
