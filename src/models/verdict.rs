use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk categories, ordered from least to most concerning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    None,
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [
        RiskTier::None,
        RiskTier::Low,
        RiskTier::Moderate,
        RiskTier::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::None => "none",
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classifier's prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub model: String,
    /// `true` when the model predicts addiction.
    pub vote: bool,
}

/// Outcome of running the ensemble on one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    /// Positive predictions, in `0..=total`.
    pub votes: usize,
    /// Ensemble size.
    pub total: usize,
    pub tier: RiskTier,
    pub ballots: Vec<Ballot>,
}

impl VoteResult {
    pub fn summary(&self) -> String {
        format!(
            "{} of our {} models predict you are addicted.",
            self.votes, self.total
        )
    }
}
