use std::fmt;

use crate::errors::AssessmentError;
use crate::models::{Ballot, RiskTier, ScaledFeatureVector, VoteResult};

use super::artifacts::ArtifactError;
use super::classifier::{check_shape, Classifier};

/// Independently trained classifiers sharing one input schema.
pub struct Ensemble {
    models: Vec<Box<dyn Classifier>>,
}

impl fmt::Debug for Ensemble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.models().map(|m| m.name())).finish()
    }
}

impl Ensemble {
    pub fn new(models: Vec<Box<dyn Classifier>>) -> Result<Self, ArtifactError> {
        if models.is_empty() {
            return Err(ArtifactError::Invalid {
                artifact: "ensemble".into(),
                reason: "no classifiers".into(),
            });
        }
        Ok(Self { models })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn models(&self) -> impl Iterator<Item = &dyn Classifier> {
        self.models.iter().map(|m| m.as_ref())
    }

    /// Fail unless every model accepts vectors of `n_features` fields.
    pub fn check_input(&self, n_features: usize) -> Result<(), AssessmentError> {
        for model in self.models() {
            if model.n_features() != n_features {
                return Err(AssessmentError::Shape {
                    model: model.name().to_string(),
                    expected: model.n_features(),
                    actual: n_features,
                });
            }
        }
        Ok(())
    }

    /// Collect one ballot per model and map the count to a tier.
    ///
    /// Shapes are checked for every model before any of them predicts. A
    /// single failing model fails the whole vote.
    pub fn vote(&self, features: &ScaledFeatureVector) -> Result<VoteResult, AssessmentError> {
        for model in self.models() {
            check_shape(model, features)?;
        }

        let ballots = self
            .models()
            .map(|model| {
                Ok(Ballot {
                    model: model.name().to_string(),
                    vote: model.predict(features)?,
                })
            })
            .collect::<Result<Vec<_>, AssessmentError>>()?;

        let votes = ballots.iter().filter(|b| b.vote).count();
        let total = self.len();

        Ok(VoteResult {
            votes,
            total,
            tier: tier_for(votes, total),
            ballots,
        })
    }
}

/// Map a positive-vote count out of `total` models to a risk tier.
///
/// Highest first:
/// - `votes >= ceil(0.75 * total)` → High
/// - `votes >= ceil(0.5 * total)` → Moderate
/// - any other positive count → Low
/// - no positive votes → None
///
/// With four models: 3–4 High, 2 Moderate, 1 Low, 0 None.
pub fn tier_for(votes: usize, total: usize) -> RiskTier {
    if total == 0 || votes == 0 {
        return RiskTier::None;
    }

    let votes = votes.min(total);
    let high = (3 * total).div_ceil(4);
    let moderate = total.div_ceil(2);

    if votes >= high {
        RiskTier::High
    } else if votes >= moderate {
        RiskTier::Moderate
    } else {
        RiskTier::Low
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
