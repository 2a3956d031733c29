use crate::errors::AssessmentError;
use crate::models::{
    parse_yes_no, DailyUsage, FeatureVector, Gender, RawAnswers, RelationshipStatus,
    ScaledFeatureVector, FEATURE_COUNT,
};

use super::scaler::StandardScaler;

/// Encode a submission into the training-time feature layout.
///
/// Layout: age, social media use, usage rank, the twelve Likert items,
/// then the gender flags (female, male) and relationship flags
/// (in a relationship, married, single).
///
/// Numeric answers are trusted as-is; only categorical labels are checked.
pub fn encode(answers: &RawAnswers) -> Result<FeatureVector, AssessmentError> {
    let uses = parse_yes_no(&answers.uses_social_media)
        .ok_or_else(|| unrecognized("uses_social_media", &answers.uses_social_media))?;
    let usage = DailyUsage::from_label(&answers.daily_usage)
        .ok_or_else(|| unrecognized("daily_usage", &answers.daily_usage))?;
    let gender = Gender::from_label(&answers.gender)
        .ok_or_else(|| unrecognized("gender", &answers.gender))?;
    let status = RelationshipStatus::from_label(&answers.relationship_status)
        .ok_or_else(|| unrecognized("relationship_status", &answers.relationship_status))?;

    let mut values = [0.0f64; FEATURE_COUNT];
    values[0] = f64::from(answers.age);
    values[1] = flag(uses);
    values[2] = f64::from(usage.rank());
    for (slot, item) in values[3..15].iter_mut().zip(answers.likert.values()) {
        *slot = f64::from(item);
    }
    values[15] = flag(gender == Gender::Female);
    values[16] = flag(gender == Gender::Male);
    values[17] = flag(status == RelationshipStatus::InRelationship);
    values[18] = flag(status == RelationshipStatus::Married);
    values[19] = flag(status == RelationshipStatus::Single);

    Ok(FeatureVector::from_values(values))
}

/// Encode then standardize with the loaded scaler.
pub fn encode_scaled(
    answers: &RawAnswers,
    scaler: &StandardScaler,
) -> Result<ScaledFeatureVector, AssessmentError> {
    let features = encode(answers)?;
    scaler.transform(&features)
}

fn flag(set: bool) -> f64 {
    if set {
        1.0
    } else {
        0.0
    }
}

fn unrecognized(field: &'static str, label: &str) -> AssessmentError {
    AssessmentError::Encoding {
        field,
        label: label.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
