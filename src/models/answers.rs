use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive age range offered by the questionnaire slider.
pub const AGE_RANGE: (u8, u8) = (10, 60);

/// Inclusive range of every Likert-scale item.
pub const LIKERT_RANGE: (u8, u8) = (1, 5);

// ---------------------------------------------------------------------------
// RawAnswers — one questionnaire submission
// ---------------------------------------------------------------------------

/// A single questionnaire submission, exactly as the form host collected it.
///
/// Categorical answers are carried as the labels shown to the user; the
/// feature encoder is responsible for recognising them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnswers {
    pub age: u8,
    /// `"Yes"` or `"No"`.
    pub uses_social_media: String,
    /// One of the six [`DailyUsage`] labels.
    pub daily_usage: String,
    #[serde(flatten)]
    pub likert: LikertAnswers,
    /// `"Male"` or `"Female"`.
    pub gender: String,
    /// `"Single"`, `"In a relationship"` or `"Married"`.
    pub relationship_status: String,
}

impl RawAnswers {
    /// Numeric answers outside the ranges the questionnaire offers.
    ///
    /// The encoder trusts its input; hosts that accept answers from anywhere
    /// other than their own widgets call this first.
    pub fn domain_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let (min_age, max_age) = AGE_RANGE;
        if !(min_age..=max_age).contains(&self.age) {
            problems.push(format!(
                "age must be between {min_age} and {max_age}, got {}",
                self.age
            ));
        }

        let (lo, hi) = LIKERT_RANGE;
        for (key, value) in self.likert.named_items() {
            if !(lo..=hi).contains(&value) {
                problems.push(format!("{key} must be between {lo} and {hi}, got {value}"));
            }
        }

        problems
    }
}

// ---------------------------------------------------------------------------
// Likert items
// ---------------------------------------------------------------------------

/// The twelve behavioural items, each answered on a 1–5 scale.
///
/// Field order is the order the items occupy in the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikertAnswers {
    pub purposeless_use: u8,
    pub distracted_by_sm: u8,
    pub restless_without_sm: u8,
    pub easily_distracted: u8,
    pub worry_level: u8,
    pub concentration_difficulty: u8,
    pub comparison_freq: u8,
    pub comparison_feelings: u8,
    pub seek_validation: u8,
    pub feel_depressed: u8,
    pub interest_fluctuation: u8,
    pub sleep_issues: u8,
}

impl LikertAnswers {
    pub const COUNT: usize = 12;

    /// Every item set to the same value.
    pub fn uniform(value: u8) -> Self {
        Self {
            purposeless_use: value,
            distracted_by_sm: value,
            restless_without_sm: value,
            easily_distracted: value,
            worry_level: value,
            concentration_difficulty: value,
            comparison_freq: value,
            comparison_feelings: value,
            seek_validation: value,
            feel_depressed: value,
            interest_fluctuation: value,
            sleep_issues: value,
        }
    }

    /// Item values in feature order.
    pub fn values(&self) -> [u8; Self::COUNT] {
        [
            self.purposeless_use,
            self.distracted_by_sm,
            self.restless_without_sm,
            self.easily_distracted,
            self.worry_level,
            self.concentration_difficulty,
            self.comparison_freq,
            self.comparison_feelings,
            self.seek_validation,
            self.feel_depressed,
            self.interest_fluctuation,
            self.sleep_issues,
        ]
    }

    /// `(answer key, value)` pairs in feature order.
    pub fn named_items(&self) -> [(&'static str, u8); Self::COUNT] {
        let values = self.values();
        std::array::from_fn(|i| (LIKERT_KEYS[i], values[i]))
    }
}

impl Default for LikertAnswers {
    fn default() -> Self {
        Self::uniform(3)
    }
}

/// Answer keys of the Likert items, in feature order.
pub const LIKERT_KEYS: [&str; LikertAnswers::COUNT] = [
    "purposeless_use",
    "distracted_by_sm",
    "restless_without_sm",
    "easily_distracted",
    "worry_level",
    "concentration_difficulty",
    "comparison_freq",
    "comparison_feelings",
    "seek_validation",
    "feel_depressed",
    "interest_fluctuation",
    "sleep_issues",
];

// ---------------------------------------------------------------------------
// Categorical answers
// ---------------------------------------------------------------------------

/// Average daily time spent on social media, shortest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DailyUsage {
    UnderOneHour,
    OneToTwoHours,
    TwoToThreeHours,
    ThreeToFourHours,
    FourToFiveHours,
    OverFiveHours,
}

impl DailyUsage {
    pub const ALL: [DailyUsage; 6] = [
        DailyUsage::UnderOneHour,
        DailyUsage::OneToTwoHours,
        DailyUsage::TwoToThreeHours,
        DailyUsage::ThreeToFourHours,
        DailyUsage::FourToFiveHours,
        DailyUsage::OverFiveHours,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DailyUsage::UnderOneHour => "Less than an Hour",
            DailyUsage::OneToTwoHours => "Between 1 and 2 hours",
            DailyUsage::TwoToThreeHours => "Between 2 and 3 hours",
            DailyUsage::ThreeToFourHours => "Between 3 and 4 hours",
            DailyUsage::FourToFiveHours => "Between 4 and 5 hours",
            DailyUsage::OverFiveHours => "More than 5 hours",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.label() == label)
    }

    /// Ordinal rank 1–6 used by the trained models.
    pub fn rank(&self) -> u8 {
        *self as u8 + 1
    }
}

impl fmt::Display for DailyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipStatus {
    Single,
    InRelationship,
    Married,
}

impl RelationshipStatus {
    pub const ALL: [RelationshipStatus; 3] = [
        RelationshipStatus::Single,
        RelationshipStatus::InRelationship,
        RelationshipStatus::Married,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RelationshipStatus::Single => "Single",
            RelationshipStatus::InRelationship => "In a relationship",
            RelationshipStatus::Married => "Married",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// Parse the "Do you use social media?" radio answer.
pub fn parse_yes_no(label: &str) -> Option<bool> {
    match label {
        "Yes" => Some(true),
        "No" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
