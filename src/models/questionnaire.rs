use serde::Serialize;
use serde_json::{json, Value};

use super::answers::{DailyUsage, Gender, RelationshipStatus, AGE_RANGE, LIKERT_RANGE};

/// Input control the host should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    Slider,
    Radio,
    Select,
}

/// One question of the form. `key` is the field name in [`super::RawAnswers`].
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub key: &'static str,
    pub prompt: &'static str,
    pub widget: Widget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
    pub default: Value,
}

fn slider(key: &'static str, prompt: &'static str, range: (u8, u8), default: u8) -> Question {
    Question {
        key,
        prompt,
        widget: Widget::Slider,
        min: Some(range.0),
        max: Some(range.1),
        options: Vec::new(),
        default: json!(default),
    }
}

fn choice(key: &'static str, prompt: &'static str, widget: Widget, options: Vec<&'static str>) -> Question {
    let default = json!(options.first().copied().unwrap_or_default());
    Question {
        key,
        prompt,
        widget,
        min: None,
        max: None,
        options,
        default,
    }
}

/// The questionnaire, in display order.
pub fn questionnaire() -> Vec<Question> {
    let likert = |key: &'static str, prompt: &'static str| slider(key, prompt, LIKERT_RANGE, 3);

    vec![
        slider("age", "Your age", AGE_RANGE, 25),
        choice("uses_social_media", "Do you use social media?", Widget::Radio, vec!["Yes", "No"]),
        choice(
            "daily_usage",
            "Average daily social media use:",
            Widget::Select,
            DailyUsage::ALL.iter().map(|u| u.label()).collect(),
        ),
        likert("purposeless_use", "Use social media without purpose (1=Never, 5=Always)"),
        likert("distracted_by_sm", "Distraction frequency (1=Never, 5=Always)"),
        likert("restless_without_sm", "Restlessness if not using social media (1=Never, 5=Always)"),
        likert("easily_distracted", "Ease of distraction (1=Low, 5=High)"),
        likert("worry_level", "Worry level (1=Low, 5=High)"),
        likert("concentration_difficulty", "Difficulty concentrating (1=Low, 5=High)"),
        likert("comparison_freq", "Comparison frequency (1=Never, 5=Always)"),
        likert("comparison_feelings", "Feelings after comparison (1=Poorly affected, 5=Not affected)"),
        likert("seek_validation", "Validation seeking (1=Never, 5=Always)"),
        likert("feel_depressed", "Depression frequency (1=Never, 5=Always)"),
        likert("interest_fluctuation", "Interest fluctuation (1=Low, 5=High)"),
        likert("sleep_issues", "Sleep issues (1=Never, 5=Always)"),
        choice(
            "gender",
            "Gender",
            Widget::Radio,
            Gender::ALL.iter().map(|g| g.label()).collect(),
        ),
        choice(
            "relationship_status",
            "Relationship status:",
            Widget::Select,
            RelationshipStatus::ALL.iter().map(|s| s.label()).collect(),
        ),
    ]
}

/// A submission made of every question's default answer.
pub fn default_answers() -> Value {
    Value::Object(
        questionnaire()
            .into_iter()
            .map(|q| (q.key.to_string(), q.default))
            .collect(),
    )
}
