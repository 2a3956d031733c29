use serde::Serialize;

use crate::models::RiskTier;

/// How prominently the host should present a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// Fixed advice shown for one risk tier.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Guidance {
    pub tier: RiskTier,
    pub severity: Severity,
    pub headline: &'static str,
    pub heading: Option<&'static str>,
    pub advice: &'static [&'static str],
}

const HEALTHY_HABITS: &[&str] = &["Great balance! Continue healthy social media habits."];

/// Advice per tier, indexed in [`RiskTier`] order.
pub static GUIDANCE: [Guidance; 4] = [
    Guidance {
        tier: RiskTier::None,
        severity: Severity::Success,
        headline: "No signs of addiction.",
        heading: None,
        advice: HEALTHY_HABITS,
    },
    Guidance {
        tier: RiskTier::Low,
        severity: Severity::Info,
        headline: "Low risk, but keep an eye on your habits.",
        heading: None,
        advice: HEALTHY_HABITS,
    },
    Guidance {
        tier: RiskTier::Moderate,
        severity: Severity::Warning,
        headline: "Mixed signals: moderate risk detected.",
        heading: None,
        advice: &["Consider tracking and moderating your usage to avoid escalation."],
    },
    Guidance {
        tier: RiskTier::High,
        severity: Severity::Error,
        headline: "High risk of social media addiction.",
        heading: Some("Tips to reduce addiction:"),
        advice: &[
            "Set daily screen time limits",
            "Use focus apps to block notifications",
            "Schedule offline activities (exercise, reading)",
            "Practice mindfulness when using social media",
        ],
    },
];

pub fn guidance_for(tier: RiskTier) -> &'static Guidance {
    &GUIDANCE[tier as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_tier() {
        for tier in RiskTier::ALL {
            assert_eq!(guidance_for(tier).tier, tier);
        }
    }

    #[test]
    fn test_high_tier_lists_tips() {
        let g = guidance_for(RiskTier::High);
        assert_eq!(g.severity, Severity::Error);
        assert_eq!(g.advice.len(), 4);
        assert_eq!(g.advice[0], "Set daily screen time limits");
    }

    #[test]
    fn test_every_tier_has_advice() {
        assert!(GUIDANCE.iter().all(|g| !g.advice.is_empty() && !g.headline.is_empty()));
    }
}
