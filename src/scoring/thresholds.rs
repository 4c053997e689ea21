//! Threshold configuration handed to the engine at construction.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a process area's evidence coverage is derived from its practices
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum EvidenceCoveragePolicy {
    /// Mean of the member practices' coverage, each practice weighted equally
    #[default]
    PracticeMean,
    /// Evidenced answers over all answers in the area
    AnswerWeighted,
}

impl EvidenceCoveragePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PracticeMean => "practice-mean",
            Self::AnswerWeighted => "answer-weighted",
        }
    }
}

/// Every percentage threshold the engine compares against.
///
/// All values are percentages in 0-100. Lower bounds are inclusive: an
/// attainment exactly equal to `fully_achieved` is rated F.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringThresholds {
    /// Lower bound of the F band
    pub fully_achieved: f64,
    /// Lower bound of the L band
    pub largely_achieved: f64,
    /// Lower bound of the P band
    pub partially_achieved: f64,
    /// Minimum process-area attainment for a level to count as achieved
    pub level_compliance: f64,
    /// Minimum target-level area attainment for next-level eligibility
    pub readiness_gate: f64,
    /// Minimum generic-goal attainment for a Met verdict
    pub generic_goal_met: f64,
    /// Evidence coverage below which an F/L rating is flagged as a risk
    pub evidence_risk_floor: f64,
    /// Process-area evidence coverage policy
    pub area_evidence_policy: EvidenceCoveragePolicy,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            fully_achieved: 85.0,
            largely_achieved: 50.0,
            partially_achieved: 15.0,
            level_compliance: 80.0,
            readiness_gate: 50.0,
            generic_goal_met: 85.0,
            evidence_risk_floor: 50.0,
            area_evidence_policy: EvidenceCoveragePolicy::PracticeMean,
        }
    }
}

impl ScoringThresholds {
    /// Thresholds for a named preset
    #[must_use]
    pub fn from_preset(preset: ThresholdPreset) -> Self {
        let base = Self::default();
        match preset {
            ThresholdPreset::Standard => base,
            ThresholdPreset::Formal => Self {
                level_compliance: base.largely_achieved,
                ..base
            },
            ThresholdPreset::Strict => Self {
                level_compliance: base.fully_achieved,
                readiness_gate: base.fully_achieved,
                ..base
            },
        }
    }

    #[must_use]
    pub const fn with_evidence_policy(mut self, policy: EvidenceCoveragePolicy) -> Self {
        self.area_evidence_policy = policy;
        self
    }
}

/// Named threshold regimes
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdPreset {
    /// 85/50/15 bands, 80% level compliance, 50% readiness gate
    #[default]
    Standard,
    /// A level counts once every area is rated at least Largely achieved
    Formal,
    /// Level compliance and readiness both require Fully achieved areas
    Strict,
}

impl std::fmt::Display for ThresholdPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Formal => write!(f, "formal"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = ScoringThresholds::default();
        assert_eq!(t.fully_achieved, 85.0);
        assert_eq!(t.largely_achieved, 50.0);
        assert_eq!(t.partially_achieved, 15.0);
        assert_eq!(t.level_compliance, 80.0);
        assert_eq!(t.readiness_gate, 50.0);
        assert_eq!(t.generic_goal_met, 85.0);
        assert_eq!(t.area_evidence_policy, EvidenceCoveragePolicy::PracticeMean);
    }

    #[test]
    fn test_presets() {
        assert_eq!(
            ScoringThresholds::from_preset(ThresholdPreset::Standard),
            ScoringThresholds::default()
        );
        assert_eq!(
            ScoringThresholds::from_preset(ThresholdPreset::Formal).level_compliance,
            50.0
        );
        let strict = ScoringThresholds::from_preset(ThresholdPreset::Strict);
        assert_eq!(strict.level_compliance, 85.0);
        assert_eq!(strict.readiness_gate, 85.0);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let t: ScoringThresholds =
            serde_yaml::from_str("level_compliance: 70\narea_evidence_policy: answer-weighted\n")
                .unwrap();
        assert_eq!(t.level_compliance, 70.0);
        assert_eq!(t.fully_achieved, 85.0);
        assert_eq!(t.area_evidence_policy, EvidenceCoveragePolicy::AnswerWeighted);
    }
}
