//! Default locations and preset-based configurations.

use super::types::{AppConfig, ScoringConfig};
use crate::scoring::ThresholdPreset;

/// Catalog location when nothing else is configured
pub const DEFAULT_CATALOG_PATH: &str = "data/tmmi_questions.json";

/// Workspace location when nothing else is configured
pub const DEFAULT_STORE_PATH: &str = "data/tmmi_tracker.json";

/// Environment variable overriding the catalog location
pub const CATALOG_PATH_ENV: &str = "TMMI_QUESTIONS_PATH";

/// Environment variable overriding the workspace location
pub const STORE_PATH_ENV: &str = "TMMI_DB_PATH";

impl ThresholdPreset {
    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Standard, Self::Formal, Self::Strict]
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Standard => "85/50/15 bands, 80% process-area compliance, 50% readiness gate",
            Self::Formal => "A level counts once every process area is rated Largely or Fully",
            Self::Strict => "Level compliance and readiness both require Fully achieved areas",
        }
    }
}

impl AppConfig {
    /// Create an `AppConfig` using a threshold preset.
    #[must_use]
    pub fn from_preset(preset: ThresholdPreset) -> Self {
        Self {
            scoring: ScoringConfig {
                preset,
                ..ScoringConfig::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_resolve() {
        for preset in ThresholdPreset::all() {
            let config = AppConfig::from_preset(*preset);
            assert_eq!(config.scoring.preset, *preset);
            assert!(!preset.description().is_empty());
        }
        let formal = AppConfig::from_preset(ThresholdPreset::Formal);
        assert_eq!(formal.thresholds().level_compliance, 50.0);
    }
}
