//! Configuration validation for tmmi-tracker.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, OutputConfig, ScoringConfig};
use crate::scoring::ScoringThresholds;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning every error found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.scoring.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.resolve()
            .validate()
            .into_iter()
            .map(|e| ConfigError::new(format!("scoring.{}", e.field), e.message))
            .collect()
    }
}

impl Validatable for ScoringThresholds {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let percentages = [
            ("fully_achieved", self.fully_achieved),
            ("largely_achieved", self.largely_achieved),
            ("partially_achieved", self.partially_achieved),
            ("level_compliance", self.level_compliance),
            ("readiness_gate", self.readiness_gate),
            ("generic_goal_met", self.generic_goal_met),
            ("evidence_risk_floor", self.evidence_risk_floor),
        ];
        for (field, value) in percentages {
            if !(0.0..=100.0).contains(&value) {
                errors.push(ConfigError::new(
                    field,
                    format!("Must be a percentage between 0 and 100, got {value}"),
                ));
            }
        }

        if self.partially_achieved >= self.largely_achieved {
            errors.push(ConfigError::new(
                "partially_achieved",
                format!(
                    "Must be below largely_achieved ({} >= {})",
                    self.partially_achieved, self.largely_achieved
                ),
            ));
        }
        if self.largely_achieved >= self.fully_achieved {
            errors.push(ConfigError::new(
                "largely_achieved",
                format!(
                    "Must be below fully_achieved ({} >= {})",
                    self.largely_achieved, self.fully_achieved
                ),
            ));
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_out_of_range_threshold() {
        let thresholds = ScoringThresholds {
            readiness_gate: 120.0,
            ..ScoringThresholds::default()
        };
        let errors = thresholds.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "readiness_gate");
    }

    #[test]
    fn test_bands_must_be_ordered() {
        let thresholds = ScoringThresholds {
            largely_achieved: 90.0,
            ..ScoringThresholds::default()
        };
        let errors = thresholds.validate();
        assert!(errors.iter().any(|e| e.field == "largely_achieved"));
    }

    #[test]
    fn test_scoring_errors_are_prefixed() {
        let config = ScoringConfig {
            partially_achieved: Some(60.0),
            ..ScoringConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors[0].field, "scoring.partially_achieved");
        assert_eq!(
            errors[0].to_string(),
            "scoring.partially_achieved: Must be below largely_achieved (60 >= 50)"
        );
    }

    #[test]
    fn test_output_parent_must_exist() {
        let config = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/report.csv")),
            ..OutputConfig::default()
        };
        assert!(!config.is_valid());
    }
}
