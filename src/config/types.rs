//! Configuration types for tmmi-tracker.

use super::defaults::{
    CATALOG_PATH_ENV, DEFAULT_CATALOG_PATH, DEFAULT_STORE_PATH, STORE_PATH_ENV,
};
use crate::reports::ReportFormat;
use crate::scoring::{EvidenceCoveragePolicy, ScoringThresholds, ThresholdPreset};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from a YAML file and overridden by CLI
/// arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Scoring thresholds (preset plus individual overrides)
    pub scoring: ScoringConfig,
    /// Question catalog location
    pub catalog: CatalogConfig,
    /// Assessment workspace location
    pub store: StoreConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Thresholds the engine should run with
    #[must_use]
    pub fn thresholds(&self) -> ScoringThresholds {
        self.scoring.resolve()
    }
}

// ============================================================================
// Scoring Configuration
// ============================================================================

/// Threshold preset with optional per-threshold overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScoringConfig {
    /// Preset: standard, formal, strict
    pub preset: ThresholdPreset,
    /// Lower bound of the Fully achieved band (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 100.0))]
    pub fully_achieved: Option<f64>,
    /// Lower bound of the Largely achieved band (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 100.0))]
    pub largely_achieved: Option<f64>,
    /// Lower bound of the Partially achieved band (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 100.0))]
    pub partially_achieved: Option<f64>,
    /// Process-area attainment needed for a level to count (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 100.0))]
    pub level_compliance: Option<f64>,
    /// Per-area floor for next-level eligibility (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 100.0))]
    pub readiness_gate: Option<f64>,
    /// Generic-goal attainment needed for a Met verdict (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 100.0))]
    pub generic_goal_met: Option<f64>,
    /// Evidence coverage below which F/L ratings are flagged (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 100.0))]
    pub evidence_risk_floor: Option<f64>,
    /// Process-area evidence policy: practice-mean or answer-weighted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_evidence_policy: Option<EvidenceCoveragePolicy>,
}

impl ScoringConfig {
    /// Apply the overrides on top of the preset's thresholds
    #[must_use]
    pub fn resolve(&self) -> ScoringThresholds {
        let base = ScoringThresholds::from_preset(self.preset);
        ScoringThresholds {
            fully_achieved: self.fully_achieved.unwrap_or(base.fully_achieved),
            largely_achieved: self.largely_achieved.unwrap_or(base.largely_achieved),
            partially_achieved: self.partially_achieved.unwrap_or(base.partially_achieved),
            level_compliance: self.level_compliance.unwrap_or(base.level_compliance),
            readiness_gate: self.readiness_gate.unwrap_or(base.readiness_gate),
            generic_goal_met: self.generic_goal_met.unwrap_or(base.generic_goal_met),
            evidence_risk_floor: self.evidence_risk_floor.unwrap_or(base.evidence_risk_floor),
            area_evidence_policy: self
                .area_evidence_policy
                .unwrap_or(base.area_evidence_policy),
        }
    }
}

// ============================================================================
// Data Locations
// ============================================================================

/// Where the question catalog lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog file (JSON or YAML)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    /// Resolve the catalog path: CLI argument, then `TMMI_QUESTIONS_PATH`,
    /// then this config, then the default location
    #[must_use]
    pub fn resolve_path(&self, cli: Option<&Path>) -> PathBuf {
        resolve_location(cli, CATALOG_PATH_ENV, self.path.as_deref(), DEFAULT_CATALOG_PATH)
    }
}

/// Where the assessment workspace lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StoreConfig {
    /// Workspace JSON file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Resolve the workspace path: CLI argument, then `TMMI_DB_PATH`, then
    /// this config, then the default location
    #[must_use]
    pub fn resolve_path(&self, cli: Option<&Path>) -> PathBuf {
        resolve_location(cli, STORE_PATH_ENV, self.path.as_deref(), DEFAULT_STORE_PATH)
    }
}

fn resolve_location(
    cli: Option<&Path>,
    env_var: &str,
    configured: Option<&Path>,
    default: &str,
) -> PathBuf {
    if let Some(path) = cli {
        return path.to_path_buf();
    }
    if let Some(value) = std::env::var_os(env_var).filter(|v| !v.is_empty()) {
        return PathBuf::from(value);
    }
    configured.map_or_else(|| PathBuf::from(default), Path::to_path_buf)
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format: summary, json, csv, markdown
    pub format: ReportFormat,
    /// Output file path (stdout when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}
