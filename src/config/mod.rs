//! Configuration module for tmmi-tracker.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Threshold presets with per-threshold overrides
//! - YAML config file loading and discovery
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tmmi_tracker::config::{AppConfig, load_or_default};
//! use tmmi_tracker::scoring::{ProgressionEngine, ThresholdPreset};
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ThresholdPreset::Formal);
//!
//! // Load from file
//! let (config, loaded_from) = load_or_default(None);
//! let engine = ProgressionEngine::new(config.thresholds());
//! ```
//!
//! # Configuration File
//!
//! Place a `.tmmi-tracker.yaml` file in your project root or `~/.config/tmmi-tracker/`:
//!
//! ```yaml
//! scoring:
//!   preset: formal
//!   evidence_risk_floor: 40
//! output:
//!   format: markdown
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{CATALOG_PATH_ENV, DEFAULT_CATALOG_PATH, DEFAULT_STORE_PATH, STORE_PATH_ENV};
pub use types::{AppConfig, CatalogConfig, OutputConfig, ScoringConfig, StoreConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.tmmi-tracker.yaml` config files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_lists_sections() {
        let schema = generate_json_schema();
        assert!(schema.contains("\"scoring\""));
        assert!(schema.contains("\"level_compliance\""));
        assert!(schema.contains("\"output\""));
    }
}
