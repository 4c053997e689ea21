//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".tmmi-tracker.yaml",
    ".tmmi-tracker.yml",
    "tmmi-tracker.yaml",
    "tmmi-tracker.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/tmmi-tracker/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) =
        dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("tmmi-tracker")))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Config file not found: {}", path.display()),
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    format!(
        r"# tmmi-tracker configuration
# Place this file at .tmmi-tracker.yaml in your project root or ~/.config/tmmi-tracker/

{}
",
        serde_yaml::to_string(&AppConfig::default()).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# tmmi-tracker configuration file
# ================================
#
# Place it at:
#   - .tmmi-tracker.yaml in your project root
#   - ~/.config/tmmi-tracker/tmmi-tracker.yaml for global config
#
# CLI arguments always override file settings.

# Scoring thresholds (all percentages 0-100)
scoring:
  # Preset: standard, formal, strict
  preset: standard
  # Band floors; must satisfy partially < largely < fully
  # fully_achieved: 85
  # largely_achieved: 50
  # partially_achieved: 15
  # Process-area attainment needed for a level to count as achieved
  # level_compliance: 80
  # Per-area floor for next-level eligibility
  # readiness_gate: 50
  # Generic-goal attainment for a Met verdict
  # generic_goal_met: 85
  # F/L ratings with less evidence coverage than this are flagged
  # evidence_risk_floor: 50
  # Process-area evidence coverage: practice-mean, answer-weighted
  # area_evidence_policy: practice-mean

# Question catalog (TMMI_QUESTIONS_PATH overrides)
# catalog:
#   path: data/tmmi_questions.json

# Assessment workspace (TMMI_DB_PATH overrides)
# store:
#   path: data/tmmi_tracker.json

# Output configuration
output:
  # Format: summary, json, csv, markdown
  format: summary
  # Output file path (omit for stdout)
  # file: assessment.csv
  # Disable colored output
  no_color: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ThresholdPreset;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".tmmi-tracker.yaml");
        std::fs::write(&config_path, "scoring:\n  preset: strict\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r"
scoring:
  preset: strict
  evidence_risk_floor: 30
catalog:
  path: questions.yaml
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.scoring.preset, ThresholdPreset::Strict);
        assert_eq!(config.scoring.evidence_risk_floor, Some(30.0));
        assert_eq!(config.catalog.path, Some(PathBuf::from("questions.yaml")));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_invalid_yaml_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "scoring: [not, a, map").unwrap();

        let (config, loaded_from) = load_or_default(Some(&config_path));
        assert!(loaded_from.is_none());
        assert_eq!(config.scoring.preset, ThresholdPreset::Standard);
    }

    #[test]
    fn test_example_configs_parse() {
        let example = generate_example_config();
        assert!(example.contains("scoring:"));
        let parsed: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(parsed.scoring.preset, ThresholdPreset::Standard);
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "output:\n  format: json\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}
