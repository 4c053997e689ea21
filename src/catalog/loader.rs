//! Catalog file loading.

use super::QuestionCatalog;
use crate::error::{ErrorContext, Result, TrackerError};
use crate::model::Question;
use std::path::Path;

/// Catalog files larger than this are rejected before reading
const MAX_CATALOG_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Serialization format of a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Pick the format from a file extension, defaulting to JSON
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Load and validate a question catalog from disk.
///
/// The file holds a list of question records; `.yaml`/`.yml` files are read
/// as YAML, anything else as JSON.
pub fn load_catalog(path: &Path) -> Result<QuestionCatalog> {
    let metadata = std::fs::metadata(path).map_err(|e| TrackerError::io(path, e))?;
    if metadata.len() > MAX_CATALOG_FILE_SIZE {
        return Err(TrackerError::validation(format!(
            "catalog file {} is {} MB, exceeding the {} MB limit",
            path.display(),
            metadata.len() / (1024 * 1024),
            MAX_CATALOG_FILE_SIZE / (1024 * 1024),
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|e| TrackerError::io(path, e))?;
    let catalog = parse_catalog_str(&content, CatalogFormat::from_path(path))
        .with_context(|| format!("loading catalog {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        questions = catalog.len(),
        "loaded question catalog"
    );
    Ok(catalog)
}

/// Parse a question catalog from string content
pub fn parse_catalog_str(content: &str, format: CatalogFormat) -> Result<QuestionCatalog> {
    let questions: Vec<Question> = match format {
        CatalogFormat::Json => serde_json::from_str(content)?,
        CatalogFormat::Yaml => serde_yaml::from_str(content)?,
    };
    QuestionCatalog::new(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogErrorKind;
    use crate::model::TmmiLevel;

    const JSON: &str = r#"[
        {"id": "L2_TP_001", "level": 2, "process_area": "Test Planning",
         "question": "Is there a documented test policy?", "importance": "High",
         "recommended_activity": "Create and document a test policy",
         "reference_url": "https://www.tmmi.org/tmmi-model/",
         "specific_goal": "SG1", "specific_practice": "SP1.1", "generic_goal": "GG2.1"},
        {"id": "L3_TO_001", "level": 3, "process_area": "Test Organization",
         "question": "Is there a test group?", "importance": "Medium"}
    ]"#;

    #[test]
    fn test_parse_json_catalog() {
        let catalog = parse_catalog_str(JSON, CatalogFormat::Json).unwrap();
        assert_eq!(catalog.len(), 2);
        let q = catalog.get("L2_TP_001").unwrap();
        assert_eq!(q.level, TmmiLevel::MANAGED);
        assert!(q.mapping.is_practice());
        assert!(catalog.get("L3_TO_001").unwrap().mapping.is_unmapped());
    }

    #[test]
    fn test_parse_yaml_catalog() {
        let yaml = r"
- id: L2_TP_001
  level: 2
  process_area: Test Planning
  question: Is there a documented test policy?
  importance: High
  specific_goal: SG1
  specific_practice: SP1.1
";
        let catalog = parse_catalog_str(yaml, CatalogFormat::Yaml).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_duplicate_id_in_file() {
        let json = r#"[
            {"id": "A", "level": 2, "process_area": "P", "question": "q", "importance": "Low"},
            {"id": "A", "level": 2, "process_area": "P", "question": "q", "importance": "Low"}
        ]"#;
        let err = parse_catalog_str(json, CatalogFormat::Json).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Catalog {
                source: CatalogErrorKind::DuplicateQuestion(ref id),
                ..
            } if id == "A"
        ));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(CatalogFormat::from_path(Path::new("q.YML")), CatalogFormat::Yaml);
        assert_eq!(CatalogFormat::from_path(Path::new("q.json")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("questions")), CatalogFormat::Json);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tmmi_questions.json");
        std::fs::write(&path, JSON).unwrap();
        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 2);

        let missing = load_catalog(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(TrackerError::Io { .. })));
    }
}
