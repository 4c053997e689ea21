//! Input loading for the catalog, assessment files, and the workspace store.

use crate::catalog::{load_catalog, CatalogFormat, QuestionCatalog};
use crate::model::AssessmentDraft;
use crate::store::JsonFileStore;
use anyhow::{Context, Result};
use std::path::Path;

/// Load the question catalog with context for error messages
pub fn load_catalog_with_context(path: &Path, quiet: bool) -> Result<QuestionCatalog> {
    if !quiet {
        tracing::info!("Loading catalog: {}", path.display());
    }

    let catalog = load_catalog(path)
        .with_context(|| format!("Failed to load question catalog: {}", path.display()))?;

    if !quiet {
        tracing::info!(
            "Loaded {} questions across {} process areas",
            catalog.len(),
            catalog.all_process_areas().count()
        );
    }
    Ok(catalog)
}

/// Load an assessment file (JSON or YAML by extension)
pub fn load_assessment_draft(path: &Path) -> Result<AssessmentDraft> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read assessment file: {}", path.display()))?;

    let draft: AssessmentDraft = match CatalogFormat::from_path(path) {
        CatalogFormat::Yaml => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse assessment: {}", path.display()))?,
        CatalogFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse assessment: {}", path.display()))?,
    };

    tracing::debug!(
        organization = %draft.organization,
        answers = draft.answers.len(),
        "loaded assessment file"
    );
    Ok(draft)
}

/// Open the JSON workspace store, creating an empty one if the file is absent
pub fn open_store(path: &Path) -> Result<JsonFileStore> {
    JsonFileStore::open(path)
        .with_context(|| format!("Failed to open assessment workspace: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerValue;

    #[test]
    fn test_load_yaml_assessment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assessment.yaml");
        std::fs::write(
            &path,
            "organization: Acme\nreviewer_name: Sam\nanswers:\n  - question_id: Q1\n    answer: Partial\n",
        )
        .unwrap();

        let draft = load_assessment_draft(&path).unwrap();
        assert_eq!(draft.organization, "Acme");
        assert_eq!(draft.answers[0].value, AnswerValue::Partial);
    }

    #[test]
    fn test_missing_assessment_has_context() {
        let err = load_assessment_draft(Path::new("/nonexistent/a.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read assessment file"));
    }

    #[test]
    fn test_missing_catalog_has_context() {
        let err = load_catalog_with_context(Path::new("/nonexistent/q.json"), true).unwrap_err();
        assert!(err.to_string().contains("Failed to load question catalog"));
    }
}
