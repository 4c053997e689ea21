//! JSON report generator.

use super::{ReportContext, ReportError, ReportFormat, ReportGenerator, ReportMetadata};
use crate::scoring::ProgressionReport;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
#[derive(Debug, Clone, Copy)]
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct JsonProgressionReport<'a> {
    tool: ToolInfo,
    metadata: ReportMetadata,
    catalog_questions: usize,
    #[serde(flatten)]
    report: &'a ProgressionReport,
}

impl ReportGenerator for JsonReporter {
    fn generate(
        &self,
        report: &ProgressionReport,
        context: &ReportContext<'_>,
    ) -> Result<String, ReportError> {
        let mut metadata = context.metadata.clone();
        metadata.generated_at.get_or_insert_with(Utc::now);

        let document = JsonProgressionReport {
            tool: ToolInfo {
                name: "tmmi-tracker",
                version: env!("CARGO_PKG_VERSION"),
            },
            metadata,
            catalog_questions: context.catalog.len(),
            report,
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        rendered.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QuestionCatalog;
    use crate::model::{Answer, AnswerValue, Importance, Question, TmmiLevel};
    use crate::scoring::ProgressionEngine;

    #[test]
    fn test_json_flattens_report() {
        let catalog = QuestionCatalog::new(vec![Question::new(
            "Q1",
            TmmiLevel::MANAGED,
            "Test Policy",
            "Policy?",
            Importance::High,
        )
        .with_practice("SG1", "SP1.1")])
        .unwrap();
        let report =
            ProgressionEngine::default().score(&catalog, &[Answer::new("Q1", AnswerValue::Yes)]);
        let metadata = ReportMetadata {
            organization: Some("Acme".to_string()),
            ..ReportMetadata::default()
        };

        let json = JsonReporter::new()
            .pretty(false)
            .generate(&report, &ReportContext::new(&catalog, &metadata))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tool"]["name"], "tmmi-tracker");
        assert_eq!(value["metadata"]["organization"], "Acme");
        assert_eq!(value["achieved_level"], 2);
        assert_eq!(value["catalog_questions"], 1);
        assert!(value["metadata"]["generated_at"].is_string());
    }
}
