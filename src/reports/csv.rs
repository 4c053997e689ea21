//! CSV report generator.
//!
//! One row per catalog question in catalog order, suitable for spreadsheet
//! review of a whole assessment.

use super::escape::escape_csv_field;
use super::{ReportContext, ReportError, ReportFormat, ReportGenerator};
use crate::scoring::ProgressionReport;
use std::fmt::Write;

/// Column headers of the assessment export
pub const CSV_HEADERS: [&str; 10] = [
    "Question ID",
    "Level",
    "Process Area",
    "Question",
    "Priority",
    "Answer",
    "Comments",
    "Evidence URL",
    "Recommended Activity",
    "Reference URL",
];

/// Answer column value for questions without a recorded answer
pub const NOT_ANSWERED: &str = "Not Answered";

/// CSV report generator
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReporter;

impl CsvReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for CsvReporter {
    fn generate(
        &self,
        report: &ProgressionReport,
        context: &ReportContext<'_>,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        writeln!(content, "{}", CSV_HEADERS.join(","))?;

        for question in context.catalog.iter() {
            let response = report.response_for(&question.id);
            let answer = response.map_or(NOT_ANSWERED, |r| r.answer.as_str());
            let comment = response.and_then(|r| r.comment.as_deref()).unwrap_or("");
            let evidence = response
                .and_then(|r| r.evidence_url.as_deref())
                .unwrap_or("");
            let level = question.level.to_string();

            let row = [
                question.id.as_str(),
                level.as_str(),
                question.process_area.as_str(),
                question.question.as_str(),
                question.importance.as_str(),
                answer,
                comment,
                evidence,
                question.recommended_activity.as_str(),
                question.reference_url.as_str(),
            ]
            .iter()
            .map(|field| escape_csv_field(field))
            .collect::<Vec<_>>()
            .join(",");
            writeln!(content, "{row}")?;
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QuestionCatalog;
    use crate::model::{Answer, AnswerValue, Importance, Question, TmmiLevel};
    use crate::reports::ReportMetadata;
    use crate::scoring::ProgressionEngine;

    #[test]
    fn test_every_catalog_question_gets_a_row() {
        let catalog = QuestionCatalog::new(vec![
            Question::new("Q1", TmmiLevel::MANAGED, "Test Policy", "Policy?", Importance::High),
            Question::new("Q2", TmmiLevel::MANAGED, "Test Policy", "Goals?", Importance::Low),
        ])
        .unwrap();
        let answers = vec![Answer::new("Q2", AnswerValue::Partial).with_comment("half, done")];
        let report = ProgressionEngine::default().score(&catalog, &answers);
        let metadata = ReportMetadata::default();

        let csv = CsvReporter::new()
            .generate(&report, &ReportContext::new(&catalog, &metadata))
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Question ID,Level,"));
        assert!(lines[1].contains(",Not Answered,"));
        assert!(lines[2].contains(",Partial,\"half, done\","));
    }
}
