//! Report output stage.
//!
//! Handles rendering a progression report and writing it to stdout or a file.

use crate::catalog::QuestionCatalog;
use crate::reports::{create_reporter_with_options, ReportContext, ReportFormat, ReportMetadata};
use crate::scoring::ProgressionReport;
use anyhow::{Context, Result};

use super::{should_use_color, write_output, OutputTarget};

/// Where and how to render one report
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub format: ReportFormat,
    pub target: OutputTarget,
    pub no_color: bool,
    pub quiet: bool,
}

/// Render a progression report and write it to the requested destination.
///
/// Color is only used for stdout and only when neither `--no-color` nor
/// `NO_COLOR` disables it.
pub fn output_report(
    request: &ReportRequest,
    report: &ProgressionReport,
    catalog: &QuestionCatalog,
    metadata: &ReportMetadata,
) -> Result<()> {
    let use_color =
        should_use_color(request.no_color) && matches!(request.target, OutputTarget::Stdout);
    let reporter = create_reporter_with_options(request.format, use_color);
    let context = ReportContext::new(catalog, metadata);

    let rendered = reporter
        .generate(report, &context)
        .with_context(|| format!("Failed to render {} report", request.format))?;

    write_output(&rendered, &request.target, request.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Answer, AnswerValue, Importance, Question, TmmiLevel};
    use crate::scoring::ProgressionEngine;

    #[test]
    fn test_csv_report_written_to_file() {
        let catalog = QuestionCatalog::new(vec![Question::new(
            "Q1",
            TmmiLevel::MANAGED,
            "Test Policy",
            "Policy?",
            Importance::High,
        )])
        .unwrap();
        let report =
            ProgressionEngine::default().score(&catalog, &[Answer::new("Q1", AnswerValue::Yes)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        let request = ReportRequest {
            format: ReportFormat::Csv,
            target: OutputTarget::File(path.clone()),
            no_color: true,
            quiet: true,
        };

        output_report(&request, &report, &catalog, &ReportMetadata::default()).unwrap();

        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with("Question ID,"));
        assert!(written.contains("Q1,2,Test Policy,Policy?,High,Yes,,,"));
    }
}
