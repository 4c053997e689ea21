//! Report generation for progression results.
//!
//! This module renders a [`ProgressionReport`] in several formats:
//! - Summary: Compact colored terminal output
//! - JSON: Structured data for programmatic integration
//! - CSV: One row per catalog question, for spreadsheets
//! - Markdown: Human-readable documentation
//!
//! # Security
//!
//! The `escape` module provides utilities for safe output generation.
//! Reviewer comments, question text, and evidence URLs are free text and
//! must be escaped before embedding in CSV or Markdown.

mod csv;
pub mod escape;
mod json;
mod markdown;
mod summary;
mod types;

pub use csv::{CsvReporter, CSV_HEADERS, NOT_ANSWERED};
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;
pub use types::{ReportContext, ReportFormat, ReportMetadata};

use crate::error::{ReportErrorKind, TrackerError};
use crate::scoring::ProgressionReport;
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<ReportError> for TrackerError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::IoError(e) => Self::from(e),
            ReportError::SerializationError(msg) => Self::report(
                "rendering report",
                ReportErrorKind::JsonSerializationError(msg),
            ),
            ReportError::FormatError(e) => Self::report(
                "rendering report",
                ReportErrorKind::Formatting(e.to_string()),
            ),
        }
    }
}

/// Trait for report generators
pub trait ReportGenerator: Send + Sync {
    /// Render a progression report
    fn generate(
        &self,
        report: &ProgressionReport,
        context: &ReportContext<'_>,
    ) -> Result<String, ReportError>;

    /// Write a rendered report to a writer
    fn write_report(
        &self,
        report: &ProgressionReport,
        context: &ReportContext<'_>,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let rendered = self.generate(report, context)?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reporter_matches_format() {
        for format in [
            ReportFormat::Summary,
            ReportFormat::Json,
            ReportFormat::Csv,
            ReportFormat::Markdown,
        ] {
            assert_eq!(create_reporter_with_options(format, false).format(), format);
        }
    }

    #[test]
    fn test_serialization_error_converts() {
        let err: TrackerError = ReportError::SerializationError("boom".to_string()).into();
        assert!(matches!(err, TrackerError::Report { .. }));
    }
}
