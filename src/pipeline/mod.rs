//! Pipeline orchestration for assessment operations.
//!
//! This module provides shared orchestration logic for load → score → report
//! workflows, reducing duplication across CLI command handlers.

mod load;
mod output;
mod report_stage;

pub use load::{load_assessment_draft, load_catalog_with_context, open_store};
pub use output::{detect_format, should_use_color, write_output, OutputTarget};
pub use report_stage::{output_report, ReportRequest};

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read or parse an input file
    #[error("Load failed for {path}: {source}")]
    LoadFailed {
        path: String,
        source: anyhow::Error,
    },

    /// No assessment exists for the requested organization
    #[error("Organization '{organization}' has no assessments")]
    NoAssessment { organization: String },

    /// Report generation or output failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[source]
        source: anyhow::Error,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - every requested gate passed
    pub const SUCCESS: i32 = 0;
    /// A maturity or eligibility gate failed
    pub const GATE_FAILED: i32 = 1;
    /// Validation found problems in the catalog or assessment
    pub const VALIDATION_FAILED: i32 = 2;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
