//! Report type definitions.

use crate::catalog::QuestionCatalog;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Colored terminal summary
    #[default]
    Summary,
    /// Structured JSON output
    Json,
    /// One row per catalog question, for spreadsheet import
    Csv,
    /// Human-readable Markdown
    #[value(alias = "md")]
    Markdown,
}

impl ReportFormat {
    /// Conventional file extension for the format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Summary => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "md",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Who and when a report describes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub organization: Option<String>,
    pub reviewer: Option<String>,
    pub assessed_at: Option<DateTime<Utc>>,
    pub generated_at: Option<DateTime<Utc>>,
}

/// Inputs a renderer needs beyond the progression report itself
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub catalog: &'a QuestionCatalog,
    pub metadata: &'a ReportMetadata,
}

impl<'a> ReportContext<'a> {
    #[must_use]
    pub const fn new(catalog: &'a QuestionCatalog, metadata: &'a ReportMetadata) -> Self {
        Self { catalog, metadata }
    }
}
