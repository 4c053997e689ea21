//! Unified error types for tmmi-tracker.
//!
//! This module provides the error hierarchy for the library, with chained
//! context for debugging and user-friendly messages.
//!
//! Only a handful of conditions are hard failures. Unmapped questions and
//! empty aggregates are absorbed into the shape of the scoring report and
//! never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tmmi-tracker operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TrackerError {
    /// Errors while loading or validating the question catalog
    #[error("Question catalog error: {context}")]
    Catalog {
        context: String,
        #[source]
        source: CatalogErrorKind,
    },

    /// Errors in assessment or answer data
    #[error("Assessment error: {context}")]
    Assessment {
        context: String,
        #[source]
        source: AssessmentErrorKind,
    },

    /// Errors raised by an assessment store
    #[error("Store operation failed: {context}")]
    Store {
        context: String,
        #[source]
        source: StoreErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific catalog error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    #[error("Duplicate question id: {0}")]
    DuplicateQuestion(String),

    #[error("Question {question_id} has level {level}, expected 2-5")]
    InvalidLevel { question_id: String, level: u8 },

    #[error("Question {question_id} has unknown importance '{value}' (expected High, Medium or Low)")]
    InvalidImportance { question_id: String, value: String },

    #[error(
        "Question {question_id} maps only part of a specific practice (specific goal and specific practice must both be set)"
    )]
    IncompleteMapping { question_id: String },

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML structure: {0}")]
    InvalidYaml(String),
}

/// Specific assessment error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AssessmentErrorKind {
    /// An answer value outside {Yes, No, Partial}
    #[error("Invalid answer value '{0}' (expected Yes, No or Partial)")]
    InvalidAnswerValue(String),

    #[error("Answer references unknown question id: {0}")]
    UnknownQuestion(String),

    #[error("Question {0} is answered more than once")]
    DuplicateAnswer(String),
}

/// Specific store error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreErrorKind {
    #[error("Organization not found: {0}")]
    OrganizationNotFound(String),

    #[error("Organization already exists: {0}")]
    DuplicateOrganization(String),

    #[error("Assessment not found: {0}")]
    AssessmentNotFound(u64),

    #[error("Assessment {assessment_id} has no answer for question {question_id}")]
    AnswerNotFound {
        assessment_id: u64,
        question_id: String,
    },

    #[error("Corrupt workspace document: {0}")]
    CorruptWorkspace(String),
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Failed to format report output: {0}")]
    Formatting(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for tmmi-tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl TrackerError {
    /// Create a catalog error with context
    pub fn catalog(context: impl Into<String>, source: CatalogErrorKind) -> Self {
        Self::Catalog {
            context: context.into(),
            source,
        }
    }

    /// Create an assessment error with context
    pub fn assessment(context: impl Into<String>, source: AssessmentErrorKind) -> Self {
        Self::Assessment {
            context: context.into(),
            source,
        }
    }

    /// Create the error raised for an answer value outside {Yes, No, Partial}
    pub fn invalid_answer(value: impl Into<String>) -> Self {
        Self::assessment(
            "parsing answer value",
            AssessmentErrorKind::InvalidAnswerValue(value.into()),
        )
    }

    /// Create a store error with context
    pub fn store(context: impl Into<String>, source: StoreErrorKind) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    /// Create a report error with context
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error is an invalid answer value
    #[must_use]
    pub const fn is_invalid_answer(&self) -> bool {
        matches!(
            self,
            Self::Assessment {
                source: AssessmentErrorKind::InvalidAnswerValue(_),
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::catalog(
            "JSON deserialization",
            CatalogErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<serde_yaml::Error> for TrackerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::catalog(
            "YAML deserialization",
            CatalogErrorKind::InvalidYaml(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are prepended to the error's existing context, producing
/// a chain such as `"scoring acme: loading catalog: JSON deserialization"`.
///
/// # Example
///
/// ```ignore
/// use tmmi_tracker::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<QuestionCatalog> {
///     let content = std::fs::read_to_string(path).context("reading catalog file")?;
///     parse_catalog_str(&content, CatalogFormat::Json)
///         .with_context(|| format!("parsing catalog from {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<TrackerError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: TrackerError, new_ctx: &str) -> TrackerError {
    match err {
        TrackerError::Catalog {
            context: existing,
            source,
        } => TrackerError::Catalog {
            context: chain_context(new_ctx, &existing),
            source,
        },
        TrackerError::Assessment {
            context: existing,
            source,
        } => TrackerError::Assessment {
            context: chain_context(new_ctx, &existing),
            source,
        },
        TrackerError::Store {
            context: existing,
            source,
        } => TrackerError::Store {
            context: chain_context(new_ctx, &existing),
            source,
        },
        TrackerError::Report {
            context: existing,
            source,
        } => TrackerError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        TrackerError::Io {
            path,
            message,
            source,
        } => TrackerError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        TrackerError::Config(msg) => TrackerError::Config(chain_context(new_ctx, &msg)),
        TrackerError::Validation(msg) => TrackerError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// Returns "`new_context`: `existing_context`", or just the new context when
/// nothing was there before.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
