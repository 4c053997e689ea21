//! **Maturity progression scoring for TMMi test-process assessments.**
//!
//! `tmmi-tracker` turns a reviewer's Yes / Partial / No answers to a catalog
//! of TMMi assessment questions into a structured progression report: which
//! maturity level an organization has achieved, how ready it is for the next
//! one, which gaps block it, and where high ratings lack evidence.
//!
//! It powers both a command-line interface for assessment workflows and a
//! Rust library for embedding the scoring engine elsewhere.
//!
//! ## Key Features
//!
//! - **Four-tier roll-up**: answers become practice, goal, and process-area
//!   attainment percentages, each classified into an N/P/L/F achievement band.
//! - **Level determination**: the highest level whose process areas all meet
//!   the compliance threshold, with no level skipping.
//! - **Next-level readiness**: a conservative readiness percentage and an
//!   eligibility verdict with the blocking process areas named.
//! - **Gap and evidence analysis**: prioritized remediation actions and risk
//!   indicators for ratings backed by little evidence.
//! - **Reporting**: terminal summary, JSON, CSV, and Markdown renderers.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: questions, answers, assessments, and organizations.
//! - **[`catalog`]**: the validated [`QuestionCatalog`] and its loaders.
//! - **[`scoring`]**: the [`ProgressionEngine`] and its [`ProgressionReport`].
//! - **[`store`]**: the [`AssessmentStore`] port with in-memory and JSON-file
//!   implementations.
//! - **[`reports`]**: generators for the supported output formats.
//! - **[`config`]**: thresholds, presets, and YAML config file discovery.
//!
//! ## Getting Started: Scoring an Assessment
//!
//! ```no_run
//! use std::path::Path;
//! use tmmi_tracker::{load_catalog, Answer, AnswerValue, ProgressionEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = load_catalog(Path::new("data/tmmi_questions.json"))?;
//!     let answers = vec![
//!         Answer::new("L2_TP_001", AnswerValue::Yes),
//!         Answer::new("L2_TP_002", AnswerValue::Partial).with_comment("draft only"),
//!     ];
//!
//!     let report = ProgressionEngine::default().score(&catalog, &answers);
//!     println!("Achieved {}", report.level.explanation);
//!     if let Some(readiness) = report.readiness.readiness() {
//!         println!("Readiness for the next level: {readiness:.1}%");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Custom Thresholds
//!
//! ```
//! use tmmi_tracker::{ProgressionEngine, ScoringThresholds, ThresholdPreset};
//!
//! let thresholds = ScoringThresholds::from_preset(ThresholdPreset::Strict);
//! let engine = ProgressionEngine::new(thresholds);
//! assert_eq!(engine.thresholds().readiness_gate, 85.0);
//! ```

#![warn(clippy::unwrap_used)]
#![allow(
    // Counts become percentages throughout scoring
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod scoring;
pub mod store;

// Re-export main types for convenience
pub use catalog::{load_catalog, parse_catalog_str, CatalogFormat, QuestionCatalog};
pub use config::{AppConfig, ConfigError, Validatable};
pub use error::{ErrorContext, Result, TrackerError};
pub use model::{
    Answer, AnswerValue, Assessment, AssessmentDraft, AssessmentId, FrameworkMapping, Importance,
    Organization, OrganizationId, Question, TmmiLevel,
};
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{
    AchievementBand, ProgressionEngine, ProgressionReport, ReadinessResult, ScoringThresholds,
    ThresholdPreset,
};
pub use store::{AssessmentStore, InMemoryStore, JsonFileStore};
