//! Score command handler.
//!
//! Implements the `score` subcommand: load the catalog and one assessment,
//! run the progression engine, render the report, and evaluate CI gates.

use crate::model::{Answer, TmmiLevel};
use crate::pipeline::{
    exit_codes, load_assessment_draft, load_catalog_with_context, open_store, output_report,
    PipelineError, ReportRequest,
};
use crate::reports::ReportMetadata;
use crate::scoring::{ProgressionEngine, ProgressionReport, ScoringThresholds};
use crate::store::AssessmentStore;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Where the assessment to score comes from
#[derive(Debug, Clone)]
pub enum AssessmentSource {
    /// A standalone assessment file
    File(PathBuf),
    /// The latest assessment of an organization in a workspace
    Store { path: PathBuf, organization: String },
}

/// Score command configuration
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub catalog_path: PathBuf,
    pub source: AssessmentSource,
    pub thresholds: ScoringThresholds,
    pub request: ReportRequest,
    /// Fail unless at least this level is achieved
    pub min_level: Option<TmmiLevel>,
    /// Fail unless eligible for the next level
    pub fail_if_not_eligible: bool,
}

/// Run the score command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_score(config: ScoreConfig) -> Result<i32> {
    let quiet = config.request.quiet;
    let catalog = load_catalog_with_context(&config.catalog_path, quiet)?;
    let (answers, metadata) = load_answers(&config.source)?;

    let engine = ProgressionEngine::new(config.thresholds);
    let report = engine.score(&catalog, &answers);
    if !quiet {
        tracing::info!(
            "Achieved {}; {} gap(s), {} evidence risk(s)",
            report.level.explanation,
            report.gaps.len(),
            report.risks.len()
        );
    }

    output_report(&config.request, &report, &catalog, &metadata)?;

    Ok(gate_exit_code(
        &report,
        config.min_level,
        config.fail_if_not_eligible,
    ))
}

fn load_answers(source: &AssessmentSource) -> Result<(Vec<Answer>, ReportMetadata)> {
    match source {
        AssessmentSource::File(path) => {
            let draft = load_assessment_draft(path)?;
            let metadata = ReportMetadata {
                organization: Some(draft.organization),
                reviewer: Some(draft.reviewer_name),
                assessed_at: Some(draft.timestamp),
                generated_at: Some(Utc::now()),
            };
            Ok((draft.answers, metadata))
        }
        AssessmentSource::Store { path, organization } => {
            load_latest_from_store(path, organization)
        }
    }
}

fn load_latest_from_store(
    path: &Path,
    organization: &str,
) -> Result<(Vec<Answer>, ReportMetadata)> {
    let store = open_store(path)?;
    let org = store
        .organization_by_name(organization)?
        .with_context(|| format!("Organization '{organization}' not found"))?;
    let assessment = store
        .latest_assessment(org.id)?
        .ok_or_else(|| PipelineError::NoAssessment {
            organization: org.name.clone(),
        })?;

    tracing::debug!(assessment = %assessment.id, "scoring latest assessment");
    let metadata = ReportMetadata {
        organization: Some(org.name),
        reviewer: Some(assessment.reviewer_name),
        assessed_at: Some(assessment.timestamp),
        generated_at: Some(Utc::now()),
    };
    Ok((assessment.answers, metadata))
}

/// Exit code for the requested CI gates
#[must_use]
pub fn gate_exit_code(
    report: &ProgressionReport,
    min_level: Option<TmmiLevel>,
    fail_if_not_eligible: bool,
) -> i32 {
    if let Some(min) = min_level {
        if report.achieved_level < min {
            tracing::warn!(
                "Achieved {} is below the required {}",
                report.level.explanation,
                min.label()
            );
            return exit_codes::GATE_FAILED;
        }
    }
    if fail_if_not_eligible && !report.is_eligible() {
        tracing::warn!(
            "Not eligible for the next level; blocking: {}",
            report.blocking_areas().join(", ")
        );
        return exit_codes::GATE_FAILED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QuestionCatalog;
    use crate::model::{AnswerValue, Importance, Question};

    fn report(value: AnswerValue) -> ProgressionReport {
        let catalog = QuestionCatalog::new(vec![
            Question::new("Q1", TmmiLevel::MANAGED, "Test Policy", "q", Importance::High)
                .with_practice("SG1", "SP1.1"),
            Question::new("Q2", TmmiLevel::DEFINED, "Test Organization", "q", Importance::High)
                .with_practice("SG1", "SP1.1"),
        ])
        .unwrap();
        ProgressionEngine::default().score(&catalog, &[Answer::new("Q1", value)])
    }

    #[test]
    fn test_min_level_gate() {
        let passed = report(AnswerValue::Yes);
        assert_eq!(
            gate_exit_code(&passed, Some(TmmiLevel::MANAGED), false),
            exit_codes::SUCCESS
        );
        let failed = report(AnswerValue::No);
        assert_eq!(
            gate_exit_code(&failed, Some(TmmiLevel::MANAGED), false),
            exit_codes::GATE_FAILED
        );
    }

    #[test]
    fn test_eligibility_gate() {
        // Level 3 area is unanswered, so it blocks
        let report = report(AnswerValue::Yes);
        assert_eq!(gate_exit_code(&report, None, true), exit_codes::GATE_FAILED);
        assert_eq!(gate_exit_code(&report, None, false), exit_codes::SUCCESS);
    }

    #[test]
    fn test_missing_organization_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_latest_from_store(&dir.path().join("ws.json"), "Nobody").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
