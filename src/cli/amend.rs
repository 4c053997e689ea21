//! Amend command handler.
//!
//! Implements the `amend` subcommand: change one answer row of a stored
//! assessment without creating a new snapshot.

use crate::model::{AnswerValue, AssessmentId};
use crate::pipeline::{exit_codes, open_store};
use crate::store::{AnswerUpdate, AssessmentStore};
use anyhow::{bail, Result};
use std::path::PathBuf;

/// Amend command configuration
#[derive(Debug, Clone)]
pub struct AmendConfig {
    pub store_path: PathBuf,
    pub assessment_id: u64,
    pub question_id: String,
    /// Raw answer value; parsed case-insensitively
    pub answer: Option<String>,
    /// Blank clears the stored URL
    pub evidence_url: Option<String>,
    /// Blank clears the stored comment
    pub comment: Option<String>,
    pub quiet: bool,
}

/// Build the answer update, rejecting unknown answer values
pub fn build_update(config: &AmendConfig) -> Result<AnswerUpdate> {
    let value = config
        .answer
        .as_deref()
        .map(str::parse::<AnswerValue>)
        .transpose()?;
    let update = AnswerUpdate {
        value,
        evidence_url: config.evidence_url.clone(),
        comment: config.comment.clone(),
    };
    if update.is_empty() {
        bail!("Nothing to amend: pass --answer, --evidence, or --comment");
    }
    Ok(update)
}

/// Run the amend command
pub fn run_amend(config: AmendConfig) -> Result<i32> {
    let update = build_update(&config)?;
    let mut store = open_store(&config.store_path)?;
    let answer = store.update_answer(
        AssessmentId(config.assessment_id),
        &config.question_id,
        update,
    )?;

    if !config.quiet {
        tracing::info!(
            "Amended {} in assessment {}",
            answer.question_id,
            config.assessment_id
        );
    }
    println!(
        "{}: {}{}{}",
        answer.question_id,
        answer.value,
        answer
            .evidence_url
            .as_deref()
            .map(|u| format!(" (evidence: {u})"))
            .unwrap_or_default(),
        answer
            .comment
            .as_deref()
            .map(|c| format!(" - {c}"))
            .unwrap_or_default()
    );
    Ok(exit_codes::SUCCESS)
}
