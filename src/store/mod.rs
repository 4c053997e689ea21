//! Assessment persistence.
//!
//! The scoring engine never reads or writes storage itself; callers fetch
//! an [`Assessment`] through an [`AssessmentStore`] and hand its answers to
//! the engine. Two stores ship with the crate:
//!
//! - [`InMemoryStore`] for tests and embedding
//! - [`JsonFileStore`], a whole-workspace JSON document written atomically

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::catalog::QuestionCatalog;
use crate::error::Result;
use crate::model::{
    Answer, AnswerValue, Assessment, AssessmentId, NewAssessment, NewOrganization, Organization,
    OrganizationId, OrganizationStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field changes for one stored answer. `None` leaves a field as is; a
/// blank string clears the evidence URL or comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerUpdate {
    pub value: Option<AnswerValue>,
    pub evidence_url: Option<String>,
    pub comment: Option<String>,
}

impl AnswerUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.evidence_url.is_none() && self.comment.is_none()
    }

    /// Apply the changes to an answer row
    pub fn apply(&self, answer: &mut Answer) {
        if let Some(value) = self.value {
            answer.value = value;
        }
        if let Some(url) = &self.evidence_url {
            answer.evidence_url = non_blank(url);
        }
        if let Some(comment) = &self.comment {
            answer.comment = non_blank(comment);
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// One row of an organization's assessment history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub assessment_id: AssessmentId,
    pub timestamp: DateTime<Utc>,
    pub reviewer_name: String,
    pub answered: usize,
    pub yes: usize,
    pub partial: usize,
    pub no: usize,
    /// Earned credit over answered questions, one decimal
    pub compliance: f64,
}

impl HistoryEntry {
    #[must_use]
    pub fn from_assessment(assessment: &Assessment) -> Self {
        let count = |v: AnswerValue| assessment.answers.iter().filter(|a| a.value == v).count();
        let answered = assessment.answers.len();
        let earned: f64 = assessment.answers.iter().map(Answer::attainment).sum();
        let compliance = if answered == 0 {
            0.0
        } else {
            (earned / answered as f64 * 10.0).round() / 10.0
        };
        Self {
            assessment_id: assessment.id,
            timestamp: assessment.timestamp,
            reviewer_name: assessment.reviewer_name.clone(),
            answered,
            yes: count(AnswerValue::Yes),
            partial: count(AnswerValue::Partial),
            no: count(AnswerValue::No),
            compliance,
        }
    }
}

/// Storage for organizations and their assessment snapshots.
///
/// Assessments are append-only: reassessing creates a new snapshot. Only
/// individual answer rows may be amended afterwards.
pub trait AssessmentStore {
    /// All organizations, ordered by id
    fn organizations(&self) -> Result<Vec<Organization>>;

    fn organization(&self, id: OrganizationId) -> Result<Option<Organization>>;

    /// Look an organization up by name, ignoring case
    fn organization_by_name(&self, name: &str) -> Result<Option<Organization>>;

    /// Register an organization; names must be unique ignoring case
    fn add_organization(&mut self, organization: NewOrganization) -> Result<Organization>;

    fn set_organization_status(
        &mut self,
        id: OrganizationId,
        status: OrganizationStatus,
    ) -> Result<()>;

    /// The assessment with the latest timestamp; ties go to the higher id
    fn latest_assessment(&self, organization: OrganizationId) -> Result<Option<Assessment>>;

    /// Every assessment of an organization, oldest first
    fn assessments_for(&self, organization: OrganizationId) -> Result<Vec<Assessment>>;

    fn assessment(&self, id: AssessmentId) -> Result<Option<Assessment>>;

    /// Answers recorded for an assessment
    fn answers_for(&self, id: AssessmentId) -> Result<Vec<Answer>>;

    /// Store a new snapshot. When a catalog is supplied the answers are
    /// checked against it first.
    fn insert_assessment(
        &mut self,
        assessment: NewAssessment,
        catalog: Option<&QuestionCatalog>,
    ) -> Result<AssessmentId>;

    /// Amend one answer row in place, returning the updated row
    fn update_answer(
        &mut self,
        id: AssessmentId,
        question_id: &str,
        update: AnswerUpdate,
    ) -> Result<Answer>;

    /// Per-assessment tallies for an organization, oldest first
    fn history(&self, organization: OrganizationId) -> Result<Vec<HistoryEntry>> {
        Ok(self
            .assessments_for(organization)?
            .iter()
            .map(HistoryEntry::from_assessment)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_applies_and_clears() {
        let mut answer = Answer::new("Q1", AnswerValue::No)
            .with_evidence("https://old")
            .with_comment("pending");
        AnswerUpdate {
            value: Some(AnswerValue::Yes),
            evidence_url: Some("  ".to_string()),
            comment: None,
        }
        .apply(&mut answer);
        assert_eq!(answer.value, AnswerValue::Yes);
        assert_eq!(answer.evidence_url, None);
        assert_eq!(answer.comment.as_deref(), Some("pending"));
        assert!(AnswerUpdate::default().is_empty());
    }

    #[test]
    fn test_history_entry_counts() {
        let assessment = Assessment {
            id: AssessmentId(1),
            organization_id: OrganizationId(1),
            timestamp: Utc::now(),
            reviewer_name: "John Smith".to_string(),
            answers: vec![
                Answer::new("Q1", AnswerValue::Yes),
                Answer::new("Q2", AnswerValue::Partial),
                Answer::new("Q3", AnswerValue::No),
            ],
        };
        let entry = HistoryEntry::from_assessment(&assessment);
        assert_eq!((entry.yes, entry.partial, entry.no), (1, 1, 1));
        assert_eq!(entry.compliance, 50.0);
    }
}
