//! Organizations and assessment snapshots.

use super::Answer;
use crate::catalog::QuestionCatalog;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned organization identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(pub u64);

impl std::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned assessment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub u64);

impl std::fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an organization is still being assessed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganizationStatus {
    #[default]
    Active,
    Inactive,
}

/// An assessed organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub status: OrganizationStatus,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    /// Case-insensitive name comparison, matching how stores look names up
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

/// Data for a new organization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewOrganization {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One assessment snapshot for one organization.
///
/// Immutable once created: a reassessment is a new `Assessment`. Individual
/// answer rows may still be amended through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub organization_id: OrganizationId,
    pub timestamp: DateTime<Utc>,
    pub reviewer_name: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Assessment {
    /// Look up the answer for a question
    #[must_use]
    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    /// Reject answers to unknown questions and questions answered twice
    pub fn validate_against(&self, catalog: &QuestionCatalog) -> Result<()> {
        catalog.validate_answers(&self.answers)
    }
}

/// Data for a new assessment, before the store assigns an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssessment {
    pub organization_id: OrganizationId,
    pub timestamp: DateTime<Utc>,
    pub reviewer_name: String,
    pub answers: Vec<Answer>,
}

/// Assessment file as exchanged with reviewers: names the organization
/// instead of referencing a store id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDraft {
    pub organization: String,
    pub reviewer_name: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerValue;

    #[test]
    fn test_organization_name_matching() {
        let org = Organization {
            id: OrganizationId(1),
            name: "Sample Test Organization".to_string(),
            contact_person: None,
            email: None,
            status: OrganizationStatus::Active,
            created_at: Utc::now(),
        };
        assert!(org.name_matches("sample test organization "));
        assert!(!org.name_matches("Sample"));
    }

    #[test]
    fn test_draft_defaults() {
        let json = r#"{
            "organization": "Acme",
            "reviewer_name": "Sarah Johnson",
            "answers": [{"question_id": "L2_TP_001", "answer": "Yes"}]
        }"#;
        let draft: AssessmentDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.answers.len(), 1);
        assert_eq!(draft.answers[0].value, AnswerValue::Yes);
    }

    #[test]
    fn test_answer_lookup() {
        let assessment = Assessment {
            id: AssessmentId(3),
            organization_id: OrganizationId(1),
            timestamp: Utc::now(),
            reviewer_name: "r".to_string(),
            answers: vec![Answer::new("Q1", AnswerValue::No)],
        };
        assert!(assessment.answer_for("Q1").is_some());
        assert!(assessment.answer_for("Q2").is_none());
    }
}
