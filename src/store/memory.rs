//! In-memory store.

use super::{AnswerUpdate, AssessmentStore};
use crate::catalog::QuestionCatalog;
use crate::error::{ErrorContext, Result, StoreErrorKind, TrackerError};
use crate::model::{
    Answer, Assessment, AssessmentId, NewAssessment, NewOrganization, Organization,
    OrganizationId, OrganizationStatus,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Store backed by ordered maps; also the on-disk layout of
/// [`JsonFileStore`](super::JsonFileStore)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryStore {
    #[serde(default)]
    organizations: BTreeMap<OrganizationId, Organization>,
    #[serde(default)]
    assessments: BTreeMap<AssessmentId, Assessment>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_organization_id(&self) -> OrganizationId {
        OrganizationId(self.organizations.keys().next_back().map_or(1, |id| id.0 + 1))
    }

    fn next_assessment_id(&self) -> AssessmentId {
        AssessmentId(self.assessments.keys().next_back().map_or(1, |id| id.0 + 1))
    }

    fn require_organization(&self, id: OrganizationId) -> Result<&Organization> {
        self.organizations.get(&id).ok_or_else(|| {
            TrackerError::store(
                "looking up organization",
                StoreErrorKind::OrganizationNotFound(id.to_string()),
            )
        })
    }

    /// Check that every stored assessment references a known organization
    pub(crate) fn check_integrity(&self) -> Result<()> {
        for assessment in self.assessments.values() {
            if !self.organizations.contains_key(&assessment.organization_id) {
                return Err(TrackerError::store(
                    "checking workspace integrity",
                    StoreErrorKind::CorruptWorkspace(format!(
                        "assessment {} references missing organization {}",
                        assessment.id, assessment.organization_id
                    )),
                ));
            }
        }
        Ok(())
    }
}

impl AssessmentStore for InMemoryStore {
    fn organizations(&self) -> Result<Vec<Organization>> {
        Ok(self.organizations.values().cloned().collect())
    }

    fn organization(&self, id: OrganizationId) -> Result<Option<Organization>> {
        Ok(self.organizations.get(&id).cloned())
    }

    fn organization_by_name(&self, name: &str) -> Result<Option<Organization>> {
        Ok(self
            .organizations
            .values()
            .find(|o| o.name_matches(name))
            .cloned())
    }

    fn add_organization(&mut self, organization: NewOrganization) -> Result<Organization> {
        let name = organization.name.trim();
        if name.is_empty() {
            return Err(TrackerError::validation("organization name must not be empty"));
        }
        if self.organizations.values().any(|o| o.name_matches(name)) {
            return Err(TrackerError::store(
                "adding organization",
                StoreErrorKind::DuplicateOrganization(name.to_string()),
            ));
        }

        let created = Organization {
            id: self.next_organization_id(),
            name: name.to_string(),
            contact_person: organization.contact_person,
            email: organization.email,
            status: OrganizationStatus::Active,
            created_at: Utc::now(),
        };
        tracing::debug!(id = %created.id, name = %created.name, "added organization");
        self.organizations.insert(created.id, created.clone());
        Ok(created)
    }

    fn set_organization_status(
        &mut self,
        id: OrganizationId,
        status: OrganizationStatus,
    ) -> Result<()> {
        self.require_organization(id)?;
        if let Some(org) = self.organizations.get_mut(&id) {
            org.status = status;
        }
        Ok(())
    }

    fn latest_assessment(&self, organization: OrganizationId) -> Result<Option<Assessment>> {
        self.require_organization(organization)?;
        Ok(self
            .assessments
            .values()
            .filter(|a| a.organization_id == organization)
            .max_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)))
            .cloned())
    }

    fn assessments_for(&self, organization: OrganizationId) -> Result<Vec<Assessment>> {
        self.require_organization(organization)?;
        let mut found: Vec<Assessment> = self
            .assessments
            .values()
            .filter(|a| a.organization_id == organization)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    fn assessment(&self, id: AssessmentId) -> Result<Option<Assessment>> {
        Ok(self.assessments.get(&id).cloned())
    }

    fn answers_for(&self, id: AssessmentId) -> Result<Vec<Answer>> {
        self.assessments
            .get(&id)
            .map(|a| a.answers.clone())
            .ok_or_else(|| {
                TrackerError::store("reading answers", StoreErrorKind::AssessmentNotFound(id.0))
            })
    }

    fn insert_assessment(
        &mut self,
        assessment: NewAssessment,
        catalog: Option<&QuestionCatalog>,
    ) -> Result<AssessmentId> {
        self.require_organization(assessment.organization_id)?;
        if let Some(catalog) = catalog {
            catalog
                .validate_answers(&assessment.answers)
                .context("validating assessment answers")?;
        }

        let id = self.next_assessment_id();
        tracing::debug!(
            id = %id,
            organization = %assessment.organization_id,
            answers = assessment.answers.len(),
            "inserted assessment"
        );
        self.assessments.insert(
            id,
            Assessment {
                id,
                organization_id: assessment.organization_id,
                timestamp: assessment.timestamp,
                reviewer_name: assessment.reviewer_name,
                answers: assessment.answers,
            },
        );
        Ok(id)
    }

    fn update_answer(
        &mut self,
        id: AssessmentId,
        question_id: &str,
        update: AnswerUpdate,
    ) -> Result<Answer> {
        let assessment = self.assessments.get_mut(&id).ok_or_else(|| {
            TrackerError::store("amending answer", StoreErrorKind::AssessmentNotFound(id.0))
        })?;
        let answer = assessment
            .answers
            .iter_mut()
            .find(|a| a.question_id == question_id)
            .ok_or_else(|| {
                TrackerError::store(
                    "amending answer",
                    StoreErrorKind::AnswerNotFound {
                        assessment_id: id.0,
                        question_id: question_id.to_string(),
                    },
                )
            })?;
        update.apply(answer);
        tracing::debug!(assessment = %id, question = question_id, "amended answer");
        Ok(answer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerValue;
    use chrono::{Duration, TimeZone};

    fn new_assessment(org: OrganizationId, day: u32) -> NewAssessment {
        NewAssessment {
            organization_id: org,
            timestamp: Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap(),
            reviewer_name: "Sarah Johnson".to_string(),
            answers: vec![Answer::new("Q1", AnswerValue::Partial)],
        }
    }

    #[test]
    fn test_organization_names_unique_ignoring_case() {
        let mut store = InMemoryStore::new();
        let org = store
            .add_organization(NewOrganization::named("Sample Test Organization"))
            .unwrap();
        assert_eq!(org.id, OrganizationId(1));
        assert!(store
            .add_organization(NewOrganization::named("sample test organization"))
            .is_err());
        assert!(store.add_organization(NewOrganization::named("  ")).is_err());
        assert_eq!(
            store
                .organization_by_name("SAMPLE TEST ORGANIZATION")
                .unwrap()
                .map(|o| o.id),
            Some(org.id)
        );
    }

    #[test]
    fn test_latest_assessment_by_timestamp() {
        let mut store = InMemoryStore::new();
        let org = store.add_organization(NewOrganization::named("Acme")).unwrap();
        let later = store.insert_assessment(new_assessment(org.id, 20), None).unwrap();
        let earlier = store.insert_assessment(new_assessment(org.id, 5), None).unwrap();

        let latest = store.latest_assessment(org.id).unwrap().unwrap();
        assert_eq!(latest.id, later);

        let all = store.assessments_for(org.id).unwrap();
        assert_eq!(all.iter().map(|a| a.id).collect::<Vec<_>>(), [earlier, later]);
    }

    #[test]
    fn test_timestamp_tie_goes_to_higher_id() {
        let mut store = InMemoryStore::new();
        let org = store.add_organization(NewOrganization::named("Acme")).unwrap();
        store.insert_assessment(new_assessment(org.id, 1), None).unwrap();
        let second = store.insert_assessment(new_assessment(org.id, 1), None).unwrap();
        assert_eq!(store.latest_assessment(org.id).unwrap().unwrap().id, second);
    }

    #[test]
    fn test_no_assessment_is_none() {
        let mut store = InMemoryStore::new();
        let org = store.add_organization(NewOrganization::named("Acme")).unwrap();
        assert!(store.latest_assessment(org.id).unwrap().is_none());
        assert!(store.latest_assessment(OrganizationId(99)).is_err());
    }

    #[test]
    fn test_update_answer_row() {
        let mut store = InMemoryStore::new();
        let org = store.add_organization(NewOrganization::named("Acme")).unwrap();
        let id = store.insert_assessment(new_assessment(org.id, 1), None).unwrap();

        let updated = store
            .update_answer(
                id,
                "Q1",
                AnswerUpdate {
                    value: Some(AnswerValue::Yes),
                    evidence_url: Some("https://wiki/plan".to_string()),
                    comment: None,
                },
            )
            .unwrap();
        assert_eq!(updated.value, AnswerValue::Yes);
        assert_eq!(store.answers_for(id).unwrap()[0].value, AnswerValue::Yes);

        assert!(store
            .update_answer(id, "Q2", AnswerUpdate::default())
            .is_err());
        assert!(store
            .update_answer(AssessmentId(42), "Q1", AnswerUpdate::default())
            .is_err());
    }

    #[test]
    fn test_history_is_oldest_first() {
        let mut store = InMemoryStore::new();
        let org = store.add_organization(NewOrganization::named("Acme")).unwrap();
        let mut first = new_assessment(org.id, 2);
        first.timestamp -= Duration::days(1);
        store.insert_assessment(new_assessment(org.id, 9), None).unwrap();
        store.insert_assessment(first, None).unwrap();

        let history = store.history(org.id).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].timestamp < history[1].timestamp);
        assert_eq!(history[0].compliance, 50.0);
    }
}
