//! JSON workspace file store.

use super::{AnswerUpdate, AssessmentStore, InMemoryStore};
use crate::catalog::QuestionCatalog;
use crate::error::{ErrorContext, Result, StoreErrorKind, TrackerError};
use crate::model::{
    Answer, Assessment, AssessmentId, NewAssessment, NewOrganization, Organization,
    OrganizationId, OrganizationStatus,
};
use std::fs;
use std::path::{Path, PathBuf};

/// A store persisted as one JSON document.
///
/// The whole workspace is loaded on open and rewritten after every change
/// through a temporary file and a rename, so readers never observe a
/// half-written file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: InMemoryStore,
}

impl JsonFileStore {
    /// Open a workspace, starting empty when the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let inner = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| TrackerError::io(&path, e))?;
            let inner: InMemoryStore = serde_json::from_str(&content).map_err(|e| {
                TrackerError::store(
                    format!("reading workspace {}", path.display()),
                    StoreErrorKind::CorruptWorkspace(e.to_string()),
                )
            })?;
            inner
                .check_integrity()
                .with_context(|| format!("opening workspace {}", path.display()))?;
            inner
        } else {
            tracing::debug!(path = %path.display(), "starting new workspace");
            InMemoryStore::new()
        };
        Ok(Self { path, inner })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply a change to a copy of the workspace and keep it only once saved
    fn commit<T>(&mut self, change: impl FnOnce(&mut InMemoryStore) -> Result<T>) -> Result<T> {
        let mut staged = self.inner.clone();
        let value = change(&mut staged)?;
        Self::save(&self.path, &staged)?;
        self.inner = staged;
        Ok(value)
    }

    fn save(path: &Path, workspace: &InMemoryStore) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| TrackerError::io(parent, e))?;
            }
        }
        let content = serde_json::to_string_pretty(workspace).map_err(|e| {
            TrackerError::store(
                "serializing workspace",
                StoreErrorKind::CorruptWorkspace(e.to_string()),
            )
        })?;
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(|e| TrackerError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| TrackerError::io(path, e))?;
        tracing::debug!(path = %path.display(), "saved workspace");
        Ok(())
    }
}

impl AssessmentStore for JsonFileStore {
    fn organizations(&self) -> Result<Vec<Organization>> {
        self.inner.organizations()
    }

    fn organization(&self, id: OrganizationId) -> Result<Option<Organization>> {
        self.inner.organization(id)
    }

    fn organization_by_name(&self, name: &str) -> Result<Option<Organization>> {
        self.inner.organization_by_name(name)
    }

    fn add_organization(&mut self, organization: NewOrganization) -> Result<Organization> {
        self.commit(|inner| inner.add_organization(organization))
    }

    fn set_organization_status(
        &mut self,
        id: OrganizationId,
        status: OrganizationStatus,
    ) -> Result<()> {
        self.commit(|inner| inner.set_organization_status(id, status))
    }

    fn latest_assessment(&self, organization: OrganizationId) -> Result<Option<Assessment>> {
        self.inner.latest_assessment(organization)
    }

    fn assessments_for(&self, organization: OrganizationId) -> Result<Vec<Assessment>> {
        self.inner.assessments_for(organization)
    }

    fn assessment(&self, id: AssessmentId) -> Result<Option<Assessment>> {
        self.inner.assessment(id)
    }

    fn answers_for(&self, id: AssessmentId) -> Result<Vec<Answer>> {
        self.inner.answers_for(id)
    }

    fn insert_assessment(
        &mut self,
        assessment: NewAssessment,
        catalog: Option<&QuestionCatalog>,
    ) -> Result<AssessmentId> {
        self.commit(|inner| inner.insert_assessment(assessment, catalog))
    }

    fn update_answer(
        &mut self,
        id: AssessmentId,
        question_id: &str,
        update: AnswerUpdate,
    ) -> Result<Answer> {
        self.commit(|inner| inner.update_answer(id, question_id, update))
    }
}
