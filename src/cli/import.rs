//! Import command handler.
//!
//! Implements the `import` subcommand: store an assessment file as a new
//! snapshot in the workspace, registering the organization when needed.

use crate::model::{AssessmentDraft, AssessmentId, NewAssessment, NewOrganization};
use crate::pipeline::{exit_codes, load_assessment_draft, load_catalog_with_context, open_store};
use crate::store::AssessmentStore;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Import command configuration
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub store_path: PathBuf,
    pub assessment_path: PathBuf,
    /// Overrides the organization named in the assessment file
    pub organization: Option<String>,
    /// Validate answers against this catalog before storing
    pub catalog_path: Option<PathBuf>,
    pub quiet: bool,
}

/// Run the import command
pub fn run_import(config: ImportConfig) -> Result<i32> {
    let draft = load_assessment_draft(&config.assessment_path)?;
    let catalog = config
        .catalog_path
        .as_deref()
        .map(|path| load_catalog_with_context(path, config.quiet))
        .transpose()?;

    let mut store = open_store(&config.store_path)?;
    let organization = config
        .organization
        .clone()
        .unwrap_or_else(|| draft.organization.clone());
    let id = import_draft(&mut store, &organization, draft, catalog.as_ref())?;

    if !config.quiet {
        tracing::info!(
            "Imported assessment {id} for {organization} into {}",
            config.store_path.display()
        );
    }
    println!("{id}");
    Ok(exit_codes::SUCCESS)
}

/// Insert a draft for the named organization, creating it when absent
pub fn import_draft<S: AssessmentStore>(
    store: &mut S,
    organization: &str,
    draft: AssessmentDraft,
    catalog: Option<&crate::catalog::QuestionCatalog>,
) -> Result<AssessmentId> {
    if let Some(catalog) = catalog {
        catalog
            .validate_answers(&draft.answers)
            .with_context(|| format!("Rejected assessment for {organization}"))?;
    }

    let org = match store.organization_by_name(organization)? {
        Some(org) => org,
        None => {
            tracing::info!("Registering new organization '{organization}'");
            store.add_organization(NewOrganization::named(organization.trim()))?
        }
    };

    let id = store
        .insert_assessment(
            NewAssessment {
                organization_id: org.id,
                timestamp: draft.timestamp,
                reviewer_name: draft.reviewer_name,
                answers: draft.answers,
            },
            catalog,
        )
        .with_context(|| format!("Failed to store assessment for {}", org.name))?;
    Ok(id)
}
