//! Validate command handler.
//!
//! Implements the `validate` subcommand: checks that a question catalog
//! loads cleanly and, optionally, that an assessment file only answers
//! catalog questions, each at most once.

use crate::catalog::{CatalogSummary, QuestionCatalog};
use crate::pipeline::{exit_codes, load_assessment_draft, load_catalog_with_context};
use anyhow::Result;
use std::path::PathBuf;

/// Validate command configuration
#[derive(Debug, Clone)]
pub struct ValidateConfig {
    pub catalog_path: PathBuf,
    pub assessment_path: Option<PathBuf>,
    pub quiet: bool,
}

/// Run the validate command, returning the desired exit code.
///
/// Catalog load failures are reported and mapped to the validation exit
/// code rather than propagated.
pub fn run_validate(config: ValidateConfig) -> Result<i32> {
    let catalog = match load_catalog_with_context(&config.catalog_path, config.quiet) {
        Ok(catalog) => catalog,
        Err(e) => {
            println!("✗ Catalog {} is invalid", config.catalog_path.display());
            println!("  {e:#}");
            return Ok(exit_codes::VALIDATION_FAILED);
        }
    };

    println!("✓ Catalog {}", config.catalog_path.display());
    print!("{}", describe_catalog(&catalog.summary()));

    let Some(path) = &config.assessment_path else {
        return Ok(exit_codes::SUCCESS);
    };

    let draft = load_assessment_draft(path)?;
    let problems = assessment_problems(&catalog, &draft.answers);
    if problems.is_empty() {
        println!(
            "✓ Assessment {} ({} answers for {})",
            path.display(),
            draft.answers.len(),
            draft.organization
        );
        Ok(exit_codes::SUCCESS)
    } else {
        println!(
            "✗ Assessment {} has {} problem(s)",
            path.display(),
            problems.len()
        );
        for problem in &problems {
            println!("  - {problem}");
        }
        Ok(exit_codes::VALIDATION_FAILED)
    }
}

/// Human-readable catalog overview
#[must_use]
pub fn describe_catalog(summary: &CatalogSummary) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {} questions: {} practice-mapped, {} generic-goal only, {} unmapped",
        summary.total_questions, summary.practice_mapped, summary.generic_only, summary.unmapped
    );
    for (level, count) in &summary.questions_per_level {
        let _ = writeln!(out, "  {}: {count} questions", level.label());
    }
    let _ = writeln!(
        out,
        "  {} process areas, {} generic goals",
        summary.process_areas, summary.generic_goals
    );
    if summary.unmapped > 0 {
        let _ = writeln!(
            out,
            "  note: unmapped questions only appear in gap listings"
        );
    }
    out
}

fn assessment_problems(catalog: &QuestionCatalog, answers: &[crate::model::Answer]) -> Vec<String> {
    catalog
        .check_answers(answers)
        .iter()
        .map(ToString::to_string)
        .collect()
}
