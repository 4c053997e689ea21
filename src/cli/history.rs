//! History command handler.
//!
//! Implements the `history` subcommand: one tally row per stored assessment
//! of an organization, oldest first.

use crate::pipeline::{exit_codes, open_store, write_output, OutputTarget};
use crate::reports::escape::{escape_csv_field, escape_markdown_table};
use crate::reports::ReportFormat;
use crate::store::{AssessmentStore, HistoryEntry};
use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::PathBuf;

/// History command configuration
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    pub store_path: PathBuf,
    pub organization: String,
    pub format: ReportFormat,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
}

/// Run the history command
pub fn run_history(config: HistoryConfig) -> Result<i32> {
    let store = open_store(&config.store_path)?;
    let org = store
        .organization_by_name(&config.organization)?
        .with_context(|| format!("Organization '{}' not found", config.organization))?;
    let entries = store.history(org.id)?;

    let rendered = render_history(&org.name, &entries, config.format)?;
    write_output(
        &rendered,
        &OutputTarget::from_option(config.output_file),
        config.quiet,
    )?;
    Ok(exit_codes::SUCCESS)
}

/// Render history rows in the requested format
pub fn render_history(
    organization: &str,
    entries: &[HistoryEntry],
    format: ReportFormat,
) -> Result<String> {
    let mut out = String::new();
    match format {
        ReportFormat::Json => {
            return serde_json::to_string_pretty(entries).context("Failed to serialize history");
        }
        ReportFormat::Csv => {
            writeln!(out, "Assessment,Date,Reviewer,Answered,Yes,Partial,No,Compliance")?;
            for e in entries {
                writeln!(
                    out,
                    "{},{},{},{},{},{},{},{:.1}",
                    e.assessment_id,
                    e.timestamp.format("%Y-%m-%d %H:%M"),
                    escape_csv_field(&e.reviewer_name),
                    e.answered,
                    e.yes,
                    e.partial,
                    e.no,
                    e.compliance
                )?;
            }
        }
        ReportFormat::Markdown => {
            writeln!(out, "# Assessment History: {}\n", escape_markdown_table(organization))?;
            writeln!(out, "| # | Date | Reviewer | Answered | Yes | Partial | No | Compliance |")?;
            writeln!(out, "|---|------|----------|----------|-----|---------|----|------------|")?;
            for e in entries {
                writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} | {} | {:.1}% |",
                    e.assessment_id,
                    e.timestamp.format("%Y-%m-%d"),
                    escape_markdown_table(&e.reviewer_name),
                    e.answered,
                    e.yes,
                    e.partial,
                    e.no,
                    e.compliance
                )?;
            }
        }
        ReportFormat::Summary => {
            writeln!(out, "Assessment history for {organization}")?;
            writeln!(
                out,
                "{:>5} {:<16} {:<20} {:>8} {:>4} {:>7} {:>4} {:>10}",
                "#", "DATE", "REVIEWER", "ANSWERED", "YES", "PARTIAL", "NO", "COMPLIANCE"
            )?;
            let mut previous: Option<f64> = None;
            for e in entries {
                let trend = match previous {
                    Some(p) if e.compliance > p => "▲",
                    Some(p) if e.compliance < p => "▼",
                    Some(_) => "=",
                    None => " ",
                };
                previous = Some(e.compliance);
                writeln!(
                    out,
                    "{:>5} {:<16} {:<20} {:>8} {:>4} {:>7} {:>4} {:>9.1}% {trend}",
                    e.assessment_id.to_string(),
                    e.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                    e.reviewer_name,
                    e.answered,
                    e.yes,
                    e.partial,
                    e.no,
                    e.compliance
                )?;
            }
            if entries.is_empty() {
                writeln!(out, "(no assessments)")?;
            }
        }
    }
    Ok(out)
}
