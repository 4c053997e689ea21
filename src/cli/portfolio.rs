//! Portfolio command handler.
//!
//! Implements the `portfolio` subcommand: score the latest assessment of
//! every organization in a workspace, in parallel, and tabulate the results.

use crate::model::{Assessment, Organization, OrganizationStatus};
use crate::pipeline::{exit_codes, load_catalog_with_context, open_store, write_output, OutputTarget};
use crate::reports::escape::{escape_csv_field, escape_markdown_table};
use crate::reports::ReportFormat;
use crate::scoring::{ProgressionEngine, ScoringThresholds};
use crate::store::AssessmentStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

/// Portfolio command configuration
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    pub catalog_path: PathBuf,
    pub store_path: PathBuf,
    pub thresholds: ScoringThresholds,
    pub format: ReportFormat,
    pub output_file: Option<PathBuf>,
    /// Include organizations marked inactive
    pub include_inactive: bool,
    pub quiet: bool,
}

/// One organization's standing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioRow {
    pub organization: String,
    pub assessed_at: DateTime<Utc>,
    pub reviewer: String,
    pub achieved_level: u8,
    pub target_level: Option<u8>,
    pub readiness: Option<f64>,
    pub eligible: bool,
    pub gaps: usize,
    pub risks: usize,
    pub completion: f64,
}

/// Run the portfolio command
pub fn run_portfolio(config: PortfolioConfig) -> Result<i32> {
    let catalog = load_catalog_with_context(&config.catalog_path, config.quiet)?;
    let store = open_store(&config.store_path)?;

    let mut organizations: Vec<Organization> = Vec::new();
    let mut assessments: Vec<Assessment> = Vec::new();
    for org in store.organizations()? {
        if org.status == OrganizationStatus::Inactive && !config.include_inactive {
            continue;
        }
        match store
            .latest_assessment(org.id)
            .with_context(|| format!("Failed to read assessments of {}", org.name))?
        {
            Some(assessment) => {
                organizations.push(org);
                assessments.push(assessment);
            }
            None => tracing::debug!(organization = %org.name, "no assessment yet"),
        }
    }

    if !config.quiet {
        tracing::info!("Scoring {} organization(s)", assessments.len());
    }
    let engine = ProgressionEngine::new(config.thresholds);
    let reports = engine.score_many(&catalog, &assessments);

    let rows: Vec<PortfolioRow> = organizations
        .into_iter()
        .zip(assessments)
        .zip(reports)
        .map(|((org, assessment), report)| PortfolioRow {
            organization: org.name,
            assessed_at: assessment.timestamp,
            reviewer: assessment.reviewer_name,
            achieved_level: report.achieved_level.value(),
            target_level: report.target_level().map(|l| l.value()),
            readiness: report.readiness.readiness(),
            eligible: report.is_eligible(),
            gaps: report.gaps.len(),
            risks: report.risks.len(),
            completion: report.tally.completion,
        })
        .collect();

    let rendered = render_portfolio(&rows, config.format)?;
    write_output(
        &rendered,
        &OutputTarget::from_option(config.output_file),
        config.quiet,
    )?;
    Ok(exit_codes::SUCCESS)
}

/// Render portfolio rows in the requested format
pub fn render_portfolio(rows: &[PortfolioRow], format: ReportFormat) -> Result<String> {
    let mut out = String::new();
    let readiness = |r: &PortfolioRow| r.readiness.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"));
    let target = |r: &PortfolioRow| r.target_level.map_or_else(|| "-".to_string(), |l| l.to_string());

    match format {
        ReportFormat::Json => {
            out = serde_json::to_string_pretty(rows).context("Failed to serialize portfolio")?;
        }
        ReportFormat::Csv => {
            writeln!(
                out,
                "Organization,Assessed,Reviewer,Level,Target,Readiness,Eligible,Gaps,Risks,Completion"
            )?;
            for r in rows {
                writeln!(
                    out,
                    "{},{},{},{},{},{},{},{},{},{:.1}",
                    escape_csv_field(&r.organization),
                    r.assessed_at.format("%Y-%m-%d"),
                    escape_csv_field(&r.reviewer),
                    r.achieved_level,
                    target(r),
                    readiness(r),
                    r.eligible,
                    r.gaps,
                    r.risks,
                    r.completion
                )?;
            }
        }
        ReportFormat::Markdown => {
            writeln!(out, "# TMMi Portfolio\n")?;
            writeln!(
                out,
                "| Organization | Assessed | Level | Target | Readiness | Eligible | Gaps | Risks |"
            )?;
            writeln!(
                out,
                "|--------------|----------|-------|--------|-----------|----------|------|-------|"
            )?;
            for r in rows {
                writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} | {} | {} |",
                    escape_markdown_table(&r.organization),
                    r.assessed_at.format("%Y-%m-%d"),
                    r.achieved_level,
                    target(r),
                    readiness(r),
                    if r.eligible { "yes" } else { "no" },
                    r.gaps,
                    r.risks
                )?;
            }
        }
        ReportFormat::Summary => {
            writeln!(
                out,
                "{:<30} {:<10} {:>5} {:>6} {:>9} {:>8} {:>5}",
                "ORGANIZATION", "ASSESSED", "LEVEL", "TARGET", "READINESS", "ELIGIBLE", "GAPS"
            )?;
            writeln!(out, "{}", "─".repeat(79))?;
            for r in rows {
                writeln!(
                    out,
                    "{:<30} {:<10} {:>5} {:>6} {:>9} {:>8} {:>5}",
                    truncate(&r.organization, 30),
                    r.assessed_at.format("%Y-%m-%d"),
                    r.achieved_level,
                    target(r),
                    readiness(r),
                    if r.eligible { "yes" } else { "no" },
                    r.gaps
                )?;
            }
            if rows.is_empty() {
                writeln!(out, "(no assessed organizations)")?;
            }
        }
    }
    Ok(out)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, eligible: bool) -> PortfolioRow {
        PortfolioRow {
            organization: name.to_string(),
            assessed_at: Utc::now(),
            reviewer: "Sam".to_string(),
            achieved_level: 2,
            target_level: Some(3),
            readiness: Some(62.5),
            eligible,
            gaps: 4,
            risks: 1,
            completion: 80.0,
        }
    }

    #[test]
    fn test_csv_portfolio_quotes_names() {
        let out = render_portfolio(&[row("Acme, Inc", false)], ReportFormat::Csv).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("\"Acme, Inc\","));
        assert!(lines[1].contains(",2,3,62.5,false,4,1,80.0"));
    }

    #[test]
    fn test_summary_table() {
        let out = render_portfolio(&[row("Acme", true)], ReportFormat::Summary).unwrap();
        assert!(out.contains("ORGANIZATION"));
        assert!(out.contains("62.5"));
        assert!(out.contains("yes"));
        let empty = render_portfolio(&[], ReportFormat::Summary).unwrap();
        assert!(empty.contains("no assessed organizations"));
    }

    #[test]
    fn test_json_portfolio() {
        let out = render_portfolio(&[row("Acme", true)], ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["target_level"], 3);
    }
}
