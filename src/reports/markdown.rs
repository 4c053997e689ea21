//! Markdown report generator.

use super::escape::{escape_markdown_inline, escape_markdown_table, escape_md_opt};
use super::{ReportContext, ReportError, ReportFormat, ReportGenerator};
use crate::model::TmmiLevel;
use crate::scoring::{Gap, ProgressionReport, ReadinessResult};
use std::fmt::Write;

/// Markdown report generator
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn write_header(
        md: &mut String,
        report: &ProgressionReport,
        context: &ReportContext<'_>,
    ) -> std::fmt::Result {
        let meta = context.metadata;
        match &meta.organization {
            Some(org) => writeln!(md, "# TMMi Progression Report: {}\n", escape_markdown_inline(org))?,
            None => writeln!(md, "# TMMi Progression Report\n")?,
        }
        if let Some(reviewer) = &meta.reviewer {
            writeln!(md, "**Reviewer:** {}  ", escape_markdown_inline(reviewer))?;
        }
        if let Some(at) = meta.assessed_at {
            writeln!(md, "**Assessment Date:** {}  ", at.format("%Y-%m-%d %H:%M"))?;
        }
        writeln!(
            md,
            "**Questions Answered:** {} of {}  ",
            report.tally.answered, report.tally.total_questions
        )?;
        writeln!(md, "**Scoring Engine:** v{}\n", report.engine_version)?;
        writeln!(md, "---\n")
    }

    fn write_level(md: &mut String, report: &ProgressionReport) -> std::fmt::Result {
        writeln!(md, "## Maturity Level\n")?;
        writeln!(md, "**Achieved:** {}\n", report.level.explanation)?;
        if let Some(limit) = &report.level.limited_by {
            writeln!(md, "{}\n", escape_markdown_inline(limit))?;
        }

        match &report.readiness {
            ReadinessResult::NotApplicable { reason, .. } => {
                writeln!(md, "**Next level:** not applicable ({reason})\n")?;
            }
            ReadinessResult::Target {
                target_level,
                readiness,
                eligible,
                blocking,
                ..
            } => {
                writeln!(
                    md,
                    "**Readiness for {}:** {readiness:.1}% ({})\n",
                    target_level.label(),
                    if *eligible { "eligible" } else { "not eligible" }
                )?;
                if !blocking.is_empty() {
                    writeln!(md, "Blocking process areas:\n")?;
                    for area in blocking {
                        writeln!(md, "- {}", escape_markdown_inline(area))?;
                    }
                    writeln!(md)?;
                }
            }
        }

        let tally = &report.tally;
        writeln!(md, "| Metric | Value |")?;
        writeln!(md, "|--------|-------|")?;
        writeln!(md, "| Completion | {:.1}% |", tally.completion)?;
        writeln!(md, "| Overall Compliance | {:.1}% |", tally.overall_compliance)?;
        writeln!(md, "| Answered Compliance | {:.1}% |", tally.answered_compliance)?;
        writeln!(md, "| Evidence Coverage | {:.1}% |", report.evidence_coverage)?;
        writeln!(
            md,
            "| Yes / Partial / No | {} / {} / {} |\n",
            tally.yes, tally.partial, tally.no
        )
    }

    fn write_compliance(md: &mut String, report: &ProgressionReport) -> std::fmt::Result {
        if report.level_tallies.is_empty() {
            return Ok(());
        }
        writeln!(md, "## Compliance by Level\n")?;
        writeln!(md, "| Level | Answered | Yes | Partial | No | Compliance |")?;
        writeln!(md, "|-------|----------|-----|---------|----|------------|")?;
        for entry in &report.level_tallies {
            let t = &entry.tally;
            writeln!(
                md,
                "| {} | {}/{} | {} | {} | {} | {:.1}% |",
                entry.level.label(),
                t.answered,
                t.total_questions,
                t.yes,
                t.partial,
                t.no,
                t.overall_compliance
            )?;
        }
        writeln!(md)?;

        writeln!(md, "### By Process Area\n")?;
        writeln!(md, "| Level | Process Area | Answered | Yes | Partial | No | Compliance |")?;
        writeln!(md, "|-------|--------------|----------|-----|---------|----|------------|")?;
        for entry in &report.area_tallies {
            let t = &entry.tally;
            writeln!(
                md,
                "| {} | {} | {}/{} | {} | {} | {} | {:.1}% |",
                entry.level,
                escape_markdown_table(&entry.process_area),
                t.answered,
                t.total_questions,
                t.yes,
                t.partial,
                t.no,
                t.overall_compliance
            )?;
        }
        writeln!(md)
    }

    fn write_process_areas(md: &mut String, report: &ProgressionReport) -> std::fmt::Result {
        writeln!(md, "## Process Areas\n")?;
        if report.process_areas.is_empty() {
            return writeln!(md, "_No process area has been assessed yet._\n");
        }
        writeln!(md, "| Level | Process Area | Attainment | Band | Evidence |")?;
        writeln!(md, "|-------|--------------|------------|------|----------|")?;
        for area in &report.process_areas {
            writeln!(
                md,
                "| {} | {} | {:.1}% | {} | {:.1}% |",
                area.level,
                escape_markdown_table(&area.process_area),
                area.attainment,
                area.band.description(),
                area.evidence_coverage
            )?;
        }
        writeln!(md)
    }

    fn write_generic_goals(md: &mut String, report: &ProgressionReport) -> std::fmt::Result {
        if report.generic_goals.is_empty() {
            return Ok(());
        }
        writeln!(md, "## Generic Goals\n")?;
        writeln!(md, "| Level | Goal | Attainment | Verdict | Answered |")?;
        writeln!(md, "|-------|------|------------|---------|----------|")?;
        for goal in &report.generic_goals {
            let attainment = goal
                .attainment
                .map_or_else(|| "-".to_string(), |a| format!("{a:.1}%"));
            writeln!(
                md,
                "| {} | {} | {} | {} | {}/{} |",
                goal.level,
                escape_markdown_table(&goal.goal_id),
                attainment,
                goal.verdict.as_str(),
                goal.answered,
                goal.questions
            )?;
        }
        writeln!(md)
    }

    fn write_gaps(md: &mut String, report: &ProgressionReport) -> std::fmt::Result {
        writeln!(md, "## Gaps\n")?;
        let gaps = report.sorted_gaps();
        if gaps.is_empty() {
            return writeln!(md, "_No gaps: every answered question is Yes._\n");
        }

        let mut current: Option<TmmiLevel> = None;
        for gap in gaps {
            if current != Some(gap.level) {
                current = Some(gap.level);
                writeln!(md, "### {}\n", gap.level.label())?;
                writeln!(
                    md,
                    "| Priority | Process Area | Practice | Question | Answer | Band | Action |"
                )?;
                writeln!(
                    md,
                    "|----------|--------------|----------|----------|--------|------|--------|"
                )?;
            }
            Self::write_gap_row(md, gap)?;
        }
        writeln!(md)
    }

    fn write_gap_row(md: &mut String, gap: &Gap) -> std::fmt::Result {
        let practice = match (&gap.specific_goal, &gap.specific_practice) {
            (Some(goal), Some(practice)) => format!("{goal} / {practice}"),
            _ => gap.question_id.clone(),
        };
        writeln!(
            md,
            "| {} | {} | {} | {} | {} | {} | {} |",
            gap.priority,
            escape_markdown_table(&gap.process_area),
            escape_markdown_table(&practice),
            escape_markdown_table(&gap.question),
            gap.answer,
            gap.band,
            escape_markdown_table(&gap.recommended_action)
        )
    }

    fn write_risks(md: &mut String, report: &ProgressionReport) -> std::fmt::Result {
        if report.risks.is_empty() {
            return Ok(());
        }
        writeln!(md, "## Evidence Risks\n")?;
        writeln!(
            md,
            "Ratings of L or F backed by less than {:.0}% evidence:\n",
            report.thresholds.evidence_risk_floor
        )?;
        writeln!(md, "| Subject | Band | Attainment | Evidence |")?;
        writeln!(md, "|---------|------|------------|----------|")?;
        for risk in &report.risks {
            writeln!(
                md,
                "| {} | {} | {:.1}% | {:.1}% |",
                escape_markdown_table(&risk.subject.to_string()),
                risk.band,
                risk.attainment,
                risk.evidence_coverage
            )?;
        }
        writeln!(md)
    }

    fn write_responses(
        md: &mut String,
        report: &ProgressionReport,
        context: &ReportContext<'_>,
    ) -> std::fmt::Result {
        writeln!(md, "## Responses\n")?;
        writeln!(md, "| Question | Answer | Evidence | Comment |")?;
        writeln!(md, "|----------|--------|----------|---------|")?;
        for question in context.catalog.iter() {
            let response = report.response_for(&question.id);
            writeln!(
                md,
                "| {} | {} | {} | {} |",
                escape_markdown_table(&question.id),
                response.map_or(super::NOT_ANSWERED, |r| r.answer.as_str()),
                escape_md_opt(response.and_then(|r| r.evidence_url.as_deref())),
                escape_md_opt(response.and_then(|r| r.comment.as_deref()))
            )?;
        }
        writeln!(md)
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(
        &self,
        report: &ProgressionReport,
        context: &ReportContext<'_>,
    ) -> Result<String, ReportError> {
        let mut md = String::new();
        Self::write_header(&mut md, report, context)?;
        Self::write_level(&mut md, report)?;
        Self::write_compliance(&mut md, report)?;
        Self::write_process_areas(&mut md, report)?;
        Self::write_generic_goals(&mut md, report)?;
        Self::write_gaps(&mut md, report)?;
        Self::write_risks(&mut md, report)?;
        Self::write_responses(&mut md, report, context)?;
        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}
