//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportContext, ReportError, ReportFormat, ReportGenerator};
use crate::scoring::{AchievementBand, ProgressionReport, ReadinessResult};
use unicode_width::UnicodeWidthStr;

/// Widest process-area column before names are truncated
const AREA_COLUMN_WIDTH: usize = 36;

/// How many gaps the summary lists before eliding the rest
const MAX_LISTED_GAPS: usize = 10;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn band_color(band: AchievementBand) -> &'static str {
    match band {
        AchievementBand::F => "green",
        AchievementBand::L => "cyan",
        AchievementBand::P => "yellow",
        AchievementBand::N => "red",
    }
}

/// Pad or truncate to a display width, counting wide characters correctly
fn fit_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current <= width {
        return format!("{text}{}", " ".repeat(width - current));
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    format!("{out}{}", " ".repeat(width.saturating_sub(used)))
}

/// Summary reporter for shell output
#[derive(Debug, Clone, Copy)]
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(
        &self,
        report: &ProgressionReport,
        context: &ReportContext<'_>,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let meta = context.metadata;

        lines.push(self.color("TMMi Progression Summary", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        if let Some(org) = &meta.organization {
            lines.push(format!("{}  {org}", self.color("Organization:", "cyan")));
        }
        if let Some(reviewer) = &meta.reviewer {
            lines.push(format!("{}  {reviewer}", self.color("Reviewer:", "cyan")));
        }
        if let Some(at) = meta.assessed_at {
            lines.push(format!(
                "{}  {}",
                self.color("Assessed:", "cyan"),
                at.format("%Y-%m-%d %H:%M")
            ));
        }
        let tally = &report.tally;
        lines.push(format!(
            "{}  {}/{} answered ({:.1}%), {} yes, {} partial, {} no",
            self.color("Answers:", "cyan"),
            tally.answered,
            tally.total_questions,
            tally.completion,
            tally.yes,
            tally.partial,
            tally.no
        ));
        if report.ignored_answers > 0 {
            lines.push(format!(
                "  {}",
                self.color(
                    &format!("{} answer(s) ignored", report.ignored_answers),
                    "yellow"
                )
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "{} {}",
            self.color("Achieved:", "bold"),
            self.color(&report.level.explanation, "green")
        ));
        if let Some(limit) = &report.level.limited_by {
            lines.push(format!("  {}", self.color(limit, "dim")));
        }

        match &report.readiness {
            ReadinessResult::NotApplicable { reason, .. } => {
                lines.push(format!("{} {reason}", self.color("Next level:", "bold")));
            }
            ReadinessResult::Target {
                target_level,
                readiness,
                eligible,
                blocking,
                ..
            } => {
                let verdict = if *eligible {
                    self.color("eligible", "green")
                } else {
                    self.color("not eligible", "red")
                };
                lines.push(format!(
                    "{} {} at {readiness:.1}% ({verdict})",
                    self.color("Readiness:", "bold"),
                    target_level.label()
                ));
                for area in blocking {
                    lines.push(format!("  {} {area}", self.color("✗", "red")));
                }
            }
        }
        lines.push(format!(
            "{} {:.1}%",
            self.color("Evidence:", "bold"),
            report.evidence_coverage
        ));

        if !report.level_tallies.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Compliance by level:", "bold"));
            for entry in &report.level_tallies {
                let t = &entry.tally;
                lines.push(format!(
                    "  L{} {:>3}/{:<3} answered  {:>6.1}%  ({} yes, {} partial, {} no)",
                    entry.level,
                    t.answered,
                    t.total_questions,
                    t.overall_compliance,
                    t.yes,
                    t.partial,
                    t.no
                ));
            }
        }

        if !report.process_areas.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Process Areas:", "bold"));
            for area in &report.process_areas {
                lines.push(format!(
                    "  L{} {} {:>6.1}%  {}",
                    area.level,
                    fit_width(&area.process_area, AREA_COLUMN_WIDTH),
                    area.attainment,
                    self.color(area.band.letter(), band_color(area.band))
                ));
            }
        }

        if !report.gaps.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "{} {}",
                self.color("Gaps:", "bold"),
                report.gaps.len()
            ));
            let gaps = report.sorted_gaps();
            for gap in gaps.iter().take(MAX_LISTED_GAPS) {
                lines.push(format!(
                    "  [{}] {} {}: {}",
                    gap.priority,
                    gap.question_id,
                    gap.answer,
                    gap.recommended_action
                ));
            }
            if gaps.len() > MAX_LISTED_GAPS {
                lines.push(self.color(
                    &format!("  … and {} more", gaps.len() - MAX_LISTED_GAPS),
                    "dim",
                ));
            }
        }

        if !report.risks.is_empty() {
            lines.push(String::new());
            lines.push(self.color("Evidence risks:", "bold"));
            for risk in &report.risks {
                lines.push(format!(
                    "  {} {} rated {} with {:.1}% evidence",
                    self.color("!", "yellow"),
                    risk.subject,
                    risk.band,
                    risk.evidence_coverage
                ));
            }
        }

        lines.push(String::new());
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
