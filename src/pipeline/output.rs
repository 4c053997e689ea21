//! Output handling for progression reports.
//!
//! Provides utilities for choosing the output format and writing reports.

use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }

    /// Check if output is to a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Pick the output format.
///
/// An explicit format always wins. Otherwise a file target's extension
/// decides (`.json`, `.csv`, `.md`), falling back to the configured default.
#[must_use]
pub fn detect_format(
    explicit: Option<ReportFormat>,
    configured: ReportFormat,
    target: &OutputTarget,
) -> ReportFormat {
    if let Some(format) = explicit {
        return format;
    }
    if let OutputTarget::File(path) = target {
        let by_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
                "json" => Some(ReportFormat::Json),
                "csv" => Some(ReportFormat::Csv),
                "md" | "markdown" => Some(ReportFormat::Markdown),
                _ => None,
            });
        if let Some(format) = by_extension {
            return format;
        }
    }
    configured
}

/// Determine if color should be used based on flags and environment
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none()
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}
