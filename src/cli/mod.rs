//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod amend;
mod history;
mod import;
mod portfolio;
mod score;
mod validate;

pub use amend::{build_update, run_amend, AmendConfig};
pub use history::{render_history, run_history, HistoryConfig};
pub use import::{import_draft, run_import, ImportConfig};
pub use portfolio::{render_portfolio, run_portfolio, PortfolioConfig, PortfolioRow};
pub use score::{gate_exit_code, run_score, AssessmentSource, ScoreConfig};
pub use validate::{describe_catalog, run_validate, ValidateConfig};

// Re-export config types used by handlers
pub use crate::config::AppConfig;
