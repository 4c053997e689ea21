//! tmmi-tracker: TMMi maturity progression scoring tool
//!
//! Scores test-process assessments against a TMMi question catalog.

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::{Path, PathBuf};
use tmmi_tracker::{
    cli,
    config::{self, AppConfig, Validatable, CATALOG_PATH_ENV, STORE_PATH_ENV},
    pipeline::{detect_format, exit_codes, OutputTarget, ReportRequest},
    reports::ReportFormat,
    scoring::{EvidenceCoveragePolicy, ScoringThresholds, ThresholdPreset},
    TmmiLevel, TrackerError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nCatalog Formats:",
        "\n  JSON, YAML",
        "\n\nOutput Formats:",
        "\n  summary, json, csv, markdown",
        "\n\nScoring:",
        "\n  N/P/L/F bands, staged level determination, next-level readiness"
    )
}

#[derive(Parser)]
#[command(name = "tmmi-tracker")]
#[command(version, long_version = build_long_version())]
#[command(about = "TMMi maturity progression scoring tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  A --min-level or --fail-if-not-eligible gate failed
    2  Validation found problems
    3  Error occurred

EXAMPLES:
    # Score an assessment file
    tmmi-tracker score --catalog data/tmmi_questions.json --assessment acme.json

    # Score the latest stored assessment and export CSV
    tmmi-tracker score --store data/tmmi_tracker.json --org Acme -O acme.csv

    # Gate a pipeline on reaching level 2
    tmmi-tracker score --assessment acme.json --min-level 2

    # Compare every organization in the workspace
    tmmi-tracker portfolio --store data/tmmi_tracker.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs (extracted for readability)
// ============================================================================

/// Threshold selection shared by scoring commands
#[derive(clap::Args)]
struct ThresholdArgs {
    /// Threshold preset (overrides the config file preset)
    #[arg(long, value_enum)]
    preset: Option<ThresholdPreset>,

    /// How process-area evidence coverage is computed
    #[arg(long, value_enum)]
    evidence_policy: Option<EvidenceCoveragePolicy>,
}

impl ThresholdArgs {
    fn resolve(&self, app: &AppConfig) -> Result<ScoringThresholds> {
        let mut scoring = app.scoring.clone();
        if let Some(preset) = self.preset {
            scoring.preset = preset;
        }
        if let Some(policy) = self.evidence_policy {
            scoring.area_evidence_policy = Some(policy);
        }
        let errors = scoring.validate();
        if !errors.is_empty() {
            let listed: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(TrackerError::config(format!(
                "scoring thresholds:\n  {}",
                listed.join("\n  ")
            ))
            .into());
        }
        Ok(scoring.resolve())
    }
}

/// Arguments for the `score` subcommand
#[derive(Parser)]
struct ScoreArgs {
    /// Question catalog (JSON or YAML)
    #[arg(long, env = CATALOG_PATH_ENV)]
    catalog: Option<PathBuf>,

    /// Assessment file to score
    #[arg(long, conflicts_with = "org")]
    assessment: Option<PathBuf>,

    /// Workspace file holding stored assessments
    #[arg(long, env = STORE_PATH_ENV)]
    store: Option<PathBuf>,

    /// Organization whose latest stored assessment is scored
    #[arg(long, required_unless_present = "assessment")]
    org: Option<String>,

    /// Output format (default: from config, or inferred from --output-file)
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    #[command(flatten)]
    thresholds: ThresholdArgs,

    /// Exit with code 1 unless at least this level is achieved
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    min_level: Option<u8>,

    /// Exit with code 1 unless eligible for the next level
    #[arg(long)]
    fail_if_not_eligible: bool,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Question catalog (JSON or YAML)
    #[arg(long, env = CATALOG_PATH_ENV)]
    catalog: Option<PathBuf>,

    /// Assessment file to check against the catalog
    #[arg(long)]
    assessment: Option<PathBuf>,
}

/// Arguments for the `portfolio` subcommand
#[derive(Parser)]
struct PortfolioArgs {
    /// Question catalog (JSON or YAML)
    #[arg(long, env = CATALOG_PATH_ENV)]
    catalog: Option<PathBuf>,

    /// Workspace file holding stored assessments
    #[arg(long, env = STORE_PATH_ENV)]
    store: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Write the table to a file instead of stdout
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Include inactive organizations
    #[arg(long)]
    include_inactive: bool,

    #[command(flatten)]
    thresholds: ThresholdArgs,
}

/// Arguments for the `history` subcommand
#[derive(Parser)]
struct HistoryArgs {
    /// Workspace file holding stored assessments
    #[arg(long, env = STORE_PATH_ENV)]
    store: Option<PathBuf>,

    /// Organization name (case-insensitive)
    #[arg(long)]
    org: String,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Write the table to a file instead of stdout
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `import` subcommand
#[derive(Parser)]
struct ImportArgs {
    /// Workspace file holding stored assessments
    #[arg(long, env = STORE_PATH_ENV)]
    store: Option<PathBuf>,

    /// Assessment file to import
    #[arg(long)]
    assessment: PathBuf,

    /// Organization name (default: the one named in the file)
    #[arg(long)]
    org: Option<String>,

    /// Validate answers against this catalog before storing
    #[arg(long)]
    catalog: Option<PathBuf>,
}

/// Arguments for the `amend` subcommand
#[derive(Parser)]
struct AmendArgs {
    /// Workspace file holding stored assessments
    #[arg(long, env = STORE_PATH_ENV)]
    store: Option<PathBuf>,

    /// Id of the stored assessment
    #[arg(long)]
    assessment_id: u64,

    /// Question id of the answer row
    #[arg(long)]
    question: String,

    /// New answer: Yes, No, or Partial
    #[arg(long)]
    answer: Option<String>,

    /// Evidence URL (empty string clears it)
    #[arg(long)]
    evidence: Option<String>,

    /// Reviewer comment (empty string clears it)
    #[arg(long)]
    comment: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one assessment and report maturity, readiness, and gaps
    Score(ScoreArgs),

    /// Check a question catalog and, optionally, an assessment file
    Validate(ValidateArgs),

    /// Score the latest assessment of every organization in a workspace
    Portfolio(PortfolioArgs),

    /// Show an organization's assessment history
    History(HistoryArgs),

    /// Store an assessment file as a new snapshot
    Import(ImportArgs),

    /// Change one answer of a stored assessment
    Amend(AmendArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .tmmi-tracker.yaml in the current directory
    Init,
    /// Print the JSON Schema of the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

/// Dispatch to command handlers
fn run(cli: Cli) -> Result<i32> {
    let (app, loaded_from) = config::load_or_default(cli.config.as_deref());
    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    let no_color = cli.no_color || app.output.no_color;

    match cli.command {
        Commands::Score(args) => {
            let thresholds = args.thresholds.resolve(&app)?;
            let source = match args.assessment {
                Some(path) => cli::AssessmentSource::File(path),
                None => cli::AssessmentSource::Store {
                    path: app.store.resolve_path(args.store.as_deref()),
                    organization: args.org.unwrap_or_default(),
                },
            };
            let target =
                OutputTarget::from_option(args.output_file.or_else(|| app.output.file.clone()));
            let request = ReportRequest {
                format: detect_format(args.output, app.output.format, &target),
                target,
                no_color,
                quiet: cli.quiet,
            };
            cli::run_score(cli::ScoreConfig {
                catalog_path: app.catalog.resolve_path(args.catalog.as_deref()),
                source,
                thresholds,
                request,
                min_level: args.min_level.and_then(TmmiLevel::new),
                fail_if_not_eligible: args.fail_if_not_eligible,
            })
        }

        Commands::Validate(args) => cli::run_validate(cli::ValidateConfig {
            catalog_path: app.catalog.resolve_path(args.catalog.as_deref()),
            assessment_path: args.assessment,
            quiet: cli.quiet,
        }),

        Commands::Portfolio(args) => {
            let thresholds = args.thresholds.resolve(&app)?;
            let target = OutputTarget::from_option(args.output_file.clone());
            cli::run_portfolio(cli::PortfolioConfig {
                catalog_path: app.catalog.resolve_path(args.catalog.as_deref()),
                store_path: app.store.resolve_path(args.store.as_deref()),
                thresholds,
                format: detect_format(args.output, app.output.format, &target),
                output_file: args.output_file,
                include_inactive: args.include_inactive,
                quiet: cli.quiet,
            })
        }

        Commands::History(args) => {
            let target = OutputTarget::from_option(args.output_file.clone());
            cli::run_history(cli::HistoryConfig {
                store_path: app.store.resolve_path(args.store.as_deref()),
                organization: args.org,
                format: detect_format(args.output, app.output.format, &target),
                output_file: args.output_file,
                quiet: cli.quiet,
            })
        }

        Commands::Import(args) => cli::run_import(cli::ImportConfig {
            store_path: app.store.resolve_path(args.store.as_deref()),
            assessment_path: args.assessment,
            organization: args.org,
            catalog_path: args.catalog,
            quiet: cli.quiet,
        }),

        Commands::Amend(args) => cli::run_amend(cli::AmendConfig {
            store_path: app.store.resolve_path(args.store.as_deref()),
            assessment_id: args.assessment_id,
            question_id: args.question,
            answer: args.answer,
            evidence_url: args.evidence,
            comment: args.comment,
            quiet: cli.quiet,
        }),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "tmmi-tracker", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            run_config(action, cli.config.as_deref(), &app, loaded_from.as_deref())
        }
    }
}

fn run_config(
    action: ConfigAction,
    explicit: Option<&Path>,
    app: &AppConfig,
    loaded_from: Option<&Path>,
) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            if let Some(path) = loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            for error in app.validate() {
                eprintln!("# warning: {error}");
            }
            let yaml = serde_yaml::to_string(app).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                ::dirs::config_dir().map(|p| p.join("tmmi-tracker").display().to_string()),
                ::dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in &[
                ".tmmi-tracker.yaml",
                ".tmmi-tracker.yml",
                "tmmi-tracker.yaml",
                "tmmi-tracker.yml",
            ] {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(explicit) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".tmmi-tracker.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = config::generate_full_example_config();
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
        ConfigAction::Schema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
        }
    }
    Ok(exit_codes::SUCCESS)
}
