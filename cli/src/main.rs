//! CLI for the issue migrator.
//!
//! Migrates the issues of one GitHub repository, with their ZenHub epics and
//! pipelines, into a Clubhouse project.

use clap::Parser;
use issue_migrator::{
    load_identities, ClubhouseDestination, GitHubIssues, RunSummary, Runner, RunnerConfig,
    RunnerError, ZenHubBoard,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Migrator - Move GitHub issues and ZenHub epics into Clubhouse.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub organization.
    #[arg(long)]
    org: String,

    /// GitHub repository.
    #[arg(long)]
    repo: String,

    /// Clubhouse project receiving the stories.
    #[arg(long)]
    project: String,

    /// ZenHub repository id (the GitHub repository id).
    #[arg(long, env = "ZENHUB_REPO_ID")]
    repo_id: u64,

    /// Path to the GitHub login to Clubhouse member table.
    #[arg(long, default_value = "identities.toml")]
    identities: PathBuf,

    /// Dump the migration plan instead of creating Clubhouse entities.
    #[arg(long)]
    dry_run: bool,

    /// Write the dry-run dump to a file instead of stdout.
    #[arg(long)]
    dump_path: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// ZenHub API token.
    #[arg(long, env = "ZENHUB_TOKEN", hide_env_values = true)]
    zenhub_token: String,

    /// Clubhouse API token.
    #[arg(long, env = "CLUBHOUSE_TOKEN", hide_env_values = true)]
    clubhouse_token: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing(args.debug);

    // octocrab and reqwest both sit on rustls
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info", or
///   "debug" with `--debug`)
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let mapper = load_identities(&args.identities)?.into_mapping_table();

    let mut config = RunnerConfig::new(
        args.org,
        args.repo,
        args.repo_id,
        args.project,
        args.dry_run,
    );
    if let Some(path) = args.dump_path {
        config = config.with_dump_path(path);
    }

    let runner = Runner::new(
        config,
        Arc::new(GitHubIssues::new(args.github_token)?),
        Arc::new(ZenHubBoard::new(args.zenhub_token)?),
        Arc::new(ClubhouseDestination::new(args.clubhouse_token)?),
        Arc::new(mapper),
    );
    runner.run().await
}

/// Prints the final run summary.
///
/// Goes to stderr so a dry-run dump on stdout stays valid JSON.
fn print_summary(summary: &RunSummary) {
    eprintln!("\nSummary:");
    eprintln!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    eprintln!("  Issues fetched: {}", summary.issues_fetched);
    eprintln!("  Pull requests skipped: {}", summary.pull_requests_skipped);
    eprintln!("  Epics converted: {}", summary.epics_converted);
    eprintln!("  Stories converted: {}", summary.stories_converted);
    eprintln!(
        "  Pipeline labels attached: {}",
        summary.pipeline_labels_attached
    );
    eprintln!(
        "  Pipeline labels unmatched: {}",
        summary.pipeline_labels_unmatched
    );
    eprintln!("  Board epics unreadable: {}", summary.board_epics_failed);

    if !summary.dry_run {
        eprintln!("  Epics created: {}", summary.epics_created);
        eprintln!("  Epics failed: {}", summary.epics_failed);
        eprintln!("  Epic links set: {}", summary.epic_links_set);
        eprintln!("  Stories created: {}", summary.stories_created);
        eprintln!("  Labels applied: {}", summary.labels_applied);
        eprintln!("  Labels failed: {}", summary.labels_failed);
        eprintln!("  Labels skipped: {}", summary.labels_skipped);
    }

    if !summary.missing_logins.is_empty() {
        eprintln!("\nMissing logins:");
        for login in &summary.missing_logins {
            eprintln!("  {login}");
        }
    }
}
