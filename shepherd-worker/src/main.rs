//! Task entry point for Shepherd.
//!
//! Runs one job per invocation (suitable for cron) or keeps running the jobs on
//! the intervals configured in `[schedule]`.

mod cli;
mod scheduler;

use std::fs::File;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Command};
use shepherd_app::config::AppConfig;
use shepherd_app::AppState;
use shepherd_core::services::{first_import_error, ImportPolicy};
use shepherd_core::types::{BatchSummary, JobKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the job summaries.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match cli.config {
        Some(ref path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };

    let state = AppState::from_config(&config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!("Using database {}", config.database.path.display());

    match cli.command {
        Command::CheckDomains => run_once(&state, JobKind::CheckDomains).await,
        Command::UpdateDns => run_once(&state, JobKind::UpdateDns).await,
        Command::ReleaseDomains { dry_run: false } => {
            run_once(&state, JobKind::ReleaseDomains).await
        }
        Command::ReleaseDomains { dry_run: true } => {
            let summary = state.orchestrator.release_expired_domains(true).await?;
            tracing::info!("Dry run: {} domain(s) would be released", summary.processed);
            print_json(&summary)
        }
        Command::Import { file, skip_invalid } => {
            let reader = File::open(&file)
                .with_context(|| format!("Failed to open {}", file.display()))?;
            let policy = if skip_invalid {
                ImportPolicy::SkipInvalid
            } else {
                ImportPolicy::HaltOnError
            };
            let result = state.import_service.import_csv(reader, policy).await?;
            tracing::info!(
                "Imported {} domain(s), {} row(s) failed",
                result.imported.len(),
                result.failures.len()
            );
            print_json(&result)?;
            if let Some(e) = first_import_error(&result) {
                return Err(e.into());
            }
            Ok(())
        }
        Command::Schedule => {
            let jobs = config.schedule.scheduled_jobs();
            if jobs.is_empty() {
                bail!("No job has an interval in the [schedule] section");
            }
            scheduler::run(&state, &jobs, async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for shutdown signal: {e}");
                    std::future::pending::<()>().await;
                }
            })
            .await;
            Ok(())
        }
    }
}

async fn run_once(state: &AppState, job: JobKind) -> anyhow::Result<()> {
    let summary: BatchSummary = state.run_job(job).await?;
    print_json(&summary)?;
    if summary.failed_count > 0 {
        tracing::warn!("{} of {} domain(s) failed", summary.failed_count, summary.processed);
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
