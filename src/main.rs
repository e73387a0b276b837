use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod aggregate;
mod config;
mod dataset;
mod error;
mod models;
mod report;
mod week;

use config::BoardConfig;
use models::{CompletionRecord, WeekSummary, WeeklyData};
use week::WeekKey;

#[derive(Parser)]
#[command(name = "weekly-challenge-board")]
#[command(about = "Weekly coding-challenge leaderboard with penalties and prize pool", long_about = None)]
struct Cli {
    /// TOML file overriding the weekly target, avatars or tie-break
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Completion records to load instead of the built-in sample
    #[arg(long, global = true)]
    csv: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List weeks with records, newest first
    Weeks,
    /// Print the ranked leaderboard for a week
    Leaderboard {
        /// Week key such as 2024-W01; defaults to the newest week
        #[arg(long)]
        week: Option<String>,
    },
    /// Generate a markdown report for a week
    Report {
        #[arg(long)]
        week: Option<String>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export every week as JSON
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the default configuration as TOML
    DefaultConfig,
}

fn main() -> anyhow::Result<()> {
    let Cli {
        config,
        csv,
        verbose,
        command,
    } = Cli::parse();
    init_logging(verbose);

    match command {
        Commands::DefaultConfig => {
            print!("{}", BoardConfig::default_toml()?);
        }
        Commands::Weeks => {
            let weekly = build_weekly(config.as_deref(), csv.as_deref())?;
            if weekly.is_empty() {
                println!("No completions recorded.");
                return Ok(());
            }
            for key in report::available_weeks(&weekly) {
                let summary = &weekly[&key];
                println!(
                    "- {} ({}): {} participants, ${} penalties",
                    key,
                    key.label(),
                    summary.participants.len(),
                    summary.total_penalties
                );
            }
            println!("Prize pool: ${}", report::prize_pool(&weekly));
        }
        Commands::Leaderboard { week } => {
            let weekly = build_weekly(config.as_deref(), csv.as_deref())?;
            let Some(key) = resolve_week(week.as_deref(), &weekly)? else {
                println!("No completions recorded.");
                return Ok(());
            };
            let empty = WeekSummary::default();
            let summary = weekly.get(&key).unwrap_or(&empty);

            println!("Leaderboard for {}:", key.label());
            print!("{}", report::format_leaderboard(summary));
        }
        Commands::Report { week, out } => {
            let weekly = build_weekly(config.as_deref(), csv.as_deref())?;
            let Some(key) = resolve_week(week.as_deref(), &weekly)? else {
                println!("No completions recorded.");
                return Ok(());
            };
            let report = report::build_report(key, weekly.get(&key), &weekly);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { out } => {
            let weekly = build_weekly(config.as_deref(), csv.as_deref())?;
            let json = report::build_json(&weekly)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write export to {}", path.display()))?;
                    println!("Exported {} weeks to {}.", weekly.len(), path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

fn build_weekly(config: Option<&Path>, csv: Option<&Path>) -> anyhow::Result<WeeklyData> {
    let config = match config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };
    debug!(?config, "configuration loaded");

    let records = load_records(csv)?;
    info!(records = records.len(), "records loaded");

    aggregate::aggregate_weeks(&records, &config).context("failed to aggregate completion records")
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_records(csv: Option<&Path>) -> anyhow::Result<Vec<CompletionRecord>> {
    match csv {
        Some(path) => {
            info!(path = %path.display(), "importing records from CSV");
            dataset::import_csv(path)
        }
        None => dataset::seed_records().context("built-in sample data is invalid"),
    }
}

/// Explicit week keys are validated; otherwise the newest week is used.
fn resolve_week(
    requested: Option<&str>,
    weekly: &WeeklyData,
) -> anyhow::Result<Option<WeekKey>> {
    match requested {
        Some(value) => Ok(Some(WeekKey::parse(value)?)),
        None => Ok(report::default_week(weekly)),
    }
}
