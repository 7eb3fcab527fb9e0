use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod csod;
mod email;
mod export;
mod filter;
mod leaderboard;
mod mock;
mod models;
mod sources;
mod stats;
mod sync;
mod templates;
mod udemy;

use crate::csod::CsodClient;
use crate::email::{EmailPayload, EmailService, Recipient};
use crate::filter::{LicenseFilter, TrainingFilter};
use crate::models::{
    LicenseStatus, SourceStatus, SyncResult, TemplateCategory, TrainingSource, TrainingStatus,
};
use crate::sources::LicenseProvider;
use crate::stats::{LicenseStats, TrainingStats};
use crate::udemy::UdemyClient;

#[derive(Parser)]
#[command(name = "tmd-sync")]
#[command(about = "Consolidated training sync and license management for Udemy & CSOD", long_about = None)]
struct Cli {
    /// Use the live platform APIs (configured via environment variables)
    /// instead of the generated dataset.
    #[arg(long, global = true)]
    live: bool,

    /// Seed for the generated dataset; same seed, same data.
    #[arg(long, global = true, default_value_t = 42)]
    seed: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull trainings and licenses from both platforms
    Sync {
        #[arg(long)]
        json: bool,
    },
    /// Export the filtered training set as CSV
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        last_days: Option<i64>,
        #[arg(long)]
        skill: Option<String>,
        #[arg(long)]
        source: Option<TrainingSource>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Rank employees by completed-training hours
    Leaderboard {
        #[arg(long)]
        source: Option<TrainingSource>,
        #[arg(long)]
        json: bool,
    },
    /// List employees with pending or not-started trainings
    Incomplete {
        #[arg(long)]
        status: Option<TrainingStatus>,
        #[arg(long)]
        source: Option<TrainingSource>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show Udemy license utilization and risk tiers
    Licenses {
        #[arg(long)]
        status: Option<LicenseStatus>,
        #[arg(long)]
        min_inactive_days: Option<i64>,
    },
    /// Send a nudge email to license holders
    #[command(group(
        ArgGroup::new("targets")
            .args(["min_inactive_days", "email"])
            .multiple(false)
    ))]
    Nudge {
        /// Template id (see `templates`); defaults to the tier matching the
        /// inactivity floor.
        #[arg(long)]
        template: Option<String>,
        #[arg(long)]
        min_inactive_days: Option<i64>,
        #[arg(long)]
        email: Vec<String>,
        /// Render recipients without dispatching anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Revoke Udemy licenses for inactive users
    #[command(group(
        ArgGroup::new("targets")
            .args(["min_inactive_days", "email"])
            .multiple(false)
    ))]
    Revoke {
        #[arg(long)]
        min_inactive_days: Option<i64>,
        #[arg(long)]
        email: Vec<String>,
        /// Actually revoke; without this the selection is only printed.
        #[arg(long)]
        yes: bool,
    },
    /// List the email template catalog
    Templates,
}

async fn run_sync(live: bool, seed: u64) -> anyhow::Result<SyncResult> {
    let now = Utc::now();
    let result = if live {
        let udemy = UdemyClient::from_env();
        let csod = CsodClient::from_env();
        sync::sync_all(&udemy, &csod, now).await
    } else {
        let catalog = mock::MockCatalog::generate(seed, now.date_naive())?;
        let udemy = UdemyClient::mock(catalog.clone());
        let csod = CsodClient::mock(catalog);
        sync::sync_all(&udemy, &csod, now).await
    };
    Ok(result)
}

fn print_source_reports(result: &SyncResult) {
    for (label, report) in [
        ("Udemy", &result.sources.udemy),
        ("CSOD", &result.sources.csod),
    ] {
        match report.status {
            SourceStatus::Success => println!(
                "- {label}: {} trainings, {} licenses",
                report.trainings, report.licenses
            ),
            SourceStatus::Error => println!(
                "- {label}: {}",
                report.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}

fn license_provider(live: bool, seed: u64) -> anyhow::Result<UdemyClient> {
    if live {
        Ok(UdemyClient::from_env())
    } else {
        let catalog = mock::MockCatalog::generate(seed, Utc::now().date_naive())?;
        Ok(UdemyClient::mock(catalog))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sync { json } => {
            let result = run_sync(cli.live, cli.seed).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "Synced {} trainings and {} licenses at {}.",
                    result.trainings.len(),
                    result.licenses.len(),
                    result.synced_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
                print_source_reports(&result);
                let stats = TrainingStats::compute(&result.trainings);
                println!(
                    "{} completed, {} hours consumed, {} active learners.",
                    stats.completed, stats.total_hours, stats.unique_people
                );
            }
        }
        Commands::Export {
            out,
            year,
            last_days,
            skill,
            source,
            search,
        } => {
            let result = run_sync(cli.live, cli.seed).await?;
            let today = result.synced_at.date_naive();
            let filter = TrainingFilter {
                year,
                last_days,
                skill,
                source,
                search,
                ..TrainingFilter::default()
            };
            let filtered = filter.apply(&result.trainings, today);
            let path = out.unwrap_or_else(|| PathBuf::from(export::default_export_name(today)));
            let file = std::fs::File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            export::write_csv(&filtered, file)?;
            println!("Exported {} records to {}.", filtered.len(), path.display());
        }
        Commands::Leaderboard { source, json } => {
            let result = run_sync(cli.live, cli.seed).await?;
            let mut board = leaderboard::top_learners(&result.trainings);
            if let Some(source) = source {
                board.retain(|entry| entry.source == source);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&board)?);
            } else if board.is_empty() {
                println!("No completed trainings to rank.");
            } else {
                println!("Top learners by completed-training hours:");
                for (rank, entry) in board.iter().enumerate() {
                    println!(
                        "{:>2}. {} ({}, {}) {} courses, {}h [{}]",
                        rank + 1,
                        entry.employee_name,
                        entry.employee_email,
                        entry.department,
                        entry.courses_completed,
                        entry.total_hours,
                        entry.source
                    );
                }
            }
        }
        Commands::Incomplete {
            status,
            source,
            search,
        } => {
            let result = run_sync(cli.live, cli.seed).await?;
            let filter = TrainingFilter {
                incomplete_only: true,
                status,
                source,
                search,
                ..TrainingFilter::default()
            };
            let incomplete = filter.apply(&result.trainings, result.synced_at.date_naive());
            let in_progress = incomplete
                .iter()
                .filter(|t| t.status == TrainingStatus::InProgress)
                .count();
            println!(
                "{} incomplete trainings ({} in progress, {} not started):",
                incomplete.len(),
                in_progress,
                incomplete.len() - in_progress
            );
            for t in &incomplete {
                println!(
                    "- {} | {} <{}> | {} | started {} | {}",
                    t.training_name, t.employee_name, t.employee_email, t.source, t.start_date,
                    t.status
                );
            }
        }
        Commands::Licenses {
            status,
            min_inactive_days,
        } => {
            let result = run_sync(cli.live, cli.seed).await?;
            let filter = LicenseFilter {
                status,
                min_inactive_days,
                search: None,
            };
            let licenses = filter.apply(&result.licenses);
            let stats = LicenseStats::compute(&licenses);
            println!(
                "{} licenses ({} active, {} at risk, {} inactive):",
                stats.total, stats.active, stats.at_risk, stats.inactive
            );
            for l in &licenses {
                println!(
                    "- {} <{}> | {} | last active {} ({} days ago) | {}",
                    l.employee_name,
                    l.employee_email,
                    l.department,
                    l.last_active,
                    l.days_inactive,
                    l.status
                );
            }
        }
        Commands::Nudge {
            template,
            min_inactive_days,
            email,
            dry_run,
        } => {
            let result = run_sync(cli.live, cli.seed).await?;
            let floor = min_inactive_days.unwrap_or(15);
            let tpl = match &template {
                Some(id) => {
                    templates::find(id).with_context(|| format!("unknown template '{id}'"))?
                }
                None => {
                    let category = match floor {
                        d if d >= 90 => TemplateCategory::Inactive90,
                        d if d >= 60 => TemplateCategory::Inactive60,
                        d if d >= 30 => TemplateCategory::Inactive30,
                        d if d >= 15 => TemplateCategory::Inactive15,
                        _ => TemplateCategory::NudgeComplete,
                    };
                    templates::find_by_category(category)
                        .context("template catalog is missing an inactivity tier")?
                }
            };
            let filter = LicenseFilter {
                min_inactive_days: Some(floor),
                ..LicenseFilter::default()
            };
            let selected: Vec<_> = if email.is_empty() {
                filter.apply(&result.licenses)
            } else {
                result
                    .licenses
                    .iter()
                    .filter(|l| email.contains(&l.employee_email))
                    .cloned()
                    .collect()
            };
            if selected.is_empty() {
                println!("No matching license holders to nudge.");
                return Ok(());
            }

            let recipients: Vec<Recipient> = selected
                .iter()
                .map(|l| Recipient {
                    name: l.employee_name.clone(),
                    email: l.employee_email.clone(),
                })
                .collect();

            if dry_run {
                println!(
                    "Would send '{}' ({}) to {} recipient(s):",
                    tpl.name,
                    tpl.subject,
                    recipients.len()
                );
                for r in &recipients {
                    println!("- {} <{}>", r.name, r.email);
                }
                return Ok(());
            }

            let service = if cli.live {
                EmailService::from_env()
            } else {
                EmailService::mock()
            };
            let payload = EmailPayload {
                to: recipients,
                subject: tpl.subject,
                body: tpl.body,
            };
            let outcome = service.send(&payload).await?;
            println!(
                "Sent {} email(s), {} failed.",
                outcome.sent, outcome.failed
            );
            for error in &outcome.errors {
                println!("- {error}");
            }
        }
        Commands::Revoke {
            min_inactive_days,
            email,
            yes,
        } => {
            let udemy = license_provider(cli.live, cli.seed)?;
            let licenses = udemy.fetch_licenses().await?;
            let filter = LicenseFilter {
                min_inactive_days: Some(min_inactive_days.unwrap_or(90)),
                ..LicenseFilter::default()
            };
            let targets: Vec<String> = if email.is_empty() {
                filter
                    .apply(&licenses)
                    .into_iter()
                    .map(|l| l.employee_email)
                    .collect()
            } else {
                email
            };
            if targets.is_empty() {
                println!("No licenses match the revocation criteria.");
                return Ok(());
            }
            if !yes {
                println!(
                    "{} license(s) would be revoked (re-run with --yes to confirm):",
                    targets.len()
                );
                for target in &targets {
                    println!("- {target}");
                }
                return Ok(());
            }
            let outcome = udemy.revoke_licenses(&targets).await?;
            println!("Revoked {} license(s).", outcome.revoked);
        }
        Commands::Templates => {
            for tpl in templates::catalog() {
                println!("{} | {} | {}", tpl.id, tpl.name, tpl.subject);
            }
        }
    }

    Ok(())
}
