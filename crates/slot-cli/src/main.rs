//! `slots` CLI: compute salon booking availability from JSON snapshots.
//!
//! ## Usage
//!
//! ```sh
//! # Available days for the next 30 days from today
//! slots dates -s snapshot.json
//!
//! # Available days in March 2026, in the salon's timezone
//! slots --timezone Europe/Berlin dates -s snapshot.json --month 2026-03
//!
//! # Bookable times on one day, for a 90 minute booking
//! slots times -s snapshot.json --date 2026-03-16 --duration 90
//!
//! # Answer a list of queries against a directory of <service_id>.json snapshots
//! slots batch --snapshots ./snapshots -i queries.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod files;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use slot_engine::query::{answer, answer_cached, AvailabilityQuery, AvailabilityResponse, QueryMode};
use slot_engine::{AvailabilityCalculator, DateRange, EngineConfig, SnapshotCache};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::files::{read_input, read_snapshot, write_output, DirectorySource};

#[derive(Parser)]
#[command(name = "slots", version, about = "Salon booking availability calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON engine configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Business timezone (IANA name or UTC); overrides config and SLOTS_TIMEZONE
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List days with at least one bookable slot
    Dates {
        /// Service snapshot JSON file
        #[arg(short, long)]
        snapshot: PathBuf,
        /// First day of the window (defaults to today in the business timezone)
        #[arg(long, conflicts_with = "month")]
        from: Option<NaiveDate>,
        /// Days after the first day to include
        #[arg(long, conflicts_with = "month")]
        days_ahead: Option<u32>,
        /// A whole calendar month, as YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },
    /// List bookable times on one day
    Times {
        /// Service snapshot JSON file
        #[arg(short, long)]
        snapshot: PathBuf,
        /// The day to list
        #[arg(long)]
        date: NaiveDate,
        /// Booking length in minutes, replacing each station's duration
        #[arg(long)]
        duration: Option<u32>,
    },
    /// Answer a JSON list of queries using a directory of snapshots
    Batch {
        /// Directory holding <service_id>.json snapshots
        #[arg(long)]
        snapshots: PathBuf,
        /// Queries file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    debug!(?config, "configuration loaded");

    let json = match cli.command {
        Commands::Dates {
            snapshot,
            from,
            days_ahead,
            month,
        } => {
            let snapshot = read_snapshot(&snapshot)?;
            let clock = config.clock()?;
            let range = match month {
                Some(month) => parse_month(&month)?,
                None => {
                    let from = from.unwrap_or_else(|| clock.local_date(Utc::now()));
                    let days_ahead = days_ahead
                        .or(snapshot.days_ahead)
                        .unwrap_or(config.days_ahead);
                    DateRange::days_ahead(from, days_ahead)?
                }
            };
            let dates = AvailabilityCalculator::new(clock).compute(&snapshot, range);
            info!(days = dates.len(), "available days computed");
            serde_json::to_string_pretty(&dates)?
        }
        Commands::Times {
            snapshot,
            date,
            duration,
        } => {
            let snapshot = read_snapshot(&snapshot)?;
            let query = AvailabilityQuery {
                service_id: snapshot.service_id.clone(),
                date,
                mode: QueryMode::Times,
                duration,
            };
            let response = answer(&query, &snapshot, &config)?;
            serde_json::to_string_pretty(&response.available_times.unwrap_or_default())?
        }
        Commands::Batch { snapshots, input } => {
            let raw = read_input(input.as_deref())?;
            let queries: Vec<AvailabilityQuery> =
                serde_json::from_str(&raw).context("Failed to parse queries")?;

            let source = DirectorySource::new(snapshots);
            let mut cache = SnapshotCache::new(config.cache_capacity);
            let responses: Vec<AvailabilityResponse> = queries
                .iter()
                .map(|query| {
                    answer_cached(query, &source, &mut cache, &config)
                        .unwrap_or_else(|e| AvailabilityResponse::failure(&e))
                })
                .collect();

            let stats = cache.stats();
            info!(
                queries = queries.len(),
                cache_hits = stats.hits,
                cache_misses = stats.misses,
                "batch answered"
            );
            serde_json::to_string_pretty(&responses)?
        }
    };

    write_output(cli.output.as_deref(), &json)
}

/// Config file (or defaults), then `SLOTS_TIMEZONE`, then `--timezone`.
fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            EngineConfig::from_json(&json)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    let mut config = config.with_env_overrides();
    if let Some(tz) = &cli.timezone {
        config.timezone = tz.clone();
    }
    // Reject a bad timezone before any query runs.
    config.clock()?;
    Ok(config)
}

/// Parse `YYYY-MM` into the month's date range.
fn parse_month(s: &str) -> Result<DateRange> {
    let (year, month) = s
        .split_once('-')
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    let year: i32 = year
        .parse()
        .with_context(|| format!("Invalid year in '{}'", s))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("Invalid month in '{}'", s))?;
    Ok(DateRange::month(year, month)?)
}
