//! hoslog - hours-of-service trip planner
//!
//! Command line entry point. It wires together:
//! - Configuration loading
//! - Store initialization
//! - Route provider selection (OpenRouteService or a fixed offline duration)
//! - The trip service and the pure planner

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hoslog::{offline_routes, TripService};
use hoslog_api::TripRequest;
use hoslog_config::{load_config_or_default, Policy};
use hoslog_core::TripPlanner;
use hoslog_route::{FixedRouteProvider, OpenRouteServiceClient, RouteProvider};
use hoslog_store::{AuditEvent, AuditEventType, SqliteStore, Store, TripRecord};
use hoslog_util::{
    as_hours_f64, default_config_path, format_datetime_full, TripId, DATABASE_FILENAME,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// hoslog - Plan hours-of-service compliant trips and their duty logs
#[derive(Parser, Debug)]
#[command(name = "hoslog")]
#[command(about = "Plan hours-of-service compliant trips and their duty logs", long_about = None)]
struct Args {
    /// Configuration file path (default: ~/.config/hoslog/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Data directory override (or set HOSLOG_DATA_DIR env var)
    #[arg(short, long, env = "HOSLOG_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan duty segments for a known driving time (no routing, nothing saved)
    Plan {
        /// Driving time of the trip in seconds
        #[arg(long)]
        duration_secs: f64,

        /// Hours already used in the current cycle
        #[arg(long, default_value_t = 0.0)]
        cycle_used: f64,

        /// Also print per-day sheets laid out on a 24-hour grid
        #[arg(long)]
        sheets: bool,
    },

    /// Route, plan and save a trip
    Trip {
        #[arg(long)]
        current: String,

        #[arg(long)]
        pickup: String,

        #[arg(long)]
        dropoff: String,

        /// Hours already used in the current cycle
        #[arg(long, default_value_t = 0.0)]
        cycle_used: f64,

        /// Skip the routing service and assume this many hours of driving
        #[arg(long)]
        offline_hours: Option<f64>,
    },

    /// List saved trips
    History {
        /// Only trips whose pickup or dropoff contains this text
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },

    /// Print a saved trip
    Show {
        /// Trip id as printed by `trip` or `history`
        id: String,
    },
}

fn load_policy(args: &Args) -> Result<Policy> {
    let policy = load_config_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    info!(
        config_path = %args.config.display(),
        cycle_limit_hours = as_hours_f64(policy.rules.cycle_limit),
        "Configuration loaded"
    );
    Ok(policy)
}

fn open_store(args: &Args, policy: &Policy) -> Result<Arc<dyn Store>> {
    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| policy.service.data_dir.clone());

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    let db_path = data_dir.join(DATABASE_FILENAME);
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Failed to open database {:?}", db_path))?;

    info!(db_path = %db_path.display(), "Store initialized");
    Ok(Arc::new(store))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{text}");
    Ok(())
}

fn print_summary(record: &TripRecord) {
    println!(
        "{}  {}  {} -> {}  (cycle used {:.2} h)",
        record.id,
        format_datetime_full(&record.created_at),
        record.pickup_location,
        record.dropoff_location,
        record.current_cycle_used_hours,
    );
}

async fn run(args: Args) -> Result<()> {
    let policy = load_policy(&args)?;

    match &args.command {
        Command::Plan {
            duration_secs,
            cycle_used,
            sheets,
        } => {
            let plan = TripPlanner::new(policy.rules.clone()).plan(*duration_secs, *cycle_used);
            let log = plan.to_trip_log();
            if !log.is_complete() {
                warn!(outcome = %log.outcome, "Trip could not be fully planned");
            }

            if *sheets {
                print_json(&serde_json::json!({ "log": log, "sheets": plan.sheets() }))
            } else {
                print_json(&log)
            }
        }

        Command::Trip {
            current,
            pickup,
            dropoff,
            cycle_used,
            offline_hours,
        } => {
            let routes: Arc<dyn RouteProvider> = match offline_hours {
                Some(hours) => {
                    let fixed = offline_routes(*hours).context("Invalid --offline-hours")?;
                    info!(hours, "Using fixed offline route duration");
                    Arc::new(fixed)
                }
                None => Arc::new(
                    OpenRouteServiceClient::from_config(&policy.routing)
                        .context("Failed to set up the routing client")?,
                ),
            };

            let store = open_store(&args, &policy)?;
            store.append_audit(AuditEvent::new(AuditEventType::RulesLoaded {
                source: args.config.display().to_string(),
            }))?;

            let request = TripRequest {
                current_location: current.clone(),
                pickup_location: pickup.clone(),
                dropoff_location: dropoff.clone(),
                current_cycle_used_hours: *cycle_used,
            };

            let service = TripService::new(&policy, routes, store);
            let response = service
                .plan_trip(&request)
                .await
                .context("Failed to plan trip")?;
            print_json(&response)
        }

        Command::History { search, limit } => {
            let store = open_store(&args, &policy)?;
            let service = TripService::new(&policy, Arc::new(FixedRouteProvider::empty()), store);

            let trips = service.history(search.as_deref(), *limit)?;
            if trips.is_empty() {
                println!("No trips found");
            }
            for record in &trips {
                print_summary(record);
            }
            Ok(())
        }

        Command::Show { id } => {
            let id: TripId = id.parse().with_context(|| format!("Invalid trip id {id:?}"))?;
            let store = open_store(&args, &policy)?;
            let service = TripService::new(&policy, Arc::new(FixedRouteProvider::empty()), store);

            let record = service.trip(&id)?;
            print_json(&record)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the JSON output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "hoslog starting");

    run(args).await
}
