//! # Invitii Door-Station
//!
//! Validates scanned admission tokens for one or more events.
//!
//! ```text
//! IV_TICKET_SECRET=<64+ hex chars> iv-runtime --seed seed.json --event gala
//! ```
//!
//! Tickets issued while seeding are printed to stdout as JSON lines, followed
//! by one outcome line per scanned token read from stdin.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use iv_01_entity_store::EntityStoreApi;
use iv_runtime::config::RuntimeConfig;
use iv_runtime::{build_service, door, seed};
use iv_telemetry::TelemetryConfig;
use shared_types::EventId;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "iv-runtime")]
#[command(about = "Door-station check-in for Invitii events")]
struct Args {
    /// JSON file with events, guests and responses to load at startup
    #[arg(short, long)]
    seed: Option<PathBuf>,

    /// Event scanned when a line carries only a token
    #[arg(short, long)]
    event: Option<String>,

    /// Skip printing tickets issued from the seed file
    #[arg(long)]
    quiet_tickets: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let telemetry = TelemetryConfig::from_env();
    let _telemetry_guard =
        iv_telemetry::init_telemetry(&telemetry).context("Failed to initialize telemetry")?;

    let config = RuntimeConfig::from_env().context("Invalid runtime configuration")?;
    info!(
        grace_window_secs = config.ticketing.grace_window_secs,
        max_token_len = config.ticketing.max_token_len,
        "Configuration loaded"
    );

    let service = build_service(&config)?;
    let mut stdout = tokio::io::stdout();

    if let Some(path) = &args.seed {
        let data = seed::SeedData::load(path)?;
        let report = seed::apply(&data, &service).await?;
        if !args.quiet_tickets {
            for ticket in &report.tickets {
                let line = serde_json::to_string(ticket)?;
                stdout.write_all(line.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
            stdout.flush().await?;
        }
    }

    let default_event = args.event.map(EventId::from);
    if let Some(event_id) = &default_event {
        if service.store().event(event_id).is_none() {
            error!(event_id = %event_id, "Default event is not loaded; every scan will be rejected");
        }
    }

    info!("Door station ready. Reading scans from stdin (Ctrl+C to stop).");
    let input = BufReader::new(tokio::io::stdin());
    let mut summary = door::ScanSummary::default();
    tokio::select! {
        result = door::run_tallied(&service, default_event.as_ref(), input, &mut stdout, &mut summary) => {
            result.context("Scan loop failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
        }
    }

    info!(
        scanned = summary.scanned,
        admitted = summary.admitted,
        already_used = summary.already_used,
        rejected = summary.rejected,
        unparsed = summary.unparsed,
        "Door station stopped"
    );
    for event in service.store().events() {
        info!(
            event_id = %event.id,
            checked_in = service.store().checked_in_count(&event.id),
            "Check-in count"
        );
    }
    if let Ok(metrics) = iv_telemetry::encode_metrics() {
        tracing::debug!(%metrics, "Final metrics");
    }

    Ok(())
}
