//! # Door Scan Loop
//!
//! Reads one scan per line and writes one JSON result per line.
//!
//! ## Input
//!
//! ```text
//! <token>              scanned at the station's default event (--event)
//! <event_id> <token>   scanned at an explicit event
//! # comment            ignored, as are blank lines
//! ```
//!
//! ## Output
//!
//! A [`CheckInOutcome`] per scan, or `{"error": "..."}` for a line that
//! could not be attributed to an event.

use iv_01_entity_store::EntityStoreApi;
use iv_02_ticketing::{CheckInOutcome, TicketDelivery, TicketingApi, TicketingService};
use serde::Serialize;
use shared_types::EventId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Tally of one scan session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub scanned: usize,
    pub admitted: usize,
    pub already_used: usize,
    pub rejected: usize,
    pub unparsed: usize,
}

impl ScanSummary {
    fn record(&mut self, outcome: &CheckInOutcome) {
        self.scanned += 1;
        match outcome {
            CheckInOutcome::Admitted { .. } => self.admitted += 1,
            CheckInOutcome::AlreadyUsed { .. } => self.already_used += 1,
            CheckInOutcome::Invalid { .. } => self.rejected += 1,
        }
    }
}

#[derive(Serialize)]
struct LineError<'a> {
    error: &'a str,
}

/// Split a scan line into the door's event and the token.
pub fn parse_scan_line<'a>(
    line: &'a str,
    default_event: Option<&EventId>,
) -> Result<Option<(EventId, &'a str)>, &'static str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(token), None, _) => default_event
            .map(|event| Some((event.clone(), token)))
            .ok_or("no event given and no default event configured"),
        (Some(event), Some(token), None) => Ok(Some((EventId::from(event), token))),
        _ => Err("expected `<token>` or `<event_id> <token>`"),
    }
}

/// Validate every scan from `input`, writing results to `output`.
///
/// Returns at end of input.
pub async fn run<S, D, R, W>(
    service: &TicketingService<S, D>,
    default_event: Option<&EventId>,
    input: R,
    output: &mut W,
) -> std::io::Result<ScanSummary>
where
    S: EntityStoreApi,
    D: TicketDelivery,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = ScanSummary::default();
    run_tallied(service, default_event, input, output, &mut summary).await?;
    Ok(summary)
}

/// [`run`], tallying into `summary` as each scan completes.
///
/// The tally stays valid if the future is dropped mid-session.
pub async fn run_tallied<S, D, R, W>(
    service: &TicketingService<S, D>,
    default_event: Option<&EventId>,
    input: R,
    output: &mut W,
    summary: &mut ScanSummary,
) -> std::io::Result<()>
where
    S: EntityStoreApi,
    D: TicketDelivery,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let rendered = match parse_scan_line(&line, default_event) {
            Ok(None) => continue,
            Ok(Some((event_id, token))) => {
                let outcome = service.validate(token, &event_id).await;
                summary.record(&outcome);
                debug!(event_id = %event_id, outcome = outcome.label(), "Scan processed");
                serde_json::to_string(&outcome)
            }
            Err(reason) => {
                summary.unparsed += 1;
                warn!(reason, "Unreadable scan line");
                serde_json::to_string(&LineError { error: reason })
            }
        }
        .map_err(std::io::Error::other)?;

        output.write_all(rendered.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }

    Ok(())
}
