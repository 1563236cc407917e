//! # Seed Data
//!
//! A JSON fixture that stands in for the host app's event and guest lists:
//!
//! ```json
//! {
//!   "events": [{"id": "gala", "name": "Summer Gala", "starts_at": "2025-06-01T18:00:00Z",
//!               "venue": "Hall A", "host_id": "host-1"}],
//!   "guests": [{"id": "ada", "event_id": "gala", "name": "Ada", "contact": "ada@example.com"}],
//!   "responses": [{"guest_id": "ada", "event_id": "gala", "status": "yes"}]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use iv_01_entity_store::EntityStoreApi;
use iv_02_ticketing::{TicketDelivery, TicketingApi, TicketingService};
use serde::{Deserialize, Serialize};
use shared_types::{Event, EventId, Guest, GuestId, RsvpId, RsvpStatus};
use tracing::{info, warn};

/// One recorded guest response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedResponse {
    pub guest_id: GuestId,
    pub event_id: EventId,
    pub status: RsvpStatus,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub events: Vec<Event>,
    pub guests: Vec<Guest>,
    pub responses: Vec<SeedResponse>,
}

/// A ticket issued while seeding, printed for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedTicket {
    pub rsvp_id: RsvpId,
    pub guest_id: GuestId,
    pub event_id: EventId,
    pub token: String,
    pub delivered: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub events: usize,
    pub guests: usize,
    pub responses: usize,
    pub tickets: Vec<IssuedTicket>,
}

impl SeedData {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Seed data is not valid JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid seed file {}", path.display()))
    }
}

/// Load events and guests, then record every response through the service.
///
/// Stops at the first store error; a failed delivery only marks the ticket
/// as undelivered.
pub async fn apply<S, D>(seed: &SeedData, service: &TicketingService<S, D>) -> Result<SeedReport>
where
    S: EntityStoreApi,
    D: TicketDelivery,
{
    let store = service.store();
    for event in &seed.events {
        store
            .upsert_event(event.clone())
            .with_context(|| format!("Failed to load event {}", event.id))?;
    }
    for guest in &seed.guests {
        store
            .upsert_guest(guest.clone())
            .with_context(|| format!("Failed to load guest {}", guest.id))?;
    }

    let mut tickets = Vec::new();
    for response in &seed.responses {
        let outcome = service
            .respond(
                &response.guest_id,
                &response.event_id,
                response.status,
                response.message.clone(),
            )
            .await
            .with_context(|| format!("Failed to record response of {}", response.guest_id))?;
        if let Some(token) = outcome.token {
            if !outcome.delivered {
                warn!(rsvp_id = %outcome.rsvp.id, "Seeded ticket not delivered");
            }
            tickets.push(IssuedTicket {
                rsvp_id: outcome.rsvp.id,
                guest_id: outcome.rsvp.guest_id,
                event_id: outcome.rsvp.event_id,
                token,
                delivered: outcome.delivered,
            });
        }
    }

    info!(
        events = seed.events.len(),
        guests = seed.guests.len(),
        responses = seed.responses.len(),
        tickets = tickets.len(),
        "Seed data applied"
    );
    Ok(SeedReport {
        events: seed.events.len(),
        guests: seed.guests.len(),
        responses: seed.responses.len(),
        tickets,
    })
}
