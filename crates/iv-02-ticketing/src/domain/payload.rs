//! Ticket payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{Event, EventId, Guest, GuestId, Rsvp, RsvpId};

/// Current wire format version.
pub const TICKET_VERSION: u64 = 1;

/// Unsigned ticket contents.
///
/// Guest and event names are embedded so door staff can cross-check the
/// holder without a lookup. Field order here is the signing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPayload {
    pub version: u64,
    pub rsvp_id: RsvpId,
    pub event_id: EventId,
    pub guest_id: GuestId,
    pub guest_name: String,
    pub event_name: String,
    pub event_start_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
}

impl TicketPayload {
    /// Build a current-version payload for a confirmed RSVP.
    pub fn for_rsvp(rsvp: &Rsvp, guest: &Guest, event: &Event, issued_at: DateTime<Utc>) -> Self {
        Self {
            version: TICKET_VERSION,
            rsvp_id: rsvp.id.clone(),
            event_id: event.id.clone(),
            guest_id: guest.id.clone(),
            guest_name: guest.name.clone(),
            event_name: event.name.clone(),
            event_start_at: event.starts_at,
            issued_at,
        }
    }
}

/// A payload whose signature has been checked.
///
/// Only [`TokenCodec::decode`](crate::domain::codec::TokenCodec::decode)
/// constructs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedTicket {
    payload: TicketPayload,
}

impl VerifiedTicket {
    pub(crate) fn new(payload: TicketPayload) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &TicketPayload {
        &self.payload
    }

    pub fn into_payload(self) -> TicketPayload {
        self.payload
    }

    pub fn rsvp_id(&self) -> &RsvpId {
        &self.payload.rsvp_id
    }

    pub fn event_id(&self) -> &EventId {
        &self.payload.event_id
    }

    pub fn guest_name(&self) -> &str {
        &self.payload.guest_name
    }

    pub fn event_start_at(&self) -> DateTime<Utc> {
        self.payload.event_start_at
    }
}
