//! Driving Ports (API - Inbound)

use async_trait::async_trait;
use shared_types::{EventId, GuestId, Rsvp, RsvpId, RsvpStatus};

use crate::domain::outcome::CheckInOutcome;
use crate::error::TicketResult;

/// Result of recording a guest's response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpResponse {
    /// The new current RSVP, with its token if one was issued.
    pub rsvp: Rsvp,
    /// Issued token for a "yes" response.
    pub token: Option<String>,
    /// Whether the delivery channel accepted the token. A failed delivery
    /// keeps the token; retry with `redeliver`.
    pub delivered: bool,
}

/// Primary Ticketing API
///
/// Issuance and validation are synchronous in-memory work; the async surface
/// exists for the delivery hand-off and for callers on an async runtime.
#[async_trait]
pub trait TicketingApi: Send + Sync {
    /// Mint, sign and attach a token for a current, confirmed RSVP.
    async fn issue(&self, rsvp_id: &RsvpId) -> TicketResult<String>;

    /// Issue for every current "yes" RSVP of the event that lacks a token.
    async fn issue_for_event(&self, event_id: &EventId) -> Vec<(RsvpId, TicketResult<String>)>;

    /// Record a response and, for "yes", issue and deliver a ticket.
    async fn respond(
        &self,
        guest_id: &GuestId,
        event_id: &EventId,
        status: RsvpStatus,
        message: Option<String>,
    ) -> TicketResult<RsvpResponse>;

    /// Send the existing token of a current RSVP again.
    async fn redeliver(&self, rsvp_id: &RsvpId) -> TicketResult<()>;

    /// Decide admission for a token scanned at `event_id`'s door.
    async fn validate(&self, token: &str, event_id: &EventId) -> CheckInOutcome;
}
