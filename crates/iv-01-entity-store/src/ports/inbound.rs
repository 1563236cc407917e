//! Inbound port (driving API) for the Entity Store.

use chrono::{DateTime, Utc};
use shared_types::{Event, EventId, Guest, GuestId, Rsvp, RsvpId, RsvpStatus};

use crate::error::StoreResult;

/// Entity Store API
///
/// Synchronous: every operation is a single in-memory transition. Lookups
/// return owned clones so callers never hold a reference into the store.
pub trait EntityStoreApi: Send + Sync {
    // ---------------------------------------------------------------------
    // Writes
    // ---------------------------------------------------------------------

    /// Insert or replace an event by id.
    ///
    /// Fails with `InvalidState(EventLocked)` when a tokenized RSVP already
    /// references the event and the replacement changes its name or start.
    fn upsert_event(&self, event: Event) -> StoreResult<()>;

    /// Insert or replace a guest by id.
    fn upsert_guest(&self, guest: Guest) -> StoreResult<()>;

    /// Record a new current RSVP for `guest_id`, superseding any prior one.
    fn record_rsvp(
        &self,
        guest_id: &GuestId,
        event_id: &EventId,
        status: RsvpStatus,
        message: Option<String>,
    ) -> StoreResult<Rsvp>;

    /// Attach an issued token to a current, confirmed, untokenized RSVP.
    fn attach_token(&self, rsvp_id: &RsvpId, token: &str) -> StoreResult<()>;

    /// Compare-and-set the redemption flag.
    ///
    /// Returns `Ok(true)` for the single caller that flips it, `Ok(false)` for
    /// every later caller. Errors leave state untouched.
    fn try_redeem(&self, rsvp_id: &RsvpId, at: DateTime<Utc>) -> StoreResult<bool>;

    /// `try_redeem` for a scanned ticket: additionally fails with
    /// `InvalidState(TokenMismatch)` unless `token` is the attached token.
    fn try_redeem_token(
        &self,
        rsvp_id: &RsvpId,
        token: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<bool>;

    /// Take a guest off their event.
    ///
    /// The current RSVP is retired, so its ticket is rejected as superseded.
    /// Fails with `NotFound` for an unknown guest and
    /// `InvalidState(AlreadyRedeemed)` once the guest was admitted.
    fn remove_guest(&self, guest_id: &GuestId) -> StoreResult<Guest>;

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    fn event(&self, event_id: &EventId) -> Option<Event>;

    /// All events, ordered by start time.
    fn events(&self) -> Vec<Event>;

    fn guest(&self, guest_id: &GuestId) -> Option<Guest>;

    /// Guests of an event, ordered by id.
    fn guests_for_event(&self, event_id: &EventId) -> Vec<Guest>;

    /// Any RSVP by id, current or superseded.
    fn rsvp(&self, rsvp_id: &RsvpId) -> Option<Rsvp>;

    fn current_rsvp_for_guest(&self, guest_id: &GuestId) -> Option<Rsvp>;

    /// Every RSVP the guest recorded, oldest first.
    fn rsvp_history_for_guest(&self, guest_id: &GuestId) -> Vec<Rsvp>;

    /// Current RSVPs of an event's guests.
    fn rsvps_for_event(&self, event_id: &EventId) -> Vec<Rsvp>;

    fn rsvp_by_token(&self, token: &str) -> Option<Rsvp>;

    /// Number of guests of the event admitted at the door.
    fn checked_in_count(&self, event_id: &EventId) -> usize;
}
