//! Entity Store Service
//!
//! `InMemoryEntityStore` guards one `StoreState` with a `parking_lot::RwLock`.
//! Each write takes the lock once, so the redemption compare-and-set and the
//! index maintenance around it are a single critical section.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use shared_types::{Event, EventId, Guest, GuestId, Rsvp, RsvpId, RsvpStatus};
use tracing::debug;

use crate::adapters::SystemTimeSource;
use crate::domain::StoreState;
use crate::error::StoreResult;
use crate::ports::inbound::EntityStoreApi;
use crate::ports::outbound::TimeSource;

/// Thread-safe in-memory entity store.
pub struct InMemoryEntityStore {
    state: RwLock<StoreState>,
    time_source: Arc<dyn TimeSource>,
}

impl InMemoryEntityStore {
    /// Empty store stamping responses with the system clock.
    pub fn new() -> Self {
        Self::with_time_source(Arc::new(SystemTimeSource))
    }

    pub fn with_time_source(time_source: Arc<dyn TimeSource>) -> Self {
        Self {
            state: RwLock::new(StoreState::new()),
            time_source,
        }
    }
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStoreApi for InMemoryEntityStore {
    fn upsert_event(&self, event: Event) -> StoreResult<()> {
        let event_id = event.id.clone();
        self.state.write().upsert_event(event)?;
        debug!(event_id = %event_id, "Event upserted");
        Ok(())
    }

    fn upsert_guest(&self, guest: Guest) -> StoreResult<()> {
        let guest_id = guest.id.clone();
        let event_id = guest.event_id.clone();
        self.state.write().upsert_guest(guest)?;
        debug!(guest_id = %guest_id, event_id = %event_id, "Guest upserted");
        Ok(())
    }

    fn record_rsvp(
        &self,
        guest_id: &GuestId,
        event_id: &EventId,
        status: RsvpStatus,
        message: Option<String>,
    ) -> StoreResult<Rsvp> {
        let responded_at = self.time_source.now();
        let rsvp = self
            .state
            .write()
            .record_rsvp(guest_id, event_id, status, message, responded_at)?;
        debug!(
            rsvp_id = %rsvp.id,
            guest_id = %guest_id,
            status = %status,
            "RSVP recorded"
        );
        Ok(rsvp)
    }

    fn attach_token(&self, rsvp_id: &RsvpId, token: &str) -> StoreResult<()> {
        self.state.write().attach_token(rsvp_id, token)?;
        debug!(rsvp_id = %rsvp_id, token_len = token.len(), "Token attached");
        Ok(())
    }

    fn try_redeem(&self, rsvp_id: &RsvpId, at: DateTime<Utc>) -> StoreResult<bool> {
        let flipped = self.state.write().try_redeem(rsvp_id, at)?;
        debug!(rsvp_id = %rsvp_id, flipped, "Redemption attempted");
        Ok(flipped)
    }

    fn try_redeem_token(
        &self,
        rsvp_id: &RsvpId,
        token: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let flipped = self.state.write().try_redeem_token(rsvp_id, token, at)?;
        debug!(rsvp_id = %rsvp_id, flipped, "Redemption attempted with token");
        Ok(flipped)
    }

    fn remove_guest(&self, guest_id: &GuestId) -> StoreResult<Guest> {
        let guest = self.state.write().remove_guest(guest_id)?;
        debug!(guest_id = %guest_id, event_id = %guest.event_id, "Guest removed");
        Ok(guest)
    }

    fn event(&self, event_id: &EventId) -> Option<Event> {
        self.state.read().event(event_id).cloned()
    }

    fn events(&self) -> Vec<Event> {
        self.state.read().events().into_iter().cloned().collect()
    }

    fn guest(&self, guest_id: &GuestId) -> Option<Guest> {
        self.state.read().guest(guest_id).cloned()
    }

    fn guests_for_event(&self, event_id: &EventId) -> Vec<Guest> {
        self.state
            .read()
            .guests_for_event(event_id)
            .into_iter()
            .cloned()
            .collect()
    }

    fn rsvp(&self, rsvp_id: &RsvpId) -> Option<Rsvp> {
        self.state.read().rsvp(rsvp_id).cloned()
    }

    fn current_rsvp_for_guest(&self, guest_id: &GuestId) -> Option<Rsvp> {
        self.state.read().current_rsvp_for_guest(guest_id).cloned()
    }

    fn rsvp_history_for_guest(&self, guest_id: &GuestId) -> Vec<Rsvp> {
        self.state
            .read()
            .rsvp_history_for_guest(guest_id)
            .into_iter()
            .cloned()
            .collect()
    }

    fn rsvps_for_event(&self, event_id: &EventId) -> Vec<Rsvp> {
        self.state
            .read()
            .rsvps_for_event(event_id)
            .into_iter()
            .cloned()
            .collect()
    }

    fn rsvp_by_token(&self, token: &str) -> Option<Rsvp> {
        self.state.read().rsvp_by_token(token).cloned()
    }

    fn checked_in_count(&self, event_id: &EventId) -> usize {
        self.state.read().checked_in_count(event_id)
    }
}
