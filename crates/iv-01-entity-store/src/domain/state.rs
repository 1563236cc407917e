//! # Store State
//!
//! Primary maps keyed by id plus the secondary indexes that replace linear
//! scans:
//!
//! | Index | Key | Value |
//! |-------|-----|-------|
//! | `guests_by_event` | event id | guest ids (ordered) |
//! | `current_by_guest` | guest id | current RSVP id |
//! | `history_by_guest` | guest id | all RSVP ids, oldest first |
//! | `rsvp_by_token` | token string | RSVP id |
//! | `ticketed_events` | event id | present once any RSVP is tokenized |
//!
//! Every method updates maps and indexes together, so a caller holding the
//! state exclusively always observes them consistent.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Utc};
use shared_types::{Event, EventId, Guest, GuestId, Rsvp, RsvpId, RsvpStatus};

use crate::error::{EntityKind, InvalidStateReason, StoreError, StoreResult};

/// Events, guests and RSVPs with their indexes.
#[derive(Debug, Default)]
pub struct StoreState {
    events: HashMap<EventId, Event>,
    guests: HashMap<GuestId, Guest>,
    rsvps: HashMap<RsvpId, Rsvp>,
    guests_by_event: HashMap<EventId, BTreeSet<GuestId>>,
    current_by_guest: HashMap<GuestId, RsvpId>,
    history_by_guest: HashMap<GuestId, Vec<RsvpId>>,
    rsvp_by_token: HashMap<String, RsvpId>,
    ticketed_events: HashSet<EventId>,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    pub fn upsert_event(&mut self, event: Event) -> StoreResult<()> {
        if let Some(existing) = self.events.get(&event.id) {
            if self.ticketed_events.contains(&event.id) && !existing.same_ticket_fields(&event) {
                return Err(StoreError::invalid(
                    &event.id,
                    InvalidStateReason::EventLocked,
                ));
            }
        }
        self.events.insert(event.id.clone(), event);
        Ok(())
    }

    pub fn upsert_guest(&mut self, guest: Guest) -> StoreResult<()> {
        if !self.events.contains_key(&guest.event_id) {
            return Err(StoreError::Referential {
                guest_id: guest.id.clone(),
                event_id: guest.event_id.clone(),
            });
        }
        if let Some(existing) = self.guests.get(&guest.id) {
            if existing.event_id != guest.event_id {
                return Err(StoreError::Mismatch {
                    expected: existing.event_id.clone(),
                    actual: guest.event_id.clone(),
                });
            }
        }
        self.guests_by_event
            .entry(guest.event_id.clone())
            .or_default()
            .insert(guest.id.clone());
        self.guests.insert(guest.id.clone(), guest);
        Ok(())
    }

    /// Create a new current RSVP for the guest.
    ///
    /// The prior current RSVP stays in the history but is no longer current,
    /// which revokes any token it carried. A guest already admitted at the
    /// door cannot respond again.
    pub fn record_rsvp(
        &mut self,
        guest_id: &GuestId,
        event_id: &EventId,
        status: RsvpStatus,
        message: Option<String>,
        responded_at: DateTime<Utc>,
    ) -> StoreResult<Rsvp> {
        let guest = self
            .guests
            .get(guest_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Guest, guest_id))?;
        if !self.events.contains_key(event_id) {
            return Err(StoreError::not_found(EntityKind::Event, event_id));
        }
        if &guest.event_id != event_id {
            return Err(StoreError::Mismatch {
                expected: guest.event_id.clone(),
                actual: event_id.clone(),
            });
        }
        if let Some(current) = self.current_rsvp_for_guest(guest_id) {
            if current.is_redeemed() {
                return Err(StoreError::invalid(
                    guest_id,
                    InvalidStateReason::AlreadyRedeemed,
                ));
            }
        }

        let rsvp = Rsvp::new(
            guest_id.clone(),
            event_id.clone(),
            status,
            message,
            responded_at,
        );
        self.current_by_guest
            .insert(guest_id.clone(), rsvp.id.clone());
        self.history_by_guest
            .entry(guest_id.clone())
            .or_default()
            .push(rsvp.id.clone());
        self.rsvps.insert(rsvp.id.clone(), rsvp.clone());
        Ok(rsvp)
    }

    /// Remove a guest from their event's list.
    ///
    /// The guest's current RSVP stops being current, so its ticket no longer
    /// redeems; the RSVP history is kept for audit. Refused once the guest has
    /// been admitted.
    pub fn remove_guest(&mut self, guest_id: &GuestId) -> StoreResult<Guest> {
        if !self.guests.contains_key(guest_id) {
            return Err(StoreError::not_found(EntityKind::Guest, guest_id));
        }
        if self
            .current_rsvp_for_guest(guest_id)
            .is_some_and(Rsvp::is_redeemed)
        {
            return Err(StoreError::invalid(
                guest_id,
                InvalidStateReason::AlreadyRedeemed,
            ));
        }

        let guest = self
            .guests
            .remove(guest_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Guest, guest_id))?;
        if let Some(ids) = self.guests_by_event.get_mut(&guest.event_id) {
            ids.remove(guest_id);
        }
        self.current_by_guest.remove(guest_id);
        Ok(guest)
    }

    pub fn attach_token(&mut self, rsvp_id: &RsvpId, token: &str) -> StoreResult<()> {
        if token.is_empty() {
            return Err(StoreError::invalid(rsvp_id, InvalidStateReason::EmptyToken));
        }
        let is_current = self.is_current(rsvp_id);
        let rsvp = self
            .rsvps
            .get_mut(rsvp_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Rsvp, rsvp_id))?;
        if !is_current {
            return Err(StoreError::invalid(rsvp_id, InvalidStateReason::Superseded));
        }
        if !rsvp.status.is_confirmed() {
            return Err(StoreError::invalid(
                rsvp_id,
                InvalidStateReason::NotConfirmed,
            ));
        }
        if rsvp.has_token() {
            return Err(StoreError::invalid(
                rsvp_id,
                InvalidStateReason::TokenAlreadyAttached,
            ));
        }

        rsvp.token = Some(token.to_string());
        let event_id = rsvp.event_id.clone();
        self.rsvp_by_token.insert(token.to_string(), rsvp_id.clone());
        self.ticketed_events.insert(event_id);
        Ok(())
    }

    /// Compare-and-set on the redemption flag.
    pub fn try_redeem(&mut self, rsvp_id: &RsvpId, at: DateTime<Utc>) -> StoreResult<bool> {
        self.redeem(rsvp_id, None, at)
    }

    /// Compare-and-set that also requires `token` to be the attached token.
    pub fn try_redeem_token(
        &mut self,
        rsvp_id: &RsvpId,
        token: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        self.redeem(rsvp_id, Some(token), at)
    }

    fn redeem(
        &mut self,
        rsvp_id: &RsvpId,
        presented: Option<&str>,
        at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let is_current = self.is_current(rsvp_id);
        let rsvp = self
            .rsvps
            .get_mut(rsvp_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Rsvp, rsvp_id))?;
        if !is_current {
            return Err(StoreError::invalid(rsvp_id, InvalidStateReason::Superseded));
        }
        if !rsvp.status.is_confirmed() {
            return Err(StoreError::invalid(
                rsvp_id,
                InvalidStateReason::NotConfirmed,
            ));
        }
        if !rsvp.has_token() {
            return Err(StoreError::invalid(rsvp_id, InvalidStateReason::NoToken));
        }
        if presented.is_some_and(|token| rsvp.token.as_deref() != Some(token)) {
            return Err(StoreError::invalid(
                rsvp_id,
                InvalidStateReason::TokenMismatch,
            ));
        }
        if rsvp.is_redeemed() {
            return Ok(false);
        }
        rsvp.redeemed_at = Some(at);
        Ok(true)
    }

    // =========================================================================
    // READS
    // =========================================================================

    pub fn event(&self, event_id: &EventId) -> Option<&Event> {
        self.events.get(event_id)
    }

    pub fn events(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.values().collect();
        events.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then_with(|| a.id.cmp(&b.id)));
        events
    }

    pub fn guest(&self, guest_id: &GuestId) -> Option<&Guest> {
        self.guests.get(guest_id)
    }

    pub fn guests_for_event(&self, event_id: &EventId) -> Vec<&Guest> {
        self.guests_by_event
            .get(event_id)
            .map(|ids| ids.iter().filter_map(|id| self.guests.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn rsvp(&self, rsvp_id: &RsvpId) -> Option<&Rsvp> {
        self.rsvps.get(rsvp_id)
    }

    pub fn is_current(&self, rsvp_id: &RsvpId) -> bool {
        self.rsvps
            .get(rsvp_id)
            .and_then(|rsvp| self.current_by_guest.get(&rsvp.guest_id))
            .is_some_and(|current| current == rsvp_id)
    }

    pub fn current_rsvp_for_guest(&self, guest_id: &GuestId) -> Option<&Rsvp> {
        self.current_by_guest
            .get(guest_id)
            .and_then(|id| self.rsvps.get(id))
    }

    pub fn rsvp_history_for_guest(&self, guest_id: &GuestId) -> Vec<&Rsvp> {
        self.history_by_guest
            .get(guest_id)
            .map(|ids| ids.iter().filter_map(|id| self.rsvps.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn rsvps_for_event(&self, event_id: &EventId) -> Vec<&Rsvp> {
        self.guests_by_event
            .get(event_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|guest_id| self.current_rsvp_for_guest(guest_id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn rsvp_by_token(&self, token: &str) -> Option<&Rsvp> {
        self.rsvp_by_token
            .get(token)
            .and_then(|id| self.rsvps.get(id))
    }

    pub fn checked_in_count(&self, event_id: &EventId) -> usize {
        self.rsvps_for_event(event_id)
            .into_iter()
            .filter(|rsvp| rsvp.is_redeemed())
            .count()
    }
}
