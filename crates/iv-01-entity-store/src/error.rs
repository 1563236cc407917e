//! Error types for the Entity Store

use shared_types::{EventId, GuestId};
use std::fmt;
use thiserror::Error;

/// Which collection a lookup missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Event,
    Guest,
    Rsvp,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Event => f.write_str("event"),
            EntityKind::Guest => f.write_str("guest"),
            EntityKind::Rsvp => f.write_str("rsvp"),
        }
    }
}

/// Why a record was in the wrong lifecycle stage for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidStateReason {
    /// RSVP status is not "yes".
    NotConfirmed,
    /// RSVP already carries a token; re-issuance needs a new RSVP.
    TokenAlreadyAttached,
    /// An empty token string was offered.
    EmptyToken,
    /// RSVP has been replaced by a newer response from the same guest.
    Superseded,
    /// RSVP has no token to redeem or deliver.
    NoToken,
    /// Guest's current RSVP was already redeemed at the door.
    AlreadyRedeemed,
    /// Event name or start changed after a ticket embedded them.
    EventLocked,
    /// Presented token is not the one attached to the RSVP.
    TokenMismatch,
}

impl fmt::Display for InvalidStateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidStateReason::NotConfirmed => "status is not confirmed",
            InvalidStateReason::TokenAlreadyAttached => "a token is already attached",
            InvalidStateReason::EmptyToken => "token is empty",
            InvalidStateReason::Superseded => "superseded by a newer RSVP",
            InvalidStateReason::NoToken => "no token has been issued",
            InvalidStateReason::AlreadyRedeemed => "ticket already redeemed",
            InvalidStateReason::EventLocked => "ticketed event fields are immutable",
            InvalidStateReason::TokenMismatch => "presented token was never issued for this RSVP",
        };
        f.write_str(text)
    }
}

/// Entity Store errors
///
/// None of these are transient: the same call against the same state fails
/// the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Referenced entity does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Guest points at an event the store does not know
    #[error("Guest {guest_id} references unknown event {event_id}")]
    Referential { guest_id: GuestId, event_id: EventId },

    /// Record belongs to a different event
    #[error("Event mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: EventId, actual: EventId },

    /// Operation attempted in the wrong lifecycle stage
    #[error("Invalid state for {subject}: {reason}")]
    InvalidState {
        subject: String,
        reason: InvalidStateReason,
    },
}

impl StoreError {
    pub(crate) fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn invalid(subject: impl fmt::Display, reason: InvalidStateReason) -> Self {
        StoreError::InvalidState {
            subject: subject.to_string(),
            reason,
        }
    }

    /// The lifecycle reason, if this is an `InvalidState` error.
    pub fn invalid_state_reason(&self) -> Option<InvalidStateReason> {
        match self {
            StoreError::InvalidState { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

/// Result type for entity store operations
pub type StoreResult<T> = Result<T, StoreError>;
