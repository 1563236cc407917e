//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `EventId`, `GuestId`, `RsvpId`
//! - **Invitation**: `Event`, `Guest`
//! - **Attendance**: `Rsvp`, `RsvpStatus`

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ParseStatusError;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Opaque, globally unique event identifier. Never reused.
    EventId
);

string_id!(
    /// Guest identifier, unique across all events.
    GuestId
);

string_id!(
    /// RSVP identifier. A fresh one is minted for every recorded response,
    /// which is what invalidates tickets issued for a superseded response.
    RsvpId
);

impl RsvpId {
    /// Mint a fresh random RSVP identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

// =============================================================================
// CLUSTER B: INVITATION
// =============================================================================

/// An event guests are invited to.
///
/// `name` and `starts_at` are copied into every ticket, so the entity store
/// refuses to change them once a ticket references the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub starts_at: DateTime<Utc>,
    pub venue: String,
    pub host_id: String,
    #[serde(default)]
    pub description: String,
}

impl Event {
    pub fn new(
        id: impl Into<EventId>,
        name: impl Into<String>,
        starts_at: DateTime<Utc>,
        venue: impl Into<String>,
        host_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            starts_at,
            venue: venue.into(),
            host_id: host_id.into(),
            description: String::new(),
        }
    }

    /// True when both records agree on every field a ticket embeds.
    pub fn same_ticket_fields(&self, other: &Event) -> bool {
        self.id == other.id && self.name == other.name && self.starts_at == other.starts_at
    }
}

/// An invited guest. A guest belongs to exactly one event for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub event_id: EventId,
    /// Display name, printed on the ticket for offline checks at the door.
    pub name: String,
    /// Phone number or e-mail address used by the delivery channel.
    pub contact: String,
}

impl Guest {
    pub fn new(
        id: impl Into<GuestId>,
        event_id: impl Into<EventId>,
        name: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            event_id: event_id.into(),
            name: name.into(),
            contact: contact.into(),
        }
    }
}

// =============================================================================
// CLUSTER C: ATTENDANCE
// =============================================================================

/// A guest's answer to an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Pending,
    Yes,
    No,
    Maybe,
}

impl RsvpStatus {
    /// Wire name (`"yes"`, `"no"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            RsvpStatus::Pending => "pending",
            RsvpStatus::Yes => "yes",
            RsvpStatus::No => "no",
            RsvpStatus::Maybe => "maybe",
        }
    }

    /// Only confirmed attendance is ticketed.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, RsvpStatus::Yes)
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RsvpStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(RsvpStatus::Pending),
            "yes" => Ok(RsvpStatus::Yes),
            "no" => Ok(RsvpStatus::No),
            "maybe" => Ok(RsvpStatus::Maybe),
            _ => Err(ParseStatusError {
                value: s.to_string(),
            }),
        }
    }
}

/// A recorded RSVP.
///
/// `event_id` is denormalized from the guest. `redeemed_at` doubles as the
/// redemption flag: `Some` means the ticket has been used, and it never goes
/// back to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rsvp {
    pub id: RsvpId,
    pub guest_id: GuestId,
    pub event_id: EventId,
    pub status: RsvpStatus,
    pub message: Option<String>,
    pub token: Option<String>,
    pub redeemed_at: Option<DateTime<Utc>>,
    pub responded_at: DateTime<Utc>,
}

impl Rsvp {
    /// A fresh, untokenized, unredeemed response.
    pub fn new(
        guest_id: GuestId,
        event_id: EventId,
        status: RsvpStatus,
        message: Option<String>,
        responded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: RsvpId::generate(),
            guest_id,
            event_id,
            status,
            message,
            token: None,
            redeemed_at: None,
            responded_at,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_redeemed(&self) -> bool {
        self.redeemed_at.is_some()
    }
}
