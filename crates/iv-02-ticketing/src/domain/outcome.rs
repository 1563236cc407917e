//! Check-in outcomes reported to door hardware.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::RsvpId;

use crate::error::DecodeError;

/// Why a scan did not admit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectReason {
    Malformed,
    BadSignature,
    UnsupportedVersion,
    /// Ticket is for a different event than the scanning door
    WrongEvent,
    /// Scanned after event start plus the grace window
    Expired,
    /// Signed ticket for an RSVP the store does not know
    UnknownTicket,
    /// RSVP was superseded or is no longer redeemable
    Revoked,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Malformed => "malformed",
            RejectReason::BadSignature => "badSignature",
            RejectReason::UnsupportedVersion => "unsupportedVersion",
            RejectReason::WrongEvent => "wrongEvent",
            RejectReason::Expired => "expired",
            RejectReason::UnknownTicket => "unknownTicket",
            RejectReason::Revoked => "revoked",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&DecodeError> for RejectReason {
    fn from(err: &DecodeError) -> Self {
        match err {
            DecodeError::Malformed(_) => RejectReason::Malformed,
            DecodeError::UnsupportedVersion { .. } => RejectReason::UnsupportedVersion,
            DecodeError::BadSignature => RejectReason::BadSignature,
        }
    }
}

/// Result of scanning one token.
///
/// Serialized with an `outcome` tag:
///
/// ```json
/// {"outcome":"admitted","guestName":"Ada","rsvpId":"..."}
/// {"outcome":"alreadyUsed","guestName":"Ada","rsvpId":"..."}
/// {"outcome":"invalid","reason":"expired"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum CheckInOutcome {
    /// First successful scan; the guest may enter.
    #[serde(rename_all = "camelCase")]
    Admitted { guest_name: String, rsvp_id: RsvpId },

    /// Genuine ticket that has already been used.
    #[serde(rename_all = "camelCase")]
    AlreadyUsed { guest_name: String, rsvp_id: RsvpId },

    /// Rejected without touching redemption state.
    Invalid { reason: RejectReason },
}

impl CheckInOutcome {
    pub fn invalid(reason: RejectReason) -> Self {
        CheckInOutcome::Invalid { reason }
    }

    pub fn is_admitted(&self) -> bool {
        matches!(self, CheckInOutcome::Admitted { .. })
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            CheckInOutcome::Invalid { reason } => Some(*reason),
            _ => None,
        }
    }

    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            CheckInOutcome::Admitted { .. } => "admitted",
            CheckInOutcome::AlreadyUsed { .. } => "already_used",
            CheckInOutcome::Invalid { .. } => "invalid",
        }
    }
}
