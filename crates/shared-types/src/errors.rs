//! # Error Types
//!
//! Parsing errors for the shared entity types.

use thiserror::Error;

/// An RSVP status string did not name a known status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown RSVP status: {value:?} (expected pending, yes, no or maybe)")]
pub struct ParseStatusError {
    /// The rejected input.
    pub value: String,
}
