//! Error types for the Ticketing subsystem

use iv_01_entity_store::StoreError;
use thiserror::Error;

/// Token could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Encoded token exceeds the configured maximum (QR capacity)
    #[error("Token too long: {len} characters, maximum {max}")]
    Oversized { len: usize, max: usize },

    /// Payload could not be rendered as JSON
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Scanned string is not a valid token.
///
/// Variants are checked in declaration order: a string is only reported as
/// `BadSignature` once it is well-formed and carries a supported version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Empty, oversized, not base64, not JSON or missing fields
    #[error("Malformed token: {0}")]
    Malformed(String),

    /// Format version this build does not understand
    #[error("Unsupported token version: {found}")]
    UnsupportedVersion { found: u64 },

    /// Signature missing, unparsable or not matching the payload
    #[error("Token signature does not match")]
    BadSignature,
}

/// Hand-off to the guest failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// No usable contact address
    #[error("Guest unreachable at {contact:?}")]
    Unreachable { contact: String },

    /// Channel refused or failed the message
    #[error("Delivery failed: {0}")]
    Failed(String),
}

/// Invalid ticketing configuration. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Grace window must be positive, got {0} seconds")]
    NonPositiveGraceWindow(i64),

    #[error("Grace window of {0} seconds is out of range")]
    GraceWindowOutOfRange(i64),

    #[error("Maximum token length {actual} is below the minimum {min}")]
    TokenLimitTooSmall { min: usize, actual: usize },
}

/// Issuance and delivery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Result type for ticketing operations
pub type TicketResult<T> = Result<T, TicketError>;
