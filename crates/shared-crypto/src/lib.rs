//! # Shared Crypto - Ticket Signing Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `mac` | HMAC-SHA256 | Ticket authentication tags |
//!
//! ## Security Properties
//!
//! - **Keyed hash, not a cipher**: ticket payloads are public, only their
//!   integrity is protected.
//! - **Deterministic**: the same key and bytes always give the same tag.
//! - **Constant-time verification**: tag comparison never short-circuits.
//! - **Key hygiene**: key material is zeroized on drop and never printed.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod mac;

// Re-exports
pub use errors::CryptoError;
pub use mac::{HmacTicketSigner, SignatureTag, SigningKey, TicketSigner, MIN_KEY_LEN, TAG_LEN};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
