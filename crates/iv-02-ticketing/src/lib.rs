//! # Ticketing (iv-02)
//!
//! Turns a confirmed RSVP into a tamper-evident, single-use admission token
//! and decides admission when that token is scanned at the door.
//!
//! ## Guarantees
//!
//! | Property | Mechanism |
//! |----------|-----------|
//! | Authenticity | HMAC-SHA256 over every payload field, verified before any field is trusted |
//! | Event binding | Payload event id compared with the scanning door's event |
//! | Freshness | Signed event start plus a configurable grace window |
//! | Exactly-once admission | Store-level compare-and-set on the redemption flag |
//! | Revocation | A newer RSVP makes the old one non-current; its token stops admitting |
//!
//! ## Token Format (version 1)
//!
//! URL-safe unpadded base64 of a JSON object:
//!
//! ```text
//! { "version": 1, "rsvpId", "eventId", "guestId", "guestName", "eventName",
//!   "eventStartAt", "issuedAt", "signature": "<64 lowercase hex chars>" }
//! ```
//!
//! The signed message is the JSON rendering of each unsigned field, in the
//! order above, joined with `'\n'`.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Payload, codec and check-in outcome (pure)
//! - `ports/` - `TicketingApi` (inbound), `TicketDelivery` and `TimeSource` (outbound)
//! - `adapters/` - Delivery channels
//! - `service.rs` - Issuance and validation orchestration

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{LoggingTicketDelivery, RecordingTicketDelivery};
pub use config::TicketingConfig;
pub use domain::codec::TokenCodec;
pub use domain::outcome::{CheckInOutcome, RejectReason};
pub use domain::payload::{TicketPayload, VerifiedTicket, TICKET_VERSION};
pub use error::{ConfigError, DecodeError, DeliveryError, EncodeError, TicketError, TicketResult};
pub use ports::inbound::{RsvpResponse, TicketingApi};
pub use ports::outbound::{DeliveryRequest, TicketDelivery, TimeSource};
pub use service::TicketingService;
