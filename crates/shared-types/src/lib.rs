//! # Shared Types Crate
//!
//! Entities shared between the entity store (`iv-01`) and the ticketing
//! subsystem (`iv-02`).
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Event, Guest and RSVP are defined once here.
//! - **Typed Identifiers**: `EventId`, `GuestId` and `RsvpId` are distinct
//!   newtypes so an RSVP id can never be passed where an event id is expected.
//! - **Redemption by construction**: an RSVP's redemption flag and timestamp
//!   are one `Option`, so "timestamp present iff redeemed" cannot be violated.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
