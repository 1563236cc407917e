//! # Entity Store (iv-01)
//!
//! Authoritative in-memory collections of Events, Guests and RSVPs. The
//! ticketing subsystem (iv-02) reads from it and performs exactly two writes
//! through it: attaching a freshly issued token and redeeming one at the door.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforced by |
//! |----|-----------|-------------|
//! | 1 | Guest references an existing event | `upsert_guest` |
//! | 2 | Guest never changes event | `upsert_guest` |
//! | 3 | RSVP event equals guest event | `record_rsvp` |
//! | 4 | One current RSVP per guest | `record_rsvp` |
//! | 5 | Only confirmed, tokenized RSVPs are redeemable | `try_redeem` |
//! | 6 | Redemption is monotonic | `try_redeem` |
//! | 7 | Ticketed event fields are frozen | `upsert_event` |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Pure state transitions and secondary indexes
//! - `ports/` - `EntityStoreApi` (inbound) and `TimeSource` (outbound)
//! - `adapters/` - Clock implementations
//! - `service.rs` - Lock-guarded store implementing the API
//!
//! ## Usage
//!
//! ```ignore
//! use iv_01_entity_store::{EntityStoreApi, InMemoryEntityStore};
//!
//! let store = InMemoryEntityStore::new();
//! store.upsert_event(event)?;
//! store.upsert_guest(guest)?;
//! let rsvp = store.record_rsvp(&guest_id, &event_id, RsvpStatus::Yes, None)?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{FixedTimeSource, SystemTimeSource};
pub use domain::state::StoreState;
pub use error::{EntityKind, InvalidStateReason, StoreError, StoreResult};
pub use ports::inbound::EntityStoreApi;
pub use ports::outbound::TimeSource;
pub use service::InMemoryEntityStore;
