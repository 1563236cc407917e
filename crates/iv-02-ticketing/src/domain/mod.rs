//! Domain layer for Ticketing
//!
//! Pure logic only: the ticket payload, its wire codec and the admission
//! outcome model. Nothing here touches the entity store.

pub mod codec;
pub mod outcome;
pub mod payload;

pub use codec::TokenCodec;
pub use outcome::{CheckInOutcome, RejectReason};
pub use payload::{TicketPayload, VerifiedTicket, TICKET_VERSION};
