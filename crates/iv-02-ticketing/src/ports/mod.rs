//! Ports layer for Ticketing (Hexagonal Architecture)
//!
//! - `inbound`: `TicketingApi` driven by the door runtime and RSVP handlers
//! - `outbound`: clock and delivery channel

pub mod inbound;
pub mod outbound;

pub use inbound::{RsvpResponse, TicketingApi};
pub use outbound::{DeliveryRequest, TicketDelivery, TimeSource};
