//! Driven Ports (SPI - Outbound Dependencies)

use async_trait::async_trait;
use shared_types::{EventId, GuestId, RsvpId};

use crate::error::DeliveryError;

pub use iv_01_entity_store::TimeSource;

/// Everything a channel needs to hand a ticket to its guest.
#[derive(Clone, PartialEq, Eq)]
pub struct DeliveryRequest {
    pub rsvp_id: RsvpId,
    pub guest_id: GuestId,
    pub guest_name: String,
    pub contact: String,
    pub event_id: EventId,
    pub event_name: String,
    pub token: String,
}

impl std::fmt::Debug for DeliveryRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryRequest")
            .field("rsvp_id", &self.rsvp_id)
            .field("guest_id", &self.guest_id)
            .field("contact", &self.contact)
            .field("event_id", &self.event_id)
            .field("token_len", &self.token.len())
            .finish_non_exhaustive()
    }
}

/// Outbound message channel (SMS, e-mail, share sheet).
///
/// Called with no store lock held.
#[async_trait]
pub trait TicketDelivery: Send + Sync {
    async fn deliver(&self, request: DeliveryRequest) -> Result<(), DeliveryError>;
}
