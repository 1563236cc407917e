//! Delivery channel adapters.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

use crate::error::DeliveryError;
use crate::ports::outbound::{DeliveryRequest, TicketDelivery};

/// Logs each hand-off instead of sending it.
///
/// Used by the door-station runtime, where tokens are printed for the
/// operator rather than messaged to guests.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingTicketDelivery;

#[async_trait]
impl TicketDelivery for LoggingTicketDelivery {
    async fn deliver(&self, request: DeliveryRequest) -> Result<(), DeliveryError> {
        if request.contact.trim().is_empty() {
            return Err(DeliveryError::Unreachable {
                contact: request.contact,
            });
        }
        info!(
            rsvp_id = %request.rsvp_id,
            guest = %request.guest_name,
            contact = %request.contact,
            event = %request.event_name,
            token_len = request.token.len(),
            "Ticket handed to delivery channel"
        );
        Ok(())
    }
}

/// Captures deliveries in memory. Can be switched to fail.
#[derive(Debug, Default)]
pub struct RecordingTicketDelivery {
    delivered: Mutex<Vec<DeliveryRequest>>,
    failing: AtomicBool,
}

impl RecordingTicketDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every delivery fails and nothing is recorded.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn deliveries(&self) -> Vec<DeliveryRequest> {
        self.delivered.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().len()
    }
}

#[async_trait]
impl TicketDelivery for RecordingTicketDelivery {
    async fn deliver(&self, request: DeliveryRequest) -> Result<(), DeliveryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError::Failed("channel unavailable".to_string()));
        }
        self.delivered.lock().push(request);
        Ok(())
    }
}
