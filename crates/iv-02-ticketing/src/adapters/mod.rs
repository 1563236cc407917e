//! Adapters for Ticketing outbound ports

pub mod delivery;

pub use delivery::{LoggingTicketDelivery, RecordingTicketDelivery};
pub use iv_01_entity_store::{FixedTimeSource, SystemTimeSource};
