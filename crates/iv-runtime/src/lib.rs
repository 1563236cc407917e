//! # Invitii Door-Station Runtime
//!
//! Wires the check-in subsystems into one process.
//!
//! ## Modules
//!
//! - `config/` - Secret and ticketing settings from the environment
//! - `seed/` - JSON fixture of events, guests and responses
//! - `door/` - Line-oriented scan loop
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry
//! 2. Load configuration; a missing or short ticket secret is fatal
//! 3. Build the entity store and ticketing service
//! 4. Apply seed data (issuing tickets for "yes" responses)
//! 5. Scan tokens from stdin until EOF or Ctrl+C

pub mod config;
pub mod door;
pub mod seed;

use std::sync::Arc;

use iv_01_entity_store::{InMemoryEntityStore, SystemTimeSource};
use iv_02_ticketing::{LoggingTicketDelivery, TicketingService};
use shared_crypto::HmacTicketSigner;

use crate::config::RuntimeConfig;

/// Ticketing service as wired by the door station.
pub type DoorService = TicketingService<InMemoryEntityStore, LoggingTicketDelivery>;

/// Build the store and service from configuration.
pub fn build_service(config: &RuntimeConfig) -> anyhow::Result<DoorService> {
    let time_source = Arc::new(SystemTimeSource);
    let store = Arc::new(InMemoryEntityStore::with_time_source(time_source.clone()));
    let signer = Arc::new(HmacTicketSigner::new(&config.secret)?);
    let service = TicketingService::new(
        config.ticketing.clone(),
        store,
        signer,
        Arc::new(LoggingTicketDelivery),
        time_source,
    )?;
    Ok(service)
}
