//! Shared wiring for integration tests and benchmarks.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use iv_01_entity_store::{EntityStoreApi, FixedTimeSource, InMemoryEntityStore};
use iv_02_ticketing::{RecordingTicketDelivery, TicketingConfig, TicketingService};
use shared_crypto::{HmacTicketSigner, SigningKey};
use shared_types::{Event, Guest};

pub type Service = TicketingService<InMemoryEntityStore, RecordingTicketDelivery>;

/// Gala start used across scenarios: 2025-06-01T18:00:00Z.
pub fn gala_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap()
}

pub struct Harness {
    pub service: Arc<Service>,
    pub store: Arc<InMemoryEntityStore>,
    pub delivery: Arc<RecordingTicketDelivery>,
    pub clock: Arc<FixedTimeSource>,
}

impl Harness {
    /// Empty store, clock a week before the gala, default configuration.
    pub fn new() -> Self {
        Self::with_config(TicketingConfig::default(), [0x2a; 32])
    }

    pub fn with_config(config: TicketingConfig, key: [u8; 32]) -> Self {
        let clock = Arc::new(FixedTimeSource::new(gala_start() - chrono::Duration::days(7)));
        let store = Arc::new(InMemoryEntityStore::with_time_source(clock.clone()));
        let delivery = Arc::new(RecordingTicketDelivery::new());
        let signer = Arc::new(HmacTicketSigner::new(&SigningKey::from_bytes(&key).unwrap()).unwrap());
        let service = Arc::new(
            TicketingService::new(config, store.clone(), signer, delivery.clone(), clock.clone())
                .unwrap(),
        );
        Self {
            service,
            store,
            delivery,
            clock,
        }
    }

    /// Gala event "gala" plus a second event "brunch", with `guests` guests
    /// on the gala named `guest-0..`.
    pub fn with_gala(guests: usize) -> Self {
        let harness = Self::new();
        harness.add_events();
        for i in 0..guests {
            harness.add_guest(&format!("guest-{i}"), "gala");
        }
        harness
    }

    pub fn add_events(&self) {
        self.store
            .upsert_event(Event::new("gala", "Summer Gala", gala_start(), "Hall A", "host-1"))
            .unwrap();
        self.store
            .upsert_event(Event::new(
                "brunch",
                "Sunday Brunch",
                gala_start() + chrono::Duration::hours(16),
                "Cafe",
                "host-1",
            ))
            .unwrap();
    }

    pub fn add_guest(&self, id: &str, event: &str) {
        self.store
            .upsert_guest(Guest::new(id, event, format!("Guest {id}"), format!("{id}@example.com")))
            .unwrap();
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
