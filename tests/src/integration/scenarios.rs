//! # Door Scenarios
//!
//! Dated walk-throughs against the gala starting 2025-06-01T18:00Z with the
//! default one-day grace window.

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use iv_01_entity_store::EntityStoreApi;
    use iv_02_ticketing::{CheckInOutcome, RejectReason, TicketingApi, TicketingConfig};
    use shared_types::{EventId, RsvpStatus};

    use crate::harness::{gala_start, Harness};

    async fn ticket(h: &Harness, guest: &str) -> String {
        h.service
            .respond(&guest.into(), &EventId::from("gala"), RsvpStatus::Yes, None)
            .await
            .unwrap()
            .token
            .unwrap()
    }

    #[tokio::test]
    async fn scenario_scan_during_event_then_rescan() {
        let h = Harness::with_gala(1);
        let token = ticket(&h, "guest-0").await;

        h.clock.set(Utc.with_ymd_and_hms(2025, 6, 1, 19, 0, 0).unwrap());
        assert!(h.service.validate(&token, &"gala".into()).await.is_admitted());
        assert!(matches!(
            h.service.validate(&token, &"gala".into()).await,
            CheckInOutcome::AlreadyUsed { .. }
        ));
    }

    #[tokio::test]
    async fn scenario_scan_two_days_later_is_expired() {
        let h = Harness::with_gala(1);
        let token = ticket(&h, "guest-0").await;

        h.clock.set(Utc.with_ymd_and_hms(2025, 6, 3, 0, 0, 0).unwrap());
        assert_eq!(
            h.service.validate(&token, &"gala".into()).await,
            CheckInOutcome::invalid(RejectReason::Expired)
        );
        assert_eq!(h.store.checked_in_count(&"gala".into()), 0);
    }

    #[tokio::test]
    async fn scenario_early_arrival_is_admitted() {
        let h = Harness::with_gala(1);
        let token = ticket(&h, "guest-0").await;

        h.clock.set(gala_start() - Duration::hours(3));
        assert!(h.service.validate(&token, &"gala".into()).await.is_admitted());
    }

    #[tokio::test]
    async fn scenario_brunch_door_rejects_gala_ticket() {
        let h = Harness::with_gala(1);
        let token = ticket(&h, "guest-0").await;
        h.clock.set(gala_start());

        for _ in 0..3 {
            assert_eq!(
                h.service.validate(&token, &"brunch".into()).await,
                CheckInOutcome::invalid(RejectReason::WrongEvent)
            );
        }
        // Wrong-door scans never consumed the ticket.
        assert!(h.service.validate(&token, &"gala".into()).await.is_admitted());
    }

    #[tokio::test]
    async fn scenario_rescheduled_venue_keeps_tickets_valid() {
        let h = Harness::with_gala(1);
        let token = ticket(&h, "guest-0").await;

        let mut event = h.store.event(&"gala".into()).unwrap();
        event.venue = "Garden Pavilion".into();
        h.store.upsert_event(event.clone()).unwrap();

        event.starts_at = gala_start() + Duration::days(1);
        assert!(h.store.upsert_event(event).is_err());

        h.clock.set(gala_start());
        assert!(h.service.validate(&token, &"gala".into()).await.is_admitted());
    }

    #[tokio::test]
    async fn scenario_short_grace_window() {
        let h = Harness::with_config(
            TicketingConfig {
                grace_window_secs: 3600,
                ..TicketingConfig::default()
            },
            [0x2a; 32],
        );
        h.add_events();
        h.add_guest("late", "gala");
        let token = ticket(&h, "late").await;

        h.clock.set(gala_start() + Duration::minutes(61));
        assert_eq!(
            h.service.validate(&token, &"gala".into()).await,
            CheckInOutcome::invalid(RejectReason::Expired)
        );
    }

    #[tokio::test]
    async fn scenario_ticket_from_other_deployment() {
        let ours = Harness::with_gala(1);
        let theirs = Harness::with_config(TicketingConfig::default(), [0x77; 32]);
        theirs.add_events();
        theirs.add_guest("guest-0", "gala");
        let foreign = ticket(&theirs, "guest-0").await;

        ours.clock.set(gala_start());
        assert_eq!(
            ours.service.validate(&foreign, &"gala".into()).await,
            CheckInOutcome::invalid(RejectReason::BadSignature)
        );
    }
}
