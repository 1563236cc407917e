//! # Integration Test Flows
//!
//! RSVP response through issuance, delivery and door validation, driven only
//! through the public ports of iv-01 and iv-02.
//!
//! ## Flows Tested:
//!
//! 1. **Respond yes -> deliver -> scan**: token reaches the guest and admits once
//! 2. **Maybe then yes**: only the latest response is ticketed
//! 3. **Delivery failure**: ticket survives, `redeliver` completes the hand-off
//! 4. **Batch issuance**: every confirmed guest ticketed once
//! 5. **Seed + door loop**: the runtime's fixture and scan loop end to end
//! 6. **Metrics**: issuance and scans show up in the Prometheus export
//! 7. **Guest removal**: an uninvited guest's ticket is revoked at the door

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use iv_01_entity_store::{EntityStoreApi, InvalidStateReason, StoreError};
    use iv_02_ticketing::{CheckInOutcome, RejectReason, TicketError, TicketingApi};
    use shared_types::{EventId, RsvpStatus};

    use crate::harness::{gala_start, Harness};

    fn gala() -> EventId {
        EventId::from("gala")
    }

    #[tokio::test]
    async fn test_respond_deliver_and_admit() {
        let h = Harness::with_gala(1);
        let response = h
            .service
            .respond(&"guest-0".into(), &gala(), RsvpStatus::Yes, Some("On my way".into()))
            .await
            .unwrap();
        assert!(response.delivered);

        // The guest scans what they were sent, not what the service returned.
        let delivered = h.delivery.deliveries();
        assert_eq!(delivered.len(), 1);
        let token = delivered[0].token.clone();

        h.clock.set(gala_start() + Duration::minutes(30));
        let outcome = h.service.validate(&token, &gala()).await;
        assert_eq!(
            outcome,
            CheckInOutcome::Admitted {
                guest_name: "Guest guest-0".into(),
                rsvp_id: response.rsvp.id.clone(),
            }
        );
        assert!(matches!(
            h.service.validate(&token, &gala()).await,
            CheckInOutcome::AlreadyUsed { .. }
        ));

        let stored = h.store.rsvp(&response.rsvp.id).unwrap();
        assert_eq!(stored.redeemed_at, Some(gala_start() + Duration::minutes(30)));
        assert_eq!(h.store.rsvp_by_token(&token).unwrap().id, stored.id);
    }

    #[tokio::test]
    async fn test_maybe_then_yes_tickets_latest_only() {
        let h = Harness::with_gala(1);
        let guest = "guest-0".into();
        let maybe = h
            .store
            .record_rsvp(&guest, &gala(), RsvpStatus::Maybe, None)
            .unwrap();
        let yes = h
            .store
            .record_rsvp(&guest, &gala(), RsvpStatus::Yes, None)
            .unwrap();

        assert_eq!(h.store.current_rsvp_for_guest(&guest).unwrap().id, yes.id);
        assert_eq!(h.store.rsvp_history_for_guest(&guest).len(), 2);

        let err = h.service.issue(&maybe.id).await.unwrap_err();
        assert!(matches!(
            err,
            TicketError::Store(StoreError::InvalidState {
                reason: InvalidStateReason::Superseded,
                ..
            })
        ));
        let token = h.service.issue(&yes.id).await.unwrap();
        h.clock.set(gala_start());
        assert!(h.service.validate(&token, &gala()).await.is_admitted());
    }

    #[tokio::test]
    async fn test_declining_after_confirming_revokes_ticket() {
        let h = Harness::with_gala(1);
        let guest = "guest-0".into();
        let yes = h
            .service
            .respond(&guest, &gala(), RsvpStatus::Yes, None)
            .await
            .unwrap();
        h.service
            .respond(&guest, &gala(), RsvpStatus::No, Some("Sorry".into()))
            .await
            .unwrap();

        h.clock.set(gala_start());
        assert_eq!(
            h.service.validate(yes.token.as_deref().unwrap(), &gala()).await,
            CheckInOutcome::invalid(RejectReason::Revoked)
        );
        assert_eq!(h.store.checked_in_count(&gala()), 0);
    }

    #[tokio::test]
    async fn test_delivery_failure_then_redeliver() {
        let h = Harness::with_gala(1);
        h.delivery.set_failing(true);
        let response = h
            .service
            .respond(&"guest-0".into(), &gala(), RsvpStatus::Yes, None)
            .await
            .unwrap();
        assert!(!response.delivered);
        assert_eq!(h.delivery.count(), 0);
        let token = response.token.clone().unwrap();
        assert_eq!(
            h.store.rsvp(&response.rsvp.id).unwrap().token.as_deref(),
            Some(token.as_str())
        );

        h.delivery.set_failing(false);
        h.service.redeliver(&response.rsvp.id).await.unwrap();
        assert_eq!(h.delivery.deliveries()[0].token, token);

        h.clock.set(gala_start());
        assert!(h.service.validate(&token, &gala()).await.is_admitted());
    }

    #[tokio::test]
    async fn test_batch_issuance_for_event() {
        let h = Harness::with_gala(5);
        for i in 0..5 {
            let status = if i % 2 == 0 { RsvpStatus::Yes } else { RsvpStatus::Maybe };
            h.store
                .record_rsvp(&format!("guest-{i}").into(), &gala(), status, None)
                .unwrap();
        }

        let results = h.service.issue_for_event(&gala()).await;
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|(_, r)| r.is_ok()));
        assert!(h.service.issue_for_event(&gala()).await.is_empty());

        h.clock.set(gala_start());
        for (_, token) in results {
            assert!(h.service.validate(&token.unwrap(), &gala()).await.is_admitted());
        }
        assert_eq!(h.store.checked_in_count(&gala()), 3);
    }

    #[tokio::test]
    async fn test_seed_and_door_loop() {
        use iv_runtime::{door, seed};

        let h = Harness::new();
        let data = seed::SeedData::from_json(
            r#"{
                "events": [{"id": "gala", "name": "Summer Gala", "starts_at": "2025-06-01T18:00:00Z",
                            "venue": "Hall A", "host_id": "host-1"}],
                "guests": [
                    {"id": "ada", "event_id": "gala", "name": "Ada", "contact": "ada@example.com"},
                    {"id": "bob", "event_id": "gala", "name": "Bob", "contact": "bob@example.com"}
                ],
                "responses": [
                    {"guest_id": "ada", "event_id": "gala", "status": "yes"},
                    {"guest_id": "bob", "event_id": "gala", "status": "yes"}
                ]
            }"#,
        )
        .unwrap();
        let report = seed::apply(&data, &*h.service).await.unwrap();
        assert_eq!(report.tickets.len(), 2);

        h.clock.set(gala_start() + Duration::hours(2));
        let input: String = report
            .tickets
            .iter()
            .map(|t| format!("{}\n", t.token))
            .collect();
        let mut output = Vec::new();
        let summary = door::run(&*h.service, Some(&gala()), input.as_bytes(), &mut output)
            .await
            .unwrap();

        assert_eq!(summary.admitted, 2);
        assert_eq!(h.store.checked_in_count(&gala()), 2);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains(r#""guestName":"Ada""#));
        assert!(text.contains(r#""guestName":"Bob""#));
    }

    #[tokio::test]
    async fn test_scans_are_counted_in_metrics() {
        // Registration may already have happened in this binary.
        let _ = iv_telemetry::register_metrics();
        let issued_before = iv_telemetry::TICKETS_ISSUED.get();
        let expired_before = iv_telemetry::CHECKIN_REJECTIONS
            .with_label_values(&["expired"])
            .get();

        let h = Harness::with_gala(1);
        let token = h
            .service
            .respond(&"guest-0".into(), &gala(), RsvpStatus::Yes, None)
            .await
            .unwrap()
            .token
            .unwrap();
        h.clock.set(gala_start() + Duration::days(3));
        h.service.validate(&token, &gala()).await;

        // Counters are process-wide and other tests run concurrently.
        assert!(iv_telemetry::TICKETS_ISSUED.get() > issued_before);
        assert!(
            iv_telemetry::CHECKIN_REJECTIONS
                .with_label_values(&["expired"])
                .get()
                > expired_before
        );
        let text = iv_telemetry::encode_metrics().unwrap();
        assert!(text.contains("iv_checkin_rejections_total"));
        assert!(text.contains("iv_tickets_issued_total"));
    }

    #[tokio::test]
    async fn test_removed_guest_ticket_is_revoked() {
        let h = Harness::with_gala(2);
        let mut tokens = Vec::new();
        for guest in ["guest-0", "guest-1"] {
            let response = h
                .service
                .respond(&guest.into(), &gala(), RsvpStatus::Yes, None)
                .await
                .unwrap();
            tokens.push(response.token.unwrap());
        }

        let removed = h.store.remove_guest(&"guest-0".into()).unwrap();
        assert_eq!(removed.name, "Guest guest-0");
        assert_eq!(h.store.guests_for_event(&gala()).len(), 1);
        assert_eq!(h.store.rsvps_for_event(&gala()).len(), 1);

        h.clock.set(gala_start());
        assert_eq!(
            h.service.validate(&tokens[0], &gala()).await,
            CheckInOutcome::invalid(RejectReason::Revoked)
        );
        assert!(h.service.validate(&tokens[1], &gala()).await.is_admitted());

        // Admitted guests stay on the list.
        let err = h.store.remove_guest(&"guest-1".into()).unwrap_err();
        assert_eq!(
            err.invalid_state_reason(),
            Some(InvalidStateReason::AlreadyRedeemed)
        );
        assert_eq!(h.store.checked_in_count(&gala()), 1);
    }
}
