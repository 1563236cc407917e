//! # Concurrency
//!
//! Racing door scanners and issuers on a multi-threaded runtime.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use futures::future::join_all;
    use iv_01_entity_store::EntityStoreApi;
    use iv_02_ticketing::{CheckInOutcome, TicketingApi};
    use shared_types::{EventId, RsvpStatus};

    use crate::harness::{gala_start, Harness};

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_racing_scanners_admit_exactly_once() {
        let h = Harness::with_gala(1);
        let token = h
            .service
            .respond(&"guest-0".into(), &"gala".into(), RsvpStatus::Yes, None)
            .await
            .unwrap()
            .token
            .unwrap();
        h.clock.set(gala_start());

        let token = Arc::new(token);
        let scans = (0..64).map(|_| {
            let service = Arc::clone(&h.service);
            let token = Arc::clone(&token);
            tokio::spawn(async move { service.validate(&token, &EventId::from("gala")).await })
        });
        let outcomes: Vec<CheckInOutcome> = join_all(scans)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();

        let admitted = outcomes.iter().filter(|o| o.is_admitted()).count();
        let used = outcomes
            .iter()
            .filter(|o| matches!(o, CheckInOutcome::AlreadyUsed { .. }))
            .count();
        assert_eq!(admitted, 1);
        assert_eq!(used, 63);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_parallel_guests_all_admitted() {
        let guests = 50;
        let h = Harness::with_gala(guests);
        for i in 0..guests {
            h.store
                .record_rsvp(&format!("guest-{i}").into(), &"gala".into(), RsvpStatus::Yes, None)
                .unwrap();
        }
        let tokens: Vec<String> = h
            .service
            .issue_for_event(&"gala".into())
            .await
            .into_iter()
            .map(|(_, result)| result.unwrap())
            .collect();
        h.clock.set(gala_start() + Duration::minutes(5));

        // Every ticket scanned twice, concurrently.
        let scans = tokens.iter().chain(tokens.iter()).cloned().map(|token| {
            let service = Arc::clone(&h.service);
            tokio::spawn(async move { service.validate(&token, &EventId::from("gala")).await })
        });
        let admitted = join_all(scans)
            .await
            .into_iter()
            .filter(|joined| joined.as_ref().unwrap().is_admitted())
            .count();

        assert_eq!(admitted, guests);
        assert_eq!(h.store.checked_in_count(&"gala".into()), guests);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_issuers_attach_one_token() {
        let h = Harness::with_gala(1);
        let rsvp = h
            .store
            .record_rsvp(&"guest-0".into(), &"gala".into(), RsvpStatus::Yes, None)
            .unwrap();

        let issues = (0..16).map(|_| {
            let service = Arc::clone(&h.service);
            let id = rsvp.id.clone();
            tokio::spawn(async move { service.issue(&id).await })
        });
        let issued: Vec<String> = join_all(issues)
            .await
            .into_iter()
            .filter_map(|joined| joined.unwrap().ok())
            .collect();

        assert_eq!(issued.len(), 1);
        assert_eq!(
            h.store.rsvp(&rsvp.id).unwrap().token.as_deref(),
            Some(issued[0].as_str())
        );
    }

    #[test]
    fn test_store_redeem_race_on_os_threads() {
        let h = Harness::with_gala(1);
        let rsvp = h
            .store
            .record_rsvp(&"guest-0".into(), &"gala".into(), RsvpStatus::Yes, None)
            .unwrap();
        h.store.attach_token(&rsvp.id, "opaque").unwrap();

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = Arc::clone(&h.store);
                let id = rsvp.id.clone();
                std::thread::spawn(move || store.try_redeem(&id, gala_start()).unwrap())
            })
            .collect();
        let wins = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);
    }
}
