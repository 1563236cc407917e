//! # Invitii Check-In Benchmarks
//!
//! | Group | Operation | Target |
//! |-------|-----------|--------|
//! | iv-02-codec | Token encode / decode | < 50µs |
//! | iv-02-checkin | Door scan, any outcome | < 100µs |
//! | iv-02-issuance | Batch issuance per event | < 1ms per guest |
//! | iv-01-entity-store | Redemption compare-and-set | < 10µs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use iv_01_entity_store::EntityStoreApi;
use iv_02_ticketing::{TicketPayload, TicketingApi};
use iv_tests::harness::{gala_start, Harness};
use shared_types::{EventId, RsvpStatus};
use std::time::Duration;
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    Runtime::new().expect("tokio runtime")
}

/// Gala harness at the door with `guests` confirmed and ticketed guests.
fn ticketed(rt: &Runtime, guests: usize) -> (Harness, Vec<String>) {
    let h = Harness::with_gala(guests);
    for i in 0..guests {
        h.store
            .record_rsvp(&format!("guest-{i}").into(), &"gala".into(), RsvpStatus::Yes, None)
            .expect("rsvp");
    }
    let tokens = rt
        .block_on(h.service.issue_for_event(&"gala".into()))
        .into_iter()
        .map(|(_, result)| result.expect("issue"))
        .collect();
    h.clock.set(gala_start());
    (h, tokens)
}

// ============================================================================
// Token codec
// ============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("iv-02-codec");

    let rt = runtime();
    let (h, tokens) = ticketed(&rt, 1);
    let rsvp = h.store.rsvp_by_token(&tokens[0]).expect("ticketed rsvp");
    let guest = h.store.guest(&rsvp.guest_id).expect("guest");
    let event = h.store.event(&rsvp.event_id).expect("event");
    let payload = TicketPayload::for_rsvp(&rsvp, &guest, &event, gala_start());
    let codec = h.service.codec();

    group.bench_function("encode", |b| b.iter(|| black_box(codec.encode(&payload))));
    group.bench_function("decode_valid", |b| {
        b.iter(|| black_box(codec.decode(&tokens[0]).is_ok()))
    });

    let mut tampered = tokens[0].clone();
    tampered.replace_range(10..11, if &tokens[0][10..11] == "A" { "B" } else { "A" });
    group.bench_function("decode_tampered", |b| {
        b.iter(|| black_box(codec.decode(&tampered).is_err()))
    });

    group.finish();
}

// ============================================================================
// Door scans
// ============================================================================

fn bench_check_in(c: &mut Criterion) {
    let mut group = c.benchmark_group("iv-02-checkin");
    group.measurement_time(Duration::from_secs(5));

    let rt = runtime();
    let (h, tokens) = ticketed(&rt, 1);
    let gala = EventId::from("gala");
    let brunch = EventId::from("brunch");

    // First scan admits; every later scan walks the full path to AlreadyUsed.
    assert!(h.service.check_in(&tokens[0], &gala).is_admitted());
    group.bench_function("already_used", |b| {
        b.iter(|| black_box(h.service.check_in(&tokens[0], &gala)))
    });
    group.bench_function("wrong_event", |b| {
        b.iter(|| black_box(h.service.check_in(&tokens[0], &brunch)))
    });
    group.bench_function("malformed", |b| {
        b.iter(|| black_box(h.service.check_in("not-a-ticket", &gala)))
    });

    for size in [10usize, 100, 500] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("admit_fresh_batch", size), &size, |b, &size| {
            b.iter_batched(
                || ticketed(&rt, size),
                |(h, tokens)| {
                    let admitted = tokens
                        .iter()
                        .filter(|token| h.service.check_in(token, &gala).is_admitted())
                        .count();
                    black_box(admitted)
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Issuance
// ============================================================================

fn bench_issuance(c: &mut Criterion) {
    let mut group = c.benchmark_group("iv-02-issuance");
    let rt = runtime();

    for size in [10usize, 100] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("issue_for_event", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let h = Harness::with_gala(size);
                    for i in 0..size {
                        h.store
                            .record_rsvp(
                                &format!("guest-{i}").into(),
                                &"gala".into(),
                                RsvpStatus::Yes,
                                None,
                            )
                            .expect("rsvp");
                    }
                    h
                },
                |h| black_box(rt.block_on(h.service.issue_for_event(&"gala".into())).len()),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

// ============================================================================
// Entity store
// ============================================================================

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("iv-01-entity-store");
    let rt = runtime();
    let (h, tokens) = ticketed(&rt, 100);
    let rsvp_id = h.store.rsvp_by_token(&tokens[0]).expect("rsvp").id;
    h.store.try_redeem(&rsvp_id, gala_start()).expect("redeem");

    group.bench_function("try_redeem_lost_race", |b| {
        b.iter(|| black_box(h.store.try_redeem(&rsvp_id, gala_start())))
    });
    group.bench_function("rsvp_by_token", |b| {
        b.iter(|| black_box(h.store.rsvp_by_token(&tokens[50])))
    });
    group.bench_function("checked_in_count_100", |b| {
        b.iter(|| black_box(h.store.checked_in_count(&"gala".into())))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_codec,
    bench_check_in,
    bench_issuance,
    bench_store
);
criterion_main!(benches);
