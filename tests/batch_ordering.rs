//! Batch scheduler tests: ordering, grouping, pacing and cancellation.
//!
//! Uses a scripted in-memory source and tokio's paused clock, so sleeps
//! (pacing and simulated latency) complete instantly.

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use ip_enrich::batch::{run_batch, BatchStatus};
use ip_enrich::{BatchError, DetailRecord, DetailSource};
use proptest::prelude::*;
use tokio_util::sync::CancellationToken;

struct ScriptedSource {
    failures: HashSet<String>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    cancel_on_first_call: Option<CancellationToken>,
}

impl ScriptedSource {
    fn new(failures: HashSet<String>) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            cancel_on_first_call: None,
        }
    }
}

fn record_for(identifier: &str) -> DetailRecord {
    DetailRecord {
        country: format!("Country of {}", identifier),
        country_code: "ZZ".into(),
        region: "Region".into(),
        city: "City".into(),
        postal_code: "0000".into(),
        latitude: "0.5".into(),
        longitude: "0.5".into(),
        timezone: "UTC".into(),
        isp: "ISP".into(),
        organization: "Org".into(),
        autonomous_system: "AS64496 Example".into(),
        mobile: false,
        proxy: false,
        hosting: true,
    }
}

impl DetailSource for ScriptedSource {
    fn fetch_details(&self, identifier: &str) -> impl Future<Output = Option<DetailRecord>> + Send {
        let identifier = identifier.to_string();
        async move {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                if let Some(cancel) = &self.cancel_on_first_call {
                    cancel.cancel();
                }
            }
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            // Later identifiers finish first, scrambling completion order
            let last_octet: u64 = identifier
                .rsplit('.')
                .next()
                .and_then(|o| o.parse().ok())
                .unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(50 - (last_octet % 5) * 10)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if self.failures.contains(&identifier) {
                None
            } else {
                Some(record_for(&identifier))
            }
        }
    }
}

fn identifiers(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("198.51.100.{}", i)).collect()
}

#[tokio::test(start_paused = true)]
async fn test_seven_identifiers_in_groups_of_three() {
    let source = ScriptedSource::new(HashSet::new());
    let ids = identifiers(7);
    let result = run_batch(&source, &ids, 3, &CancellationToken::new())
        .await
        .expect("batch completes");

    assert_eq!(result.len(), 7);
    assert_eq!(source.calls.load(Ordering::SeqCst), 7);
    assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 3);
    assert_eq!(result.status(), BatchStatus::AllSucceeded);
    assert_eq!(result.identifiers().collect::<Vec<_>>(), ids);
}

#[tokio::test(start_paused = true)]
async fn test_pacing_only_between_groups() {
    // Latency-free source: the elapsed time is the pacing alone
    struct NoLatency;
    impl DetailSource for NoLatency {
        fn fetch_details(
            &self,
            identifier: &str,
        ) -> impl Future<Output = Option<DetailRecord>> + Send {
            let record = record_for(identifier);
            async move { Some(record) }
        }
    }

    let started = tokio::time::Instant::now();
    run_batch(&NoLatency, &identifiers(7), 3, &CancellationToken::new())
        .await
        .expect("batch completes");
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(40), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(45), "elapsed {:?}", elapsed);

    let started = tokio::time::Instant::now();
    run_batch(&NoLatency, &identifiers(3), 3, &CancellationToken::new())
        .await
        .expect("batch completes");
    assert!(started.elapsed() < Duration::from_millis(5));
}

#[tokio::test(start_paused = true)]
async fn test_failures_do_not_abort_group() {
    let ids = identifiers(6);
    let failures: HashSet<String> = [ids[0].clone(), ids[4].clone()].into_iter().collect();
    let source = ScriptedSource::new(failures);

    let result = run_batch(&source, &ids, 3, &CancellationToken::new())
        .await
        .expect("batch completes");
    assert_eq!(result.success_count(), 4);
    assert_eq!(result.failure_count(), 2);
    assert_eq!(result.status(), BatchStatus::WithFailures);
    assert!(!result.outcomes()[0].is_success());
    assert!(result.outcomes()[1].is_success());
    assert!(!result.outcomes()[4].is_success());
}

#[tokio::test(start_paused = true)]
async fn test_all_failures_is_valid_result() {
    let ids = identifiers(4);
    let source = ScriptedSource::new(ids.iter().cloned().collect());
    let result = run_batch(&source, &ids, 3, &CancellationToken::new())
        .await
        .expect("batch completes");
    assert_eq!(result.failure_count(), 4);
    assert_eq!(result.status(), BatchStatus::WithFailures);
}

#[tokio::test]
async fn test_empty_input() {
    let source = ScriptedSource::new(HashSet::new());
    let result = run_batch(&source, &[], 3, &CancellationToken::new())
        .await
        .expect("empty batch completes");
    assert!(result.is_empty());
    assert_eq!(result.status(), BatchStatus::Empty);
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_zero_group_size_rejected() {
    let source = ScriptedSource::new(HashSet::new());
    let err = run_batch(&source, &identifiers(2), 0, &CancellationToken::new())
        .await
        .expect_err("zero group size");
    assert!(matches!(err, BatchError::InvalidGroupSize));
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_blank_identifier_rejected() {
    let source = ScriptedSource::new(HashSet::new());
    let ids = vec!["192.0.2.1".to_string(), String::new()];
    let err = run_batch(&source, &ids, 3, &CancellationToken::new())
        .await
        .expect_err("blank identifier");
    assert!(matches!(err, BatchError::InvalidIdentifier { position: 1, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_before_start() {
    let source = ScriptedSource::new(HashSet::new());
    let cancel = CancellationToken::new();
    cancel.cancel();

    match run_batch(&source, &identifiers(5), 3, &cancel).await {
        Err(BatchError::Cancelled { partial, total }) => {
            assert!(partial.is_empty());
            assert_eq!(total, 5);
        }
        other => panic!("expected cancellation, got {:?}", other),
    }
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_lets_in_flight_group_finish() {
    let cancel = CancellationToken::new();
    let mut source = ScriptedSource::new(HashSet::new());
    source.cancel_on_first_call = Some(cancel.clone());
    let ids = identifiers(7);

    match run_batch(&source, &ids, 3, &cancel).await {
        Err(BatchError::Cancelled { partial, total }) => {
            assert_eq!(partial.len(), 3);
            assert_eq!(total, 7);
            assert_eq!(partial.identifiers().collect::<Vec<_>>(), ids[..3].to_vec());
        }
        other => panic!("expected cancellation, got {:?}", other),
    }
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_output_order_matches_input(
        mask in prop::collection::vec(any::<bool>(), 0..40),
        group_size in 1usize..6,
    ) {
        let ids = identifiers(mask.len());
        let failures: HashSet<String> = ids
            .iter()
            .zip(&mask)
            .filter(|(_, failed)| **failed)
            .map(|(id, _)| id.clone())
            .collect();
        let source = ScriptedSource::new(failures.clone());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .expect("runtime");
        let result = runtime
            .block_on(run_batch(&source, &ids, group_size, &CancellationToken::new()))
            .expect("batch completes");

        prop_assert_eq!(result.len(), ids.len());
        prop_assert_eq!(result.failure_count(), failures.len());
        prop_assert_eq!(result.success_count() + result.failure_count(), ids.len());
        for (outcome, (id, failed)) in result.outcomes().iter().zip(ids.iter().zip(&mask)) {
            prop_assert_eq!(outcome.identifier(), id.as_str());
            prop_assert_eq!(outcome.is_success(), !*failed);
            if let Some(record) = outcome.record() {
                prop_assert_eq!(&record.country, &format!("Country of {}", id));
            }
        }
    }
}
