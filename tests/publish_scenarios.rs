//! End-to-end fan-out scenarios through the public library API.
//!
//! Every test runs with `NoPacing` so nothing sleeps; retries, ordering and
//! aggregation behave exactly as in production.

mod helpers;

use std::sync::Arc;

use publish_fanout::{
    summarize, AttemptStatus, Catalog, DestinationKind, FailureType, NoPacing, Orchestrator,
    SimulatedTransport, SuccessPolicy,
};

use helpers::{catalog, request, Behaviour, ScriptedTransport};

fn orchestrator(catalog: Catalog, transport: Arc<dyn publish_fanout::PublishTransport>) -> Orchestrator {
    Orchestrator::new(catalog, transport).with_pacing(Arc::new(NoPacing))
}

#[tokio::test]
async fn test_always_successful_destination() {
    let transport = Arc::new(SimulatedTransport::seeded(1, SuccessPolicy::uniform(1.0)));
    let results = orchestrator(catalog(&["Alpha"]), transport)
        .publish(&request(3))
        .await;

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert_eq!(result.site_name, "Alpha");
    assert_eq!(result.attempted, 3);
    assert_eq!(result.successful, 3);
    assert_eq!(result.failed, 0);
    assert_eq!(result.success_rate, 100);
    assert!(result.errors.is_empty());
}

#[tokio::test]
async fn test_always_failing_destination_uses_three_attempts_per_post() {
    let transport = Arc::new(ScriptedTransport::new(&[("Beta", Behaviour::Reject)]));
    let results = orchestrator(catalog(&["Beta"]), transport.clone())
        .publish(&request(2))
        .await;

    let result = &results[0];
    assert_eq!(result.attempted, 2);
    assert_eq!(result.successful, 0);
    assert_eq!(result.failed, 2);
    assert_eq!(result.success_rate, 0);
    assert_eq!(
        result.errors,
        vec![
            "Beta: failed after 3 attempts".to_string(),
            "Beta: failed after 3 attempts".to_string(),
        ]
    );
    assert_eq!(transport.calls_for("Beta"), 6);
}

#[tokio::test]
async fn test_fatal_destination_does_not_stop_the_run() {
    let transport = Arc::new(ScriptedTransport::new(&[("Second", Behaviour::Fatal)]));
    let orchestrator = orchestrator(catalog(&["First", "Second", "Third"]), transport.clone());
    let results = orchestrator.publish(&request(2)).await;

    let names: Vec<&str> = results.iter().map(|r| r.site_name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);

    assert_eq!(results[0].successful, 2);
    assert_eq!(results[2].successful, 2);

    let failed = &results[1];
    assert_eq!(failed.successful, 0);
    assert_eq!(failed.failed, 2);
    assert_eq!(failed.errors.len(), 1);
    assert!(failed.errors[0].starts_with("Second: "));
    assert!(failed.errors[0].contains("session crashed"));
    // Fatal is not retried and aborts the remaining posts
    assert_eq!(transport.calls_for("Second"), 1);
    assert_eq!(orchestrator.stats().get_count(FailureType::Fatal), 1);
}

#[tokio::test]
async fn test_panicking_destination_is_isolated() {
    let transport = Arc::new(ScriptedTransport::new(&[("Second", Behaviour::Panic)]));
    let orchestrator = orchestrator(catalog(&["First", "Second", "Third"]), transport);
    let results = orchestrator.publish(&request(3)).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[1].failed, 3);
    assert_eq!(
        results[1].errors,
        vec!["Second: unexpected error: adapter bug".to_string()]
    );
    assert_eq!(results[2].successful, 3);
    assert_eq!(orchestrator.stats().get_count(FailureType::Panic), 1);
}

#[tokio::test]
async fn test_zero_posts_makes_no_calls() {
    let transport = Arc::new(ScriptedTransport::new(&[]));
    let results = orchestrator(catalog(&["A", "B"]), transport.clone())
        .publish(&request(0))
        .await;

    assert_eq!(transport.total_calls(), 0);
    assert_eq!(results.len(), 2);
    for result in &results {
        assert_eq!(result.attempted, 0);
        assert_eq!(result.successful, 0);
        assert_eq!(result.failed, 0);
        assert_eq!(result.success_rate, 0);
    }

    let summary = summarize(&results);
    assert_eq!(summary.total_sites, 2);
    assert_eq!(summary.total_attempted, 0);
    assert_eq!(summary.overall_success_rate, 0);
    // Nothing was attempted, so nothing qualifies as a top performer; both count as failed
    assert!(summary.top_performing_sites.is_empty());
    assert_eq!(summary.failed_sites.len(), 2);
}

#[tokio::test]
async fn test_empty_catalog_gives_zero_report() {
    let transport = Arc::new(ScriptedTransport::new(&[]));
    let results = orchestrator(Catalog::new(vec![]), transport.clone())
        .publish(&request(3))
        .await;

    assert!(results.is_empty());
    assert_eq!(transport.total_calls(), 0);

    let summary = summarize(&results);
    assert_eq!(summary.total_sites, 0);
    assert_eq!(summary.total_attempted, 0);
    assert_eq!(summary.total_successful, 0);
    assert_eq!(summary.total_failed, 0);
    assert_eq!(summary.overall_success_rate, 0);
    assert!(summary.top_performing_sites.is_empty());
    assert!(summary.failed_sites.is_empty());
}

#[tokio::test]
async fn test_conservation_over_builtin_catalog() {
    let transport = Arc::new(SimulatedTransport::seeded(7, SuccessPolicy::default()));
    let results = orchestrator(Catalog::builtin(), transport)
        .publish(&request(4))
        .await;

    assert_eq!(results.len(), Catalog::builtin().len());
    for result in &results {
        assert_eq!(result.attempted, 4);
        assert_eq!(
            result.attempted,
            result.successful + result.failed,
            "{}",
            result.site_name
        );
        assert!(result.success_rate <= 100);
        assert_eq!(result.errors.len() as u32, result.failed);
    }

    let summary = summarize(&results);
    let successful: u64 = results.iter().map(|r| u64::from(r.successful)).sum();
    let failed: u64 = results.iter().map(|r| u64::from(r.failed)).sum();
    assert_eq!(summary.total_attempted, successful + failed);
    assert_eq!(summary.total_successful, successful);
    assert_eq!(summary.total_failed, failed);
    assert!(summary.top_performing_sites.len() <= 10);
    assert!(summary
        .top_performing_sites
        .windows(2)
        .all(|w| w[0].success_rate >= w[1].success_rate));
}

#[tokio::test]
async fn test_seeded_runs_are_reproducible() {
    let run = |seed: u64| async move {
        let transport = Arc::new(SimulatedTransport::seeded(seed, SuccessPolicy::default()));
        orchestrator(Catalog::builtin(), transport)
            .publish(&request(3))
            .await
    };

    let first = run(42).await;
    let second = run(42).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_kind_filter_and_target_subset() {
    let transport = Arc::new(SimulatedTransport::seeded(3, SuccessPolicy::uniform(1.0)));
    let forums = orchestrator(Catalog::builtin(), transport.clone())
        .with_kind(Some(DestinationKind::Forum))
        .publish(&request(1))
        .await;
    assert!(!forums.is_empty());
    assert!(forums.len() < Catalog::builtin().len());

    let mut subset = request(1);
    subset.target_destinations = Some(vec!["vimeo".into(), "Medium".into()]);
    let results = orchestrator(Catalog::builtin(), transport)
        .publish(&subset)
        .await;
    let names: Vec<&str> = results.iter().map(|r| r.site_name.as_str()).collect();
    // Catalog order, not request order
    assert_eq!(names, vec!["Vimeo", "Medium"]);
}

#[tokio::test]
async fn test_progress_channel_sees_every_attempt() {
    let transport = Arc::new(ScriptedTransport::new(&[("Flaky", Behaviour::Reject)]));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let orchestrator = orchestrator(catalog(&["Flaky", "Steady"]), transport).with_progress(tx);

    orchestrator.publish(&request(1)).await;
    drop(orchestrator);

    let mut outcomes = Vec::new();
    while let Some(outcome) = rx.recv().await {
        outcomes.push((outcome.destination, outcome.attempt, outcome.status));
    }
    assert_eq!(
        outcomes,
        vec![
            ("Flaky".to_string(), 1, AttemptStatus::Retrying),
            ("Flaky".to_string(), 2, AttemptStatus::Retrying),
            ("Flaky".to_string(), 3, AttemptStatus::Failed),
            ("Steady".to_string(), 1, AttemptStatus::Success),
        ]
    );
}
