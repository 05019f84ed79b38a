// Integration tests for the poll/map/classify loop

mod common;

use bonkscreener::{FailurePolicy, LifecycleStatus, PollerCommand, Thresholds, TokenPoller};
use common::{raw, ScriptedSource};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn poller(script: Vec<Option<Vec<launchpad_core::RawToken>>>) -> TokenPoller {
    let (poller, _cmd_tx) = TokenPoller::new(
        Arc::new(ScriptedSource::new(script)),
        Thresholds::default(),
        Duration::from_millis(10),
    );
    poller
}

fn mints(tokens: &[bonkscreener::Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.mint.as_str()).collect()
}

#[tokio::test]
async fn test_each_tick_replaces_the_list() {
    let mut poller = poller(vec![
        Some(vec![raw("AAA", 1_000.0), raw("BBB", 2_000.0)]),
        Some(vec![raw("CCC", 3_000.0)]),
    ]);

    let first = poller.poll_once().await.unwrap();
    assert_eq!(mints(&first.tokens), vec!["AAA", "BBB"]);
    assert_eq!(first.tick, 1);

    let second = poller.poll_once().await.unwrap();
    assert_eq!(mints(&second.tokens), vec!["CCC"]);
    assert_eq!(second.total_tokens, 1);

    let stored = poller.store().current().await;
    assert_eq!(mints(&stored.tokens), vec!["CCC"]);
    assert_eq!(stored.tick, 2);
}

#[tokio::test]
async fn test_failed_tick_keeps_previous_snapshot_by_default() {
    let mut poller = poller(vec![Some(vec![raw("AAA", 15_000.0)]), None]);

    poller.poll_once().await.unwrap();
    assert!(poller.poll_once().await.is_err());

    let stored = poller.store().current().await;
    assert_eq!(mints(&stored.tokens), vec!["AAA"]);
    assert_eq!(stored.tick, 1);
    assert_eq!(stored.classified.graduating.len(), 1);

    let report = poller.stats().report();
    assert_eq!(report.successes, 1);
    assert_eq!(report.failures, 1);
    assert_eq!(report.last_tick, Some(2));
    assert!(report.last_error.unwrap().contains("upstream unavailable"));
}

#[tokio::test]
async fn test_failed_tick_clears_with_clear_policy() {
    let mut poller = poller(vec![Some(vec![raw("AAA", 15_000.0)]), None])
        .with_failure_policy(FailurePolicy::Clear);

    poller.poll_once().await.unwrap();
    assert!(poller.poll_once().await.is_err());

    let stored = poller.store().current().await;
    assert!(stored.tokens.is_empty());
    assert!(stored.classified.is_empty());
    assert_eq!(stored.tick, 2);
}

#[tokio::test]
async fn test_graduation_sticks_across_ticks() {
    let mut poller = poller(vec![
        Some(vec![raw("MOON", 80_000.0), raw("MID", 20_000.0)]),
        Some(vec![raw("MOON", 5_000.0), raw("MID", 20_000.0)]),
        Some(vec![raw("MID", 90_000.0)]),
    ]);

    let first = poller.poll_once().await.unwrap();
    assert_eq!(first.find("MOON").unwrap().status, LifecycleStatus::Graduated);
    assert_eq!(first.find("MID").unwrap().status, LifecycleStatus::Graduating);

    // Market cap dropped below the threshold but the token stays graduated
    let second = poller.poll_once().await.unwrap();
    assert_eq!(second.find("MOON").unwrap().status, LifecycleStatus::Graduated);
    assert_eq!(mints(&second.classified.graduated), vec!["MOON"]);

    let third = poller.poll_once().await.unwrap();
    assert_eq!(third.find("MID").unwrap().status, LifecycleStatus::Graduated);
    assert!(third.find("MOON").is_none());

    let tracker = poller.tracker();
    assert_eq!(tracker.len(), 2);
    assert!(tracker.is_graduated("MOON"));
}

#[tokio::test]
async fn test_run_publishes_and_stops_on_shutdown() {
    let (poller, cmd_tx) = TokenPoller::new(
        Arc::new(ScriptedSource::new(vec![Some(vec![raw("AAA", 500.0)])])),
        Thresholds::default(),
        Duration::from_millis(10),
    );
    let mut updates = poller.subscribe();
    let store = poller.store();
    let handle = tokio::spawn(poller.run());

    tokio::time::timeout(Duration::from_secs(2), updates.changed())
        .await
        .expect("no snapshot published")
        .unwrap();
    assert_eq!(mints(&updates.borrow().tokens), vec!["AAA"]);

    cmd_tx.send(PollerCommand::Shutdown).await.unwrap();
    let result = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("poller did not stop")
        .unwrap();
    assert!(result.is_ok());
    assert!(store.current().await.tick >= 1);
}
