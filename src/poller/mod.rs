use chrono::Utc;
use screener_types::{PollEvent, PollOutcome};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::classifier::{GraduationTracker, Thresholds};
use crate::error::{log_error, Result};
use crate::mapper::map_rows;
use crate::monitoring::PollStats;
use crate::source::TokenSource;

mod snapshot;

pub use snapshot::{ScreenerSnapshot, SnapshotStore};

/// What a failed tick does to the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum FailurePolicy {
    /// Leave the previous snapshot in place
    #[default]
    #[serde(rename = "keep", alias = "keep_previous")]
    KeepPrevious,
    /// Replace the snapshot with an empty one
    #[serde(rename = "clear")]
    Clear,
}

/// Commands for controlling the TokenPoller
#[derive(Debug)]
pub enum PollerCommand {
    Shutdown,
}

/// Timer-driven fetch loop that keeps the latest classified snapshot
pub struct TokenPoller {
    source: Arc<dyn TokenSource>,
    thresholds: Thresholds,
    poll_interval: Duration,
    failure_policy: FailurePolicy,
    tracker: Arc<GraduationTracker>,
    store: SnapshotStore,
    stats: Arc<PollStats>,
    updates: watch::Sender<Arc<ScreenerSnapshot>>,
    cmd_rx: mpsc::Receiver<PollerCommand>,
    tick: u64,
}

impl TokenPoller {
    /// Creates a poller and the sender used to shut it down
    pub fn new(
        source: Arc<dyn TokenSource>,
        thresholds: Thresholds,
        poll_interval: Duration,
    ) -> (Self, mpsc::Sender<PollerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel::<PollerCommand>(1);
        let (updates, _) = watch::channel(Arc::new(ScreenerSnapshot::default()));
        (
            Self {
                source,
                thresholds,
                poll_interval,
                failure_policy: FailurePolicy::default(),
                tracker: Arc::new(GraduationTracker::new()),
                store: SnapshotStore::new(),
                stats: Arc::new(PollStats::new()),
                updates,
                cmd_rx,
                tick: 0,
            },
            cmd_tx,
        )
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_stats(mut self, stats: Arc<PollStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_store(mut self, store: SnapshotStore) -> Self {
        self.store = store;
        self
    }

    pub fn store(&self) -> SnapshotStore {
        self.store.clone()
    }

    pub fn tracker(&self) -> Arc<GraduationTracker> {
        self.tracker.clone()
    }

    pub fn stats(&self) -> Arc<PollStats> {
        self.stats.clone()
    }

    /// Receiver that sees every snapshot the poller publishes
    pub fn subscribe(&self) -> watch::Receiver<Arc<ScreenerSnapshot>> {
        self.updates.subscribe()
    }

    async fn publish(&self, snapshot: ScreenerSnapshot) -> Arc<ScreenerSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.store.replace(snapshot.clone()).await;
        self.updates.send_replace(snapshot.clone());
        snapshot
    }

    /// Runs a single tick: fetch, map, classify and replace the snapshot.
    ///
    /// On failure the error is logged, the failure policy is applied and the
    /// error is returned. Nothing is retried.
    pub async fn poll_once(&mut self) -> Result<Arc<ScreenerSnapshot>> {
        self.tick += 1;
        let tick = self.tick;
        let now = Utc::now();

        match self.source.fetch_tokens().await {
            Ok(rows) => {
                let mapped = map_rows(&rows, now, &self.thresholds, &self.tracker);
                let event = PollEvent::new(tick, PollOutcome::Replaced, mapped.tokens.len())
                    .with_graduations(mapped.newly_graduated);
                let snapshot = self
                    .publish(ScreenerSnapshot::from_tokens(mapped.tokens, tick, now))
                    .await;
                self.stats.record(event);
                Ok(snapshot)
            }
            Err(e) => {
                log_error(&e, &format!("Poll tick {} from {}", tick, self.source.name()));
                let event = match self.failure_policy {
                    FailurePolicy::KeepPrevious => {
                        let kept = self.store.current().await.total_tokens;
                        PollEvent::new(tick, PollOutcome::Kept, kept)
                    }
                    FailurePolicy::Clear => {
                        self.publish(ScreenerSnapshot::cleared(tick, now)).await;
                        PollEvent::new(tick, PollOutcome::Cleared, 0)
                    }
                };
                self.stats.record(event.with_details(e.to_string()));
                Err(e)
            }
        }
    }

    /// Polls on a fixed interval until a shutdown command arrives or every
    /// command sender is dropped. The first tick fires immediately.
    pub async fn run(mut self) -> Result<()> {
        info!(
            source = self.source.name(),
            interval_ms = self.poll_interval.as_millis() as u64,
            policy = ?self.failure_policy,
            "Starting token poller"
        );
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                command = self.cmd_rx.recv() => {
                    match command {
                        Some(PollerCommand::Shutdown) => {
                            info!("Shutdown command received, stopping poller")
                        }
                        None => info!("Command channel closed, stopping poller"),
                    }
                    break;
                }
                _ = ticker.tick() => {
                    if let Ok(snapshot) = self.poll_once().await {
                        debug!(
                            tick = snapshot.tick,
                            new = snapshot.classified.new.len(),
                            graduating = snapshot.classified.graduating.len(),
                            graduated = snapshot.classified.graduated.len(),
                            "Snapshot classified"
                        );
                    }
                }
            }
        }

        info!(ticks = self.tick, graduated = self.tracker.len(), "Token poller stopped");
        Ok(())
    }
}
