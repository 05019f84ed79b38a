use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, RwLock};
use tokio::time::{interval, sleep, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::{BlockStream, SimulatedBlock, SimulatedTransaction, TransactionFeed};
use crate::poller::SnapshotStore;

/// Newest blocks kept for the explorer
pub const BLOCK_HISTORY: usize = 20;
/// Roughly one Solana slot
pub const BLOCK_INTERVAL: Duration = Duration::from_millis(400);
const START_SLOT: u64 = 250_000_000;

/// Latest fabricated transactions and blocks, read by the proxy
#[derive(Debug, Default)]
pub struct ExplorerState {
    feed: RwLock<TransactionFeed>,
    blocks: RwLock<VecDeque<SimulatedBlock>>,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first
    pub async fn transactions(&self) -> Vec<SimulatedTransaction> {
        self.feed.read().await.entries().cloned().collect()
    }

    /// Newest first
    pub async fn blocks(&self) -> Vec<SimulatedBlock> {
        self.blocks.read().await.iter().cloned().collect()
    }

    pub async fn push_transactions(&self, batch: Vec<SimulatedTransaction>) {
        self.feed.write().await.push_batch(batch);
    }

    pub async fn push_block(&self, block: SimulatedBlock) {
        let mut blocks = self.blocks.write().await;
        blocks.push_front(block);
        blocks.truncate(BLOCK_HISTORY);
    }
}

/// Feeds `explorer` until `shutdown` is notified.
///
/// Transactions are drawn from the tokens of the current snapshot on a
/// random 200-1200 ms cadence; blocks arrive every `BLOCK_INTERVAL`.
pub async fn run_explorer(
    store: SnapshotStore,
    explorer: Arc<ExplorerState>,
    shutdown: Arc<Notify>,
) {
    info!("Starting explorer simulation");
    let mut rng = StdRng::from_entropy();
    let mut stream = BlockStream::new(START_SLOT);

    let mut block_ticker = interval(BLOCK_INTERVAL);
    block_ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let next_batch = sleep(Duration::ZERO);
    tokio::pin!(next_batch);

    loop {
        tokio::select! {
            _ = shutdown.notified() => break,
            _ = block_ticker.tick() => {
                let block = stream.next_block(&mut rng, Utc::now());
                explorer.push_block(block).await;
            }
            _ = &mut next_batch => {
                let snapshot = store.current().await;
                let batch =
                    TransactionFeed::generate_batch(&snapshot.tokens, &mut rng, Utc::now());
                if !batch.is_empty() {
                    debug!(count = batch.len(), "Simulated transactions");
                    explorer.push_transactions(batch).await;
                }
                let delay = TransactionFeed::next_delay(&mut rng);
                next_batch.as_mut().reset(Instant::now() + delay);
            }
        }
    }

    info!(next_slot = stream.next_slot(), "Explorer simulation stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::ScreenerSnapshot;
    use crate::token::{LifecycleStatus, Token};

    fn token(mint: &str) -> Token {
        Token {
            id: mint.to_string(),
            mint: mint.to_string(),
            name: mint.to_string(),
            symbol: mint.to_string(),
            image: String::new(),
            market_cap: 1_000.0,
            volume_24h: 0.0,
            price: 0.0001,
            price_change_24h: 0.0,
            progress: 0.0,
            created_at: Utc::now(),
            creator: None,
            status: LifecycleStatus::New,
            market_addresses: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_block_history_is_capped_newest_first() {
        let explorer = ExplorerState::new();
        let mut rng = StdRng::seed_from_u64(4);
        let mut stream = BlockStream::new(10);
        for _ in 0..30 {
            explorer.push_block(stream.next_block(&mut rng, Utc::now())).await;
        }
        let blocks = explorer.blocks().await;
        assert_eq!(blocks.len(), BLOCK_HISTORY);
        assert!(blocks.windows(2).all(|w| w[0].slot > w[1].slot));
    }

    #[tokio::test]
    async fn test_explorer_follows_snapshot_and_stops() {
        let store = SnapshotStore::new();
        let snapshot = ScreenerSnapshot::from_tokens(vec![token("DOG")], 1, Utc::now());
        store.replace(Arc::new(snapshot)).await;
        let explorer = Arc::new(ExplorerState::new());
        let shutdown = Arc::new(Notify::new());
        let handle = tokio::spawn(run_explorer(store, explorer.clone(), shutdown.clone()));

        // First batch fires immediately, first block on the first tick
        tokio::time::sleep(Duration::from_millis(100)).await;
        let txs = explorer.transactions().await;
        assert!(!txs.is_empty());
        assert!(txs.iter().all(|tx| tx.mint == "DOG"));
        assert!(!explorer.blocks().await.is_empty());

        shutdown.notify_one();
        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("explorer did not stop")
            .unwrap();
    }

    #[tokio::test]
    async fn test_no_tokens_no_transactions() {
        let explorer = Arc::new(ExplorerState::new());
        let shutdown = Arc::new(Notify::new());
        let handle = tokio::spawn(run_explorer(
            SnapshotStore::new(),
            explorer.clone(),
            shutdown.clone(),
        ));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(explorer.transactions().await.is_empty());

        shutdown.notify_one();
        handle.await.unwrap();
    }
}
