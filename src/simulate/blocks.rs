use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use super::random_base58_key;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedBlock {
    pub slot: u64,
    pub hash: String,
    pub leader: String,
    pub transaction_count: u32,
    pub timestamp: DateTime<Utc>,
}

/// Monotonic sequence of fake blocks
#[derive(Debug, Clone)]
pub struct BlockStream {
    next_slot: u64,
}

impl BlockStream {
    pub fn new(start_slot: u64) -> Self {
        Self { next_slot: start_slot }
    }

    pub fn next_slot(&self) -> u64 {
        self.next_slot
    }

    /// Emits the next block. Slots occasionally skip ahead, like a leader
    /// missing its turn.
    pub fn next_block<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> SimulatedBlock {
        let slot = self.next_slot;
        let skip = if rng.gen_bool(0.05) { rng.gen_range(1..=3) } else { 0 };
        self.next_slot = slot + 1 + skip;

        SimulatedBlock {
            slot,
            hash: random_base58_key(rng),
            leader: random_base58_key(rng),
            transaction_count: rng.gen_range(200..3_000),
            timestamp: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_slots_strictly_increase() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut stream = BlockStream::new(250_000_000);
        let mut last = None;
        for _ in 0..500 {
            let block = stream.next_block(&mut rng, Utc::now());
            if let Some(prev) = last {
                assert!(block.slot > prev);
                assert!(block.slot - prev <= 4);
            }
            assert!((200..3_000).contains(&block.transaction_count));
            assert_ne!(block.hash, block.leader);
            last = Some(block.slot);
        }
        assert!(stream.next_slot() > last.unwrap());
    }
}
