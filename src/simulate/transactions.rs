use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Duration;

use super::{random_signature, random_wallet};
use crate::token::Token;

/// Newest transactions kept in the feed
pub const FEED_CAPACITY: usize = 20;
const BURST_CHANCE: f64 = 0.35;
const FALLBACK_PRICE: f64 = 0.00002;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedTransaction {
    pub kind: TxKind,
    pub time: String,
    pub sol_amount: f64,
    pub amount: String,
    pub from: String,
    pub to: String,
    pub signature: String,
    pub mint: String,
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
}

/// Bursty stream of made-up trades over the current token list
#[derive(Debug, Default)]
pub struct TransactionFeed {
    entries: VecDeque<SimulatedTransaction>,
}

impl TransactionFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first
    pub fn entries(&self) -> impl Iterator<Item = &SimulatedTransaction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Generates one batch: a burst of 3-8 transactions 35% of the time,
    /// otherwise a single one. Empty when there are no tokens.
    pub fn generate_batch<R: Rng + ?Sized>(
        tokens: &[Token],
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Vec<SimulatedTransaction> {
        if tokens.is_empty() {
            return Vec::new();
        }
        let count = if rng.gen_bool(BURST_CHANCE) {
            rng.gen_range(3..=8)
        } else {
            1
        };

        (0..count)
            .map(|_| {
                let token = &tokens[rng.gen_range(0..tokens.len())];
                let kind = if rng.gen_bool(0.5) { TxKind::Buy } else { TxKind::Sell };
                let sol_amount = (rng.gen_range(0.2..10.0_f64) * 100.0).round() / 100.0;
                let price = if token.price > 0.0 { token.price } else { FALLBACK_PRICE };
                let token_amount = sol_amount / price;
                let amount = if token_amount > 1_000_000.0 {
                    format!("{:.2}M {}", token_amount / 1_000_000.0, token.symbol)
                } else {
                    format!("{:.0} {}", token_amount, token.symbol)
                };
                SimulatedTransaction {
                    kind,
                    time: "just now".to_string(),
                    sol_amount,
                    amount,
                    from: random_wallet(rng),
                    to: random_wallet(rng),
                    signature: random_signature(rng),
                    mint: token.mint.clone(),
                    symbol: token.symbol.clone(),
                    timestamp: now,
                }
            })
            .collect()
    }

    /// Puts a batch at the front, dropping the oldest past capacity
    pub fn push_batch(&mut self, batch: Vec<SimulatedTransaction>) {
        for tx in batch.into_iter().rev() {
            self.entries.push_front(tx);
        }
        self.entries.truncate(FEED_CAPACITY);
    }

    /// Generates and pushes a batch, returning how many were added
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        tokens: &[Token],
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> usize {
        let batch = Self::generate_batch(tokens, rng, now);
        let added = batch.len();
        self.push_batch(batch);
        added
    }

    /// Delay before the next batch, 200-1200 ms
    pub fn next_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
        Duration::from_millis(rng.gen_range(200..1200))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::LifecycleStatus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn token(mint: &str, price: f64) -> Token {
        Token {
            id: mint.to_string(),
            mint: mint.to_string(),
            name: mint.to_string(),
            symbol: mint.to_string(),
            image: String::new(),
            market_cap: 0.0,
            volume_24h: 0.0,
            price,
            price_change_24h: 0.0,
            progress: 0.0,
            created_at: Utc::now(),
            creator: None,
            status: LifecycleStatus::New,
            market_addresses: Vec::new(),
        }
    }

    #[test]
    fn test_no_tokens_no_transactions() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(TransactionFeed::generate_batch(&[], &mut rng, Utc::now()).is_empty());
    }

    #[test]
    fn test_batches_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let tokens = vec![token("DOG", 0.0), token("CAT", 0.5)];
        for _ in 0..200 {
            let batch = TransactionFeed::generate_batch(&tokens, &mut rng, Utc::now());
            assert!(batch.len() == 1 || (3..=8).contains(&batch.len()));
            for tx in &batch {
                assert!(tx.sol_amount >= 0.2 && tx.sol_amount <= 10.0);
                assert!(tx.amount.ends_with(&tx.symbol));
                if tx.symbol == "DOG" {
                    // Fallback price 0.00002 means at least 10k tokens
                    let figure = tx.amount.split(' ').next().unwrap();
                    assert!(figure.ends_with('M') || figure.parse::<f64>().unwrap() >= 9_999.0);
                }
            }
        }
    }

    #[test]
    fn test_feed_is_capped_newest_first() {
        let mut rng = StdRng::seed_from_u64(3);
        let tokens = vec![token("DOG", 0.001)];
        let mut feed = TransactionFeed::new();
        for _ in 0..50 {
            feed.tick(&tokens, &mut rng, Utc::now());
        }
        assert_eq!(feed.len(), FEED_CAPACITY);

        let marker = SimulatedTransaction {
            signature: "newest00".to_string(),
            ..TransactionFeed::generate_batch(&tokens, &mut rng, Utc::now())[0].clone()
        };
        feed.push_batch(vec![marker]);
        assert_eq!(feed.entries().next().unwrap().signature, "newest00");
        assert_eq!(feed.len(), FEED_CAPACITY);
    }

    #[test]
    fn test_next_delay_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let delay = TransactionFeed::next_delay(&mut rng);
            assert!(delay >= Duration::from_millis(200) && delay < Duration::from_millis(1200));
        }
    }
}
