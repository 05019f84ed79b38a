use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::classifier::{bucket, ClassifiedTokens};
use crate::token::{Token, TokenListResponse};

/// Everything one successful poll produced
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerSnapshot {
    pub tokens: Vec<Token>,
    pub classified: ClassifiedTokens,
    pub last_updated: Option<DateTime<Utc>>,
    pub total_tokens: usize,
    pub tick: u64,
}

impl ScreenerSnapshot {
    pub fn from_tokens(tokens: Vec<Token>, tick: u64, now: DateTime<Utc>) -> Self {
        let classified = bucket(&tokens);
        Self {
            total_tokens: tokens.len(),
            tokens,
            classified,
            last_updated: Some(now),
            tick,
        }
    }

    pub fn cleared(tick: u64, now: DateTime<Utc>) -> Self {
        Self::from_tokens(Vec::new(), tick, now)
    }

    pub fn find(&self, mint: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.mint == mint)
    }

    pub fn to_list_response(&self) -> TokenListResponse {
        TokenListResponse {
            tokens: self.tokens.clone(),
            last_updated: self.last_updated.unwrap_or_else(Utc::now),
            total_tokens: self.total_tokens,
        }
    }
}

/// Shared holder of the latest snapshot. The poller is the only writer.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    inner: Arc<RwLock<Arc<ScreenerSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn current(&self) -> Arc<ScreenerSnapshot> {
        self.inner.read().await.clone()
    }

    pub async fn replace(&self, snapshot: Arc<ScreenerSnapshot>) {
        *self.inner.write().await = snapshot;
    }
}
