use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollOutcome {
    Replaced,
    Kept,
    Cleared,
}

/// Record of one poll tick, emitted to the logs and kept as the latest event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollEvent {
    pub event_id: Uuid,
    pub tick: u64,
    pub outcome: PollOutcome,
    pub token_count: usize,
    pub newly_graduated: usize,
    pub details: Option<String>, // error message when the tick failed
    pub timestamp: DateTime<Utc>,
}

impl PollEvent {
    pub fn new(tick: u64, outcome: PollOutcome, token_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            tick,
            outcome,
            token_count,
            newly_graduated: 0,
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_graduations(mut self, newly_graduated: usize) -> Self {
        self.newly_graduated = newly_graduated;
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn is_failure(&self) -> bool {
        self.outcome != PollOutcome::Replaced
    }
}
