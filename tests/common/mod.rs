// Shared fakes for the integration tests

use async_trait::async_trait;
use bonkscreener::error::{Result, ScreenerError};
use bonkscreener::TokenSource;
use launchpad_core::RawToken;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

pub fn raw(mint: &str, market_cap: f64) -> RawToken {
    RawToken {
        mint: Some(mint.to_string()),
        name: Some(format!("{} coin", mint)),
        symbol: Some(mint.to_string()),
        market_cap: Some(market_cap),
        ..Default::default()
    }
}

/// Source that replays a script of responses. `None` is a failed fetch.
/// Once the script runs out the last entry repeats.
pub struct ScriptedSource {
    script: Mutex<VecDeque<Option<Vec<RawToken>>>>,
    last: Mutex<Option<Vec<RawToken>>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Option<Vec<RawToken>>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(Some(Vec::new())),
        }
    }

    fn next(&self) -> Option<Vec<RawToken>> {
        let mut script = self.script.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        if let Some(step) = script.pop_front() {
            *last = step;
        }
        last.clone()
    }
}

#[async_trait]
impl TokenSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_tokens(&self) -> Result<Vec<RawToken>> {
        self.next()
            .ok_or_else(|| ScreenerError::api("scripted", "upstream unavailable", Some(502)))
    }

    async fn fetch_raw(&self) -> Result<Value> {
        match self.next() {
            Some(rows) => Ok(json!({ "success": true, "data": { "rows": rows } })),
            None => Err(ScreenerError::NetworkError("connection refused".to_string())),
        }
    }
}
