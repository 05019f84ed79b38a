use async_trait::async_trait;
use launchpad_core::{LaunchpadClient, RawToken};
use serde_json::Value;

use crate::error::Result;

/// Anything that can hand the poller a fresh token list
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Fetches the current upstream rows
    async fn fetch_tokens(&self) -> Result<Vec<RawToken>>;

    /// Fetches the upstream body untouched, for the passthrough proxy route
    async fn fetch_raw(&self) -> Result<Value>;
}

#[async_trait]
impl TokenSource for LaunchpadClient {
    fn name(&self) -> &'static str {
        "launchpad"
    }

    async fn fetch_tokens(&self) -> Result<Vec<RawToken>> {
        Ok(self.fetch_rows().await?)
    }

    async fn fetch_raw(&self) -> Result<Value> {
        Ok(self.fetch_list_json().await?)
    }
}
