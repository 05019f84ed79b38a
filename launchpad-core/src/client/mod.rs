use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LaunchpadConfig;
use crate::model::token::{ListResponse, RawToken};

#[derive(Error, Debug)]
pub enum LaunchpadError {
    #[error("launchpad returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("launchpad request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("launchpad response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid launchpad configuration: {0}")]
    InvalidConfig(String),
}

/// Thin HTTP client over the launchpad mint-list endpoint
#[derive(Debug, Clone)]
pub struct LaunchpadClient {
    config: LaunchpadConfig,
    http: reqwest::Client,
}

impl LaunchpadClient {
    pub fn new(config: LaunchpadConfig) -> Result<Self, LaunchpadError> {
        if config.platform_ids.is_empty() {
            return Err(LaunchpadError::InvalidConfig(
                "at least one platform id is required".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &LaunchpadConfig {
        &self.config
    }

    /// Fetches the list endpoint and returns the body untouched
    pub async fn fetch_list_json(&self) -> Result<Value, LaunchpadError> {
        let url = self.config.list_url();
        debug!(url = %url, size = self.config.page_size, "Fetching launchpad mint list");

        let response = self
            .http
            .get(&url)
            .query(&self.config.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error body".to_string());
            warn!(status = status.as_u16(), "Launchpad list request rejected");
            return Err(LaunchpadError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Fetches the list endpoint and unwraps its rows
    pub async fn fetch_rows(&self) -> Result<Vec<RawToken>, LaunchpadError> {
        let body = self.fetch_list_json().await?;
        let rows = serde_json::from_value::<ListResponse>(body)?.into_rows();
        debug!(count = rows.len(), "Decoded launchpad rows");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_platforms_rejected() {
        let config = LaunchpadConfig {
            platform_ids: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            LaunchpadClient::new(config),
            Err(LaunchpadError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_client_keeps_config() {
        let client = LaunchpadClient::new(LaunchpadConfig::default()).unwrap();
        assert_eq!(client.config().page_size, 100);
    }
}
