use config::{Config, ConfigError, Environment};
use launchpad_core::config::{DEFAULT_API_BASE_URL, DEFAULT_PLATFORM_IDS};
use launchpad_core::LaunchpadConfig;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use crate::classifier::Thresholds;
use crate::error::{Result, ScreenerError};
use crate::poller::FailurePolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    // Launchpad listing
    pub api_base_url: String,
    pub platform_ids: String, // comma-separated
    pub sort: String,
    pub page_size: u32,
    pub mint_type: String,
    pub include_nsfw: bool,
    pub request_timeout_secs: u64,

    // Polling
    pub poll_interval_ms: u64,
    pub failure_policy: FailurePolicy,

    // Lifecycle thresholds (USD market cap)
    pub graduating_min: f64,
    pub graduation_threshold: f64,
    pub bonding_target: f64,

    // Same-origin proxy
    pub proxy_enabled: bool,
    pub proxy_host: String,
    pub proxy_port: u16,

    // Terminal board
    pub render_board: bool,
    pub animation_frames: u32,
    pub animation_ms: u64,

    // Logging
    pub log_dir: String,
    pub log_level: String,
}

impl Settings {
    /// Loads settings from the process environment (and `.env` if present)
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        if dotenv::dotenv().is_ok() {
            println!("Loaded configuration from .env file");
        }
        Self::from_environment(Environment::default().separator("__"))
    }

    /// Loads settings from an explicit environment source, falling back to
    /// defaults for every key
    pub fn from_environment(environment: Environment) -> std::result::Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(environment)
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("platform_ids", DEFAULT_PLATFORM_IDS.join(","))?
            .set_default("sort", "new")?
            .set_default("page_size", 100)?
            .set_default("mint_type", "default")?
            .set_default("include_nsfw", false)?
            .set_default("request_timeout_secs", 10)?
            .set_default("poll_interval_ms", 1000)?
            .set_default("failure_policy", "keep")?
            .set_default("graduating_min", 12_000.0)?
            .set_default("graduation_threshold", 70_000.0)?
            .set_default("bonding_target", 70_000.0)?
            .set_default("proxy_enabled", true)?
            .set_default("proxy_host", "127.0.0.1")?
            .set_default("proxy_port", 8787)?
            .set_default("render_board", false)?
            .set_default("animation_frames", 1)?
            .set_default("animation_ms", 400)?
            .set_default("log_dir", "./logs")?
            .set_default("log_level", "info")?
            .build()?;

        settings.try_deserialize()
    }

    /// Rejects settings the screener cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(ScreenerError::ConfigError(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.platform_id_list().is_empty() {
            return Err(ScreenerError::ConfigError(
                "platform_ids must name at least one launchpad".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(ScreenerError::ConfigError(
                "page_size must be greater than zero".to_string(),
            ));
        }
        self.thresholds().validate()?;
        Ok(())
    }

    pub fn platform_id_list(&self) -> Vec<String> {
        self.platform_ids
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            graduating_min: self.graduating_min,
            graduation: self.graduation_threshold,
            bonding_target: self.bonding_target,
        }
    }

    pub fn launchpad_config(&self) -> LaunchpadConfig {
        LaunchpadConfig {
            api_base_url: self.api_base_url.clone(),
            platform_ids: self.platform_id_list(),
            sort: self.sort.clone(),
            page_size: self.page_size,
            mint_type: self.mint_type.clone(),
            include_nsfw: self.include_nsfw,
            request_timeout_secs: self.request_timeout_secs,
        }
    }

    pub fn proxy_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.proxy_host, self.proxy_port)
            .parse()
            .map_err(|e| ScreenerError::ConfigError(format!("Invalid proxy bind address: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_with(pairs: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().separator("__").source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_environment(env_with(&[])).unwrap();
        assert_eq!(settings.poll_interval_ms, 1000);
        assert_eq!(settings.failure_policy, FailurePolicy::KeepPrevious);
        assert_eq!(settings.platform_id_list().len(), 2);
        assert_eq!(settings.thresholds(), Thresholds::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_from_environment() {
        let settings = Settings::from_environment(env_with(&[
            ("POLL_INTERVAL_MS", "2000"),
            ("FAILURE_POLICY", "clear"),
            ("GRADUATION_THRESHOLD", "60000"),
            ("PLATFORM_IDS", "AAA, BBB,,"),
            ("PROXY_PORT", "9090"),
            ("INCLUDE_NSFW", "true"),
        ]))
        .unwrap();

        assert_eq!(settings.poll_interval(), Duration::from_secs(2));
        assert_eq!(settings.failure_policy, FailurePolicy::Clear);
        assert_eq!(settings.thresholds().graduation, 60_000.0);
        assert_eq!(settings.platform_id_list(), vec!["AAA", "BBB"]);
        assert_eq!(settings.proxy_addr().unwrap().port(), 9090);
        assert!(settings.launchpad_config().include_nsfw);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let settings =
            Settings::from_environment(env_with(&[("POLL_INTERVAL_MS", "0")])).unwrap();
        assert!(settings.validate().is_err());

        let settings = Settings::from_environment(env_with(&[
            ("GRADUATING_MIN", "80000"),
            ("GRADUATION_THRESHOLD", "70000"),
        ]))
        .unwrap();
        assert!(settings.validate().is_err());

        let settings = Settings::from_environment(env_with(&[("PLATFORM_IDS", " , ")])).unwrap();
        assert!(settings.validate().is_err());
    }
}
