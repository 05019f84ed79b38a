use crate::error::{Result, ScreenerError};
use chrono::{DateTime, Utc};
use screener_types::PollEvent;
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub mod log_utils;

pub const LOG_FILE_NAME: &str = "bonkscreener.log";

/// Initializes the logging system (both console and file).
/// Returns a guard that must be kept alive for file logging to work.
pub fn init_logging(log_dir: &str, file_level: &str, console_level: &str) -> Result<WorkerGuard> {
    let log_path = Path::new(log_dir);
    if !log_path.exists() {
        std::fs::create_dir_all(log_path).map_err(ScreenerError::Io)?;
    }

    // --- File Logger ---
    let file_appender = rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking_appender, guard) = tracing_appender::non_blocking(file_appender);

    let file_filter = EnvFilter::try_new(file_level).map_err(|e| {
        ScreenerError::ConfigError(format!("Invalid file log level filter '{}': {}", file_level, e))
    })?;
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_appender)
        .with_ansi(false)
        .with_span_events(FmtSpan::CLOSE)
        .json()
        .with_filter(file_filter);

    // --- Console Logger ---
    let console_filter = EnvFilter::try_new(console_level).map_err(|e| {
        ScreenerError::ConfigError(format!(
            "Invalid console log level filter '{}': {}",
            console_level, e
        ))
    })?;
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| {
            ScreenerError::InternalError(format!("Failed to initialize tracing subscriber: {}", e))
        })?;

    Ok(guard)
}

/// Running counters for the poll loop, shared with the proxy's health route
#[derive(Debug, Default)]
pub struct PollStats {
    successes: AtomicU64,
    failures: AtomicU64,
    last_event: Mutex<Option<PollEvent>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollStatsReport {
    pub successes: u64,
    pub failures: u64,
    pub last_tick: Option<u64>,
    pub last_error: Option<String>,
    pub last_poll_at: Option<DateTime<Utc>>,
}

impl PollStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a tick and logs it under the `poll_event` target
    pub fn record(&self, event: PollEvent) {
        if event.is_failure() {
            self.failures.fetch_add(1, Ordering::Relaxed);
            warn!(
                target: "poll_event",
                tick = event.tick,
                outcome = ?event.outcome,
                details = event.details.as_deref().unwrap_or(""),
                "Poll tick failed"
            );
        } else {
            self.successes.fetch_add(1, Ordering::Relaxed);
            info!(
                target: "poll_event",
                tick = event.tick,
                tokens = event.token_count,
                newly_graduated = event.newly_graduated,
                "Poll tick replaced snapshot"
            );
        }
        if let Ok(mut last) = self.last_event.lock() {
            *last = Some(event);
        }
    }

    pub fn report(&self) -> PollStatsReport {
        let last = self.last_event.lock().ok().and_then(|last| last.clone());
        PollStatsReport {
            successes: self.successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            last_tick: last.as_ref().map(|e| e.tick),
            last_error: last.as_ref().and_then(|e| e.details.clone()),
            last_poll_at: last.map(|e| e.timestamp),
        }
    }
}
