use anyhow::Context;
use bonkscreener::config::Settings;
use bonkscreener::monitoring::{init_logging, log_utils, PollStats};
use bonkscreener::poller::{PollerCommand, TokenPoller};
use bonkscreener::proxy::{start_server, AppState};
use bonkscreener::render::run_board;
use bonkscreener::simulate::{run_explorer, ExplorerState};
use bonkscreener::source::TokenSource;
use launchpad_core::LaunchpadClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (also picks up .env)
    let settings = Settings::from_env().context("Failed to load settings")?;

    // Initialize logging
    let _guard = init_logging(&settings.log_dir, "debug", &settings.log_level)?;

    match log_utils::rotate_logs(&settings.log_dir) {
        Ok(removed) if removed > 0 => info!(removed, "Rotated old log files"),
        Ok(_) => {}
        Err(e) => warn!(error = %e, "Log rotation failed"),
    }
    if let Ok(bytes) = log_utils::check_log_directory(&settings.log_dir) {
        info!(log_dir = %settings.log_dir, bytes, "Log directory checked");
    }

    let main_span = tracing::info_span!("main_execution");
    let _main_span_guard = main_span.enter();

    info!("Starting BonkScreener...");
    settings.validate()?;
    info!(
        api = %settings.api_base_url,
        platforms = settings.platform_id_list().len(),
        interval_ms = settings.poll_interval_ms,
        "Configuration loaded successfully"
    );

    // Initialize components
    let client = LaunchpadClient::new(settings.launchpad_config())?;
    let source: Arc<dyn TokenSource> = Arc::new(client);
    let stats = Arc::new(PollStats::new());

    let (poller, poller_cmd_tx) =
        TokenPoller::new(source.clone(), settings.thresholds(), settings.poll_interval());
    let poller = poller
        .with_failure_policy(settings.failure_policy)
        .with_stats(stats.clone());
    let store = poller.store();
    let board_updates = poller.subscribe();

    let poller_handle = tokio::spawn(async move {
        if let Err(e) = poller.run().await {
            error!(error = %e, "Token poller stopped with an error");
        }
    });

    if settings.render_board {
        let animation = Duration::from_millis(settings.animation_ms);
        tokio::spawn(run_board(board_updates, settings.animation_frames, animation));
    }

    let proxy_shutdown = Arc::new(Notify::new());
    let explorer_shutdown = Arc::new(Notify::new());
    let proxy_handle = if settings.proxy_enabled {
        let addr = settings.proxy_addr()?;
        let explorer = Arc::new(ExplorerState::new());
        tokio::spawn(run_explorer(
            store.clone(),
            explorer.clone(),
            explorer_shutdown.clone(),
        ));
        let state = Arc::new(AppState::new(source, store, stats).with_explorer(explorer));
        let shutdown = proxy_shutdown.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = start_server(addr, state, shutdown).await {
                error!(error = %e, "Proxy server failed");
            }
        }))
    } else {
        None
    };

    // Handle graceful shutdown (Ctrl+C)
    let shutdown_cmd_tx = poller_cmd_tx.clone();
    let shutdown_notify = proxy_shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            return;
        }
        info!("Ctrl+C received. Shutting down...");
        if shutdown_cmd_tx.send(PollerCommand::Shutdown).await.is_err() {
            error!("Failed to send shutdown command to poller.");
        }
        shutdown_notify.notify_one();
    });

    info!("BonkScreener running. Press Ctrl+C to exit.");

    if let Err(e) = poller_handle.await {
        error!(error = ?e, "Poller task failed or panicked");
    }
    proxy_shutdown.notify_one();
    explorer_shutdown.notify_one();
    if let Some(handle) = proxy_handle {
        if let Err(e) = handle.await {
            error!(error = ?e, "Proxy task failed or panicked");
        }
    }

    info!("BonkScreener shutting down...");
    Ok(())
}
