use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::poller::ScreenerSnapshot;

pub mod board;
pub mod format;
pub mod transition;

pub use board::Board;
pub use transition::{Direction, MarketCapTransition};

/// Prints the board to stdout each time the poller publishes a snapshot.
///
/// With `frames > 1` the market caps are animated from their previous values
/// across `animation`. Returns when the poller side of the channel is gone.
pub async fn run_board(
    mut updates: watch::Receiver<Arc<ScreenerSnapshot>>,
    frames: u32,
    animation: Duration,
) {
    let frames = frames.max(1);
    let frame_delay = animation / frames;
    let mut board = Board::new();
    info!(frames, animation_ms = animation.as_millis() as u64, "Starting board renderer");

    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        board.update(&snapshot);
        for frame in 1..=frames {
            let t = frame as f64 / frames as f64;
            println!("{}", board.render(&snapshot, t, Utc::now()));
            if frame < frames {
                sleep(frame_delay).await;
            }
        }
        debug!(tick = snapshot.tick, "Board rendered");
    }

    info!("Snapshot channel closed, board renderer stopped");
}
