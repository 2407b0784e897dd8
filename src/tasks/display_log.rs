//! Display logging background task

use tokio::sync::watch;
use tracing::debug;

use crate::state::DisplayState;

/// Background task that logs every published display change
pub async fn display_log_task(mut display_rx: watch::Receiver<DisplayState>) {
    debug!("Starting display log task");

    while display_rx.changed().await.is_ok() {
        let current = display_rx.borrow_and_update().clone();
        if current.has_end_time() {
            debug!("Time left {} (ends {})", current.time_left, current.end_time);
        } else {
            debug!("Time left {}", current.time_left);
        }
    }
}
