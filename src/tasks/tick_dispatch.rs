//! Tick dispatch background task

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::state::{AppState, SessionId};

/// Background task that applies scheduler firings to the engine
pub async fn tick_dispatch_task(state: Arc<AppState>, mut tick_rx: mpsc::UnboundedReceiver<SessionId>) {
    info!("Starting tick dispatch task");

    while let Some(session) = tick_rx.recv().await {
        if let Err(e) = state.tick(session) {
            error!("Failed to apply tick for session {}: {}", session, e);
        }
    }

    info!("Tick channel closed, stopping tick dispatch task");
}
