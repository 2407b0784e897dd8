//! Countdown Timer - A preset countdown with a live display and end time
//! 
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::{net::TcpListener, sync::mpsc};
use tracing::info;

use countdown_timer::{
    config::Config,
    engine::{SystemClock, TokioScheduler},
    state::{default_presets, AppState},
    api::create_router,
    tasks::{display_log_task, tick_dispatch_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, zone={:?}",
          config.host, config.port, config.zone());

    // Scheduler firings travel to the tick dispatch task over this channel
    let (tick_tx, tick_rx) = mpsc::unbounded_channel();

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        default_presets(),
        SystemClock::new(config.zone()),
        TokioScheduler::new(tick_tx),
    ));

    // Start the background tasks
    tokio::spawn(tick_dispatch_task(Arc::clone(&state), tick_rx));
    let display_rx = state.subscribe().map_err(anyhow::Error::msg)?;
    tokio::spawn(display_log_task(display_rx));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /presets         - List preset durations");
    info!("  POST /timer/:seconds  - Start a preset countdown");
    info!("  GET  /display         - Current time left and end time");
    info!("  GET  /health          - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Signal handler failed: {}", e),
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
