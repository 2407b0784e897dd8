//! Main application state management

use std::{
    sync::{Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::engine::{CountdownEngine, SystemClock, TokioScheduler};
use super::{find_preset, DisplayState, Preset, SessionId};

/// Engine as hosted by the server
pub type HostedEngine = CountdownEngine<SystemClock, TokioScheduler>;

/// Main application state that owns the countdown engine and its presets
pub struct AppState {
    /// The countdown engine, driven by handlers and the tick dispatch task
    pub engine: Mutex<HostedEngine>,
    /// Preset durations offered to the view layer
    pub presets: Vec<Preset>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a new AppState around an idle engine
    pub fn new(
        port: u16,
        host: String,
        presets: Vec<Preset>,
        clock: SystemClock,
        scheduler: TokioScheduler,
    ) -> Self {
        Self {
            engine: Mutex::new(CountdownEngine::new(clock, scheduler)),
            presets,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    fn lock_engine(&self) -> Result<MutexGuard<'_, HostedEngine>, String> {
        self.engine
            .lock()
            .map_err(|e| format!("Failed to lock countdown engine: {}", e))
    }

    /// Start the countdown for a preset duration.
    ///
    /// Durations that are not in the preset catalog are rejected.
    pub fn start_preset(&self, seconds: u64) -> Result<DisplayState, String> {
        let preset = find_preset(&self.presets, seconds)
            .ok_or_else(|| format!("No preset of {} seconds", seconds))?;
        info!("Starting preset {} ({}s)", preset.label, preset.seconds);

        let mut engine = self.lock_engine()?;
        engine.start(preset.seconds);
        let display = engine.display();
        drop(engine); // Release the lock early

        self.record_action(format!("start {}", preset.label));
        Ok(display)
    }

    /// Apply a scheduler firing for `session`
    pub fn tick(&self, session: SessionId) -> Result<(), String> {
        self.lock_engine()?.tick(session);
        Ok(())
    }

    /// Get current display state
    pub fn get_display(&self) -> Result<DisplayState, String> {
        self.lock_engine().map(|engine| engine.display())
    }

    /// Whether a countdown is currently armed
    pub fn is_running(&self) -> Result<bool, String> {
        self.lock_engine().map(|engine| engine.is_running())
    }

    /// Receiver for display updates
    pub fn subscribe(&self) -> Result<watch::Receiver<DisplayState>, String> {
        self.lock_engine().map(|engine| engine.subscribe())
    }

    fn record_action(&self, action: String) {
        debug!("Recording last action: {}", action);
        match self.last_action.lock() {
            Ok(mut last_action) => *last_action = Some(action),
            Err(e) => warn!("Failed to record last action: {}", e),
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
