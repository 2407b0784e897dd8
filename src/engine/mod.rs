//! Countdown engine
//!
//! The engine turns a duration into a live `MM:SS` countdown and a fixed
//! `H:MM` end time, publishing both through a [`watch`] channel. Time comes
//! from an injected [`Clock`] and the once-per-second recomputation is armed
//! through an injected [`Scheduler`], so several engines can run side by side
//! and tests can drive one with [`sim::ManualClock`] and
//! [`sim::ManualScheduler`].

pub mod clock;
pub mod format;
pub mod scheduler;
pub mod sim;

use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::state::{DisplayState, SessionId, TimerSession, END_TIME_NONE};

pub use clock::{Clock, ClockZone, SystemClock};
pub use format::{format_end_time, format_time_left, format_wall_time};
pub use scheduler::{Scheduler, TokioScheduler};

/// Interval between recomputations of the remaining time
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Engine lifecycle. `Running` owns the only live tick registration.
#[derive(Debug)]
enum EngineState<H> {
    Idle,
    Running { session: TimerSession, handle: H },
}

/// Countdown driven by `start` calls and scheduler ticks
pub struct CountdownEngine<C, S: Scheduler> {
    clock: C,
    scheduler: S,
    state: EngineState<S::Handle>,
    last_session: SessionId,
    display_tx: watch::Sender<DisplayState>,
}

impl<C: Clock, S: Scheduler> CountdownEngine<C, S> {
    /// Create an idle engine showing the initial display
    pub fn new(clock: C, scheduler: S) -> Self {
        let (display_tx, _) = watch::channel(DisplayState::new());
        Self {
            clock,
            scheduler,
            state: EngineState::Idle,
            last_session: SessionId::new(0),
            display_tx,
        }
    }

    /// Start a countdown of `duration_seconds`, replacing any running one.
    ///
    /// A zero duration expires immediately: the display shows `00:00` with no
    /// end time and nothing is armed.
    pub fn start(&mut self, duration_seconds: u64) {
        self.disarm();

        if duration_seconds == 0 {
            warn!("Ignoring zero-length countdown");
            self.display_tx.send_modify(|display| {
                display.time_left = format_time_left(0);
                display.end_time = END_TIME_NONE.to_string();
                display.selected_seconds = 0;
            });
            return;
        }

        let id = self.last_session.next();
        self.last_session = id;
        let session = TimerSession::new(id, self.clock.now_ms(), duration_seconds);

        let end_time = self.end_time_text(session.end_at_ms);
        info!(
            "Starting countdown {} for {}s, ends at {}",
            id, duration_seconds, end_time
        );
        self.display_tx.send_modify(|display| {
            display.time_left = format_time_left(duration_seconds);
            display.end_time = end_time;
            display.selected_seconds = duration_seconds;
        });

        let handle = self.scheduler.schedule_every(TICK_PERIOD, id);
        self.state = EngineState::Running { session, handle };
    }

    /// Recompute the display for a scheduler firing of `session`.
    ///
    /// Firings for anything other than the running session are ignored.
    pub fn tick(&mut self, session: SessionId) {
        let current = match &self.state {
            EngineState::Running { session: current, .. } if current.id == session => *current,
            _ => {
                debug!("Ignoring tick for stale session {}", session);
                return;
            }
        };

        let seconds_left = current.seconds_left(self.clock.now_ms());
        if seconds_left < 0 {
            info!("Countdown {} finished", session);
            self.disarm();
            return;
        }

        debug!("Countdown {}: {}s left", session, seconds_left);
        self.display_tx.send_modify(|display| {
            if seconds_left == 0 {
                display.end_time = END_TIME_NONE.to_string();
            }
            display.time_left = format_time_left(seconds_left as u64);
        });
    }

    /// Current display
    pub fn display(&self) -> DisplayState {
        self.display_tx.borrow().clone()
    }

    /// Receiver notified on every display update
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.display_tx.subscribe()
    }

    /// The running session, if any
    pub fn session(&self) -> Option<&TimerSession> {
        match &self.state {
            EngineState::Running { session, .. } => Some(session),
            EngineState::Idle => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, EngineState::Running { .. })
    }

    fn end_time_text(&self, end_at_ms: i64) -> String {
        self.clock.end_time_text(end_at_ms).unwrap_or_else(|| {
            warn!("End timestamp {} is out of range", end_at_ms);
            END_TIME_NONE.to_string()
        })
    }
}

impl<C, S: Scheduler> CountdownEngine<C, S> {
    /// Cancel the live registration, if any, and go idle
    fn disarm(&mut self) {
        if let EngineState::Running { session, handle } =
            std::mem::replace(&mut self.state, EngineState::Idle)
        {
            debug!("Cancelling ticks for session {}", session.id);
            self.scheduler.cancel(handle);
        }
    }
}

impl<C, S: Scheduler> Drop for CountdownEngine<C, S> {
    fn drop(&mut self) {
        self.disarm();
    }
}
