//! Periodic tick scheduling for the countdown engine

use std::time::Duration;
use tokio::{
    sync::mpsc,
    task::AbortHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::state::SessionId;

/// Register-periodic / cancel pair the engine arms its ticks through.
///
/// Every time a registration fires, the host is expected to call
/// [`CountdownEngine::tick`](super::CountdownEngine::tick) with the session
/// it was registered for.
pub trait Scheduler {
    type Handle;

    /// Start firing `session` every `period`, first one `period` from now
    fn schedule_every(&mut self, period: Duration, session: SessionId) -> Self::Handle;

    /// Stop a registration. Cancelling one that already ended is a no-op.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Scheduler that runs each registration as a tokio task and delivers
/// fired session ids over an mpsc channel.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tick_tx: mpsc::UnboundedSender<SessionId>,
}

impl TokioScheduler {
    pub fn new(tick_tx: mpsc::UnboundedSender<SessionId>) -> Self {
        Self { tick_tx }
    }
}

impl Scheduler for TokioScheduler {
    type Handle = AbortHandle;

    fn schedule_every(&mut self, period: Duration, session: SessionId) -> AbortHandle {
        let tick_tx = self.tick_tx.clone();
        let first_tick = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut interval = interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tick_tx.send(session).is_err() {
                    warn!("Tick receiver dropped, stopping ticks for session {}", session);
                    break;
                }
            }
        });
        debug!("Armed {:?} ticks for session {}", period, session);
        task.abort_handle()
    }

    fn cancel(&mut self, handle: AbortHandle) {
        handle.abort();
    }
}
