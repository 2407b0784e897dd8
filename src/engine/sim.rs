//! Simulated clock and scheduler for driving the engine without real delays

use std::{
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc, Mutex, MutexGuard,
    },
    time::Duration,
};

use chrono::{FixedOffset, Offset, Utc};

use super::{format::format_end_time, Clock, Scheduler};
use crate::state::SessionId;

/// Clock whose time only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ms: Arc<AtomicI64>,
    offset: FixedOffset,
}

impl ManualClock {
    /// Clock starting at `now_ms` that renders end times in UTC
    pub fn new(now_ms: i64) -> Self {
        Self::with_offset(now_ms, Utc.fix())
    }

    pub fn with_offset(now_ms: i64, offset: FixedOffset) -> Self {
        Self {
            now_ms: Arc::new(AtomicI64::new(now_ms)),
            offset,
        }
    }

    /// Move the clock forward, saturating at `i64::MAX`
    pub fn advance(&self, by: Duration) {
        let by_ms = millis(by);
        let _ = self
            .now_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(by_ms))
            });
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }

    fn end_time_text(&self, timestamp_ms: i64) -> Option<String> {
        format_end_time(timestamp_ms, &self.offset)
    }
}

fn millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

#[derive(Debug)]
struct Registration {
    id: u64,
    session: SessionId,
    period_ms: i64,
    next_due_ms: i64,
}

#[derive(Debug, Default)]
struct Registrations {
    next_id: u64,
    live: Vec<Registration>,
}

/// Scheduler that records registrations and fires them against a
/// [`ManualClock`]. Clones share the same registrations.
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    clock: ManualClock,
    registrations: Arc<Mutex<Registrations>>,
}

impl ManualScheduler {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            registrations: Arc::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registrations> {
        self.registrations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of registrations that have not been cancelled
    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    /// Collect every firing that is due at the clock's current time, in
    /// firing order. A registration that missed several periods fires once
    /// per missed period.
    pub fn due(&self) -> Vec<SessionId> {
        let now = self.clock.now_ms();
        let mut registrations = self.lock();

        let mut fired: Vec<(i64, SessionId)> = Vec::new();
        for registration in registrations.live.iter_mut() {
            while registration.next_due_ms <= now {
                fired.push((registration.next_due_ms, registration.session));
                match registration.next_due_ms.checked_add(registration.period_ms) {
                    Some(next) => registration.next_due_ms = next,
                    None => {
                        registration.next_due_ms = i64::MAX;
                        break;
                    }
                }
            }
        }
        fired.sort_by_key(|(due_ms, _)| *due_ms);
        fired.into_iter().map(|(_, session)| session).collect()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = u64;

    fn schedule_every(&mut self, period: Duration, session: SessionId) -> u64 {
        let period_ms = millis(period).max(1);
        let next_due_ms = self.clock.now_ms().saturating_add(period_ms);

        let mut registrations = self.lock();
        let id = registrations.next_id;
        registrations.next_id += 1;
        registrations.live.push(Registration {
            id,
            session,
            period_ms,
            next_due_ms,
        });
        id
    }

    fn cancel(&mut self, handle: u64) {
        self.lock().live.retain(|registration| registration.id != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registrations_fire_per_elapsed_period() {
        let clock = ManualClock::new(0);
        let mut scheduler = ManualScheduler::new(clock.clone());
        let session = SessionId::new(1);

        scheduler.schedule_every(Duration::from_secs(1), session);
        assert!(scheduler.due().is_empty());

        clock.advance(Duration::from_millis(999));
        assert!(scheduler.due().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(scheduler.due(), vec![session]);

        clock.advance(Duration::from_secs(3));
        assert_eq!(scheduler.due(), vec![session, session, session]);
    }

    #[test]
    fn cancel_removes_only_that_registration() {
        let clock = ManualClock::new(0);
        let mut scheduler = ManualScheduler::new(clock.clone());

        let first = scheduler.schedule_every(Duration::from_secs(1), SessionId::new(1));
        scheduler.schedule_every(Duration::from_secs(1), SessionId::new(2));
        scheduler.cancel(first);
        scheduler.cancel(first);

        assert_eq!(scheduler.live_count(), 1);
        clock.advance(Duration::from_secs(1));
        assert_eq!(scheduler.due(), vec![SessionId::new(2)]);
    }

    #[test]
    fn huge_durations_saturate_instead_of_wrapping() {
        let clock = ManualClock::new(0);
        let mut scheduler = ManualScheduler::new(clock.clone());

        scheduler.schedule_every(Duration::MAX, SessionId::new(1));
        clock.advance(Duration::from_secs(10));
        assert!(scheduler.due().is_empty());
        assert_eq!(scheduler.live_count(), 1);

        clock.advance(Duration::MAX);
        assert_eq!(clock.now_ms(), i64::MAX);
        assert_eq!(scheduler.due(), vec![SessionId::new(1)]);

        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now_ms(), i64::MAX);
    }
}
