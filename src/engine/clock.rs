//! Wall-clock source for the countdown engine

use chrono::{Local, Utc};

use super::format::format_end_time;

/// Source of the current time and of the zone end times are rendered in
pub trait Clock {
    /// Current time as epoch milliseconds
    fn now_ms(&self) -> i64;

    /// Render an epoch-millisecond timestamp as a `H:MM` wall-clock string
    fn end_time_text(&self, timestamp_ms: i64) -> Option<String>;
}

/// Zone used when rendering end times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockZone {
    #[default]
    Local,
    Utc,
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    zone: ClockZone,
}

impl SystemClock {
    pub fn new(zone: ClockZone) -> Self {
        Self { zone }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }

    fn end_time_text(&self, timestamp_ms: i64) -> Option<String> {
        match self.zone {
            ClockZone::Local => format_end_time(timestamp_ms, &Local),
            ClockZone::Utc => format_end_time(timestamp_ms, &Utc),
        }
    }
}
