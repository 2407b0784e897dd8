//! Timer session structure and remaining-time arithmetic

use std::fmt;
use serde::{Deserialize, Serialize};

/// Identifier of one countdown run, unique per engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The id following this one
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One countdown from start to expiry or replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSession {
    pub id: SessionId,
    pub started_at_ms: i64,
    pub end_at_ms: i64,
    pub duration_seconds: u64,
}

impl TimerSession {
    /// Create a session ending `duration_seconds` after `started_at_ms`
    pub fn new(id: SessionId, started_at_ms: i64, duration_seconds: u64) -> Self {
        let duration_ms = i64::try_from(duration_seconds)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000);
        Self {
            id,
            started_at_ms,
            end_at_ms: started_at_ms.saturating_add(duration_ms),
            duration_seconds,
        }
    }

    /// Whole seconds until the end, rounded half up. Negative once the end
    /// has passed by at least half a second.
    pub fn seconds_left(&self, now_ms: i64) -> i64 {
        (self.end_at_ms.saturating_sub(now_ms).saturating_add(500)).div_euclid(1000)
    }
}
