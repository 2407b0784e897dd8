//! Observable display state read by the view layer

use serde::{Deserialize, Serialize};

/// `end_time` value shown when no end time applies
pub const END_TIME_NONE: &str = "0";

/// Strings the view layer renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Remaining time as `MM:SS`
    pub time_left: String,
    /// Wall-clock end time as `H:MM`, or [`END_TIME_NONE`]
    pub end_time: String,
    /// Duration of the most recently started session
    pub selected_seconds: u64,
}

impl DisplayState {
    /// Display before any countdown has been started
    pub fn new() -> Self {
        Self {
            time_left: "00:00".to_string(),
            end_time: END_TIME_NONE.to_string(),
            selected_seconds: 0,
        }
    }

    /// Whether an end time is currently shown
    pub fn has_end_time(&self) -> bool {
        self.end_time != END_TIME_NONE
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}
