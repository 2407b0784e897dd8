//! Preset durations offered to the user

use serde::{Deserialize, Serialize};

/// A fixed duration the user can pick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub seconds: u64,
    pub label: String,
}

impl Preset {
    pub fn new(seconds: u64, label: &str) -> Self {
        Self {
            seconds,
            label: label.to_string(),
        }
    }
}

/// The catalog offered by default: 3 seconds, 10 minutes and 30 minutes
pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new(3, "3s"),
        Preset::new(600, "10m"),
        Preset::new(1800, "30m"),
    ]
}

/// Look up a preset by its duration
pub fn find_preset(presets: &[Preset], seconds: u64) -> Option<&Preset> {
    presets.iter().find(|preset| preset.seconds == seconds)
}
