//! State management module
//! 
//! This module contains the countdown's data structures and the application
//! state that hosts the engine.

pub mod app_state;
pub mod display_state;
pub mod presets;
pub mod timer_session;

// Re-export main types
pub use app_state::{AppState, HostedEngine};
pub use display_state::{DisplayState, END_TIME_NONE};
pub use presets::{default_presets, find_preset, Preset};
pub use timer_session::{SessionId, TimerSession};
