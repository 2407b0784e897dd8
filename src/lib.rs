//! Countdown Timer - A preset countdown with a live display and end time
//! 
//! This library provides the countdown engine, its display formatting, and
//! the state, tasks and HTTP view layer used to host it.

pub mod config;
pub mod engine;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{Clock, CountdownEngine, Scheduler};
pub use state::{AppState, DisplayState, Preset};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
