//! Configuration and CLI argument handling

use clap::Parser;

use crate::engine::ClockZone;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-timer")]
#[command(about = "A preset countdown timer with a live display and end time")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Show end times in UTC instead of local time
    #[arg(long)]
    pub utc: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Zone end times are rendered in
    pub fn zone(&self) -> ClockZone {
        if self.utc { ClockZone::Utc } else { ClockZone::Local }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["countdown-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.zone(), ClockZone::Local);
    }

    #[test]
    fn flags() {
        let config =
            Config::try_parse_from(["countdown-timer", "-p", "8080", "--utc", "-v"]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.zone(), ClockZone::Utc);
    }
}
