//! Command line and runtime configuration.

use clap::Parser;
use std::time::Duration;

use super::curl::{StreamClient, DEFAULT_PROGRAM};

/// Seconds to wait for a stream to end before giving up.
pub const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Follow a Server-Sent Events stream until it sends `event: end` or times out.
#[derive(Debug, Parser)]
#[command(name = "sse-watch")]
#[command(version)]
pub struct Args {
    /// Event stream URL
    pub event_url: String,

    /// Seconds to wait for the stream to end
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// curl-compatible HTTP client used to fetch the stream
    #[arg(long, default_value = DEFAULT_PROGRAM)]
    pub client: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Everything a run needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub timeout: Duration,
    pub client: StreamClient,
}

impl Config {
    pub fn new<U: Into<String>>(url: U) -> Config {
        Config {
            url: url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client: StreamClient::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Config {
        self.timeout = timeout;
        self
    }

    pub fn with_client(mut self, client: StreamClient) -> Config {
        self.client = client;
        self
    }

    pub fn from_args(args: &Args) -> Config {
        Config::new(args.event_url.clone())
            .with_timeout(Duration::from_secs(args.timeout))
            .with_client(StreamClient::with_program(args.client.clone()))
    }
}
