//! # sse-watch
//!
//! sse-watch follows a single Server-Sent Events endpoint through an external HTTP client
//! (`curl` by default) and echoes every line it receives. It stops when the stream sends the
//! `event: end` line, when the client closes the stream, or when a deadline passes, in which case
//! the client process is killed.
//!
//! # Examples
//!
//! ```no_run
//! use sse_watch::config::Config;
//! use sse_watch::launcher;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::new("http://example.com/events").with_timeout(Duration::from_secs(10));
//!     let outcome = launcher::run(&config, tokio::io::stdout()).await.unwrap();
//!     println!("{:?}", outcome);
//! }
//! ```
//!

#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;

pub mod errors;

// Line classification and reading.
pub mod line;
pub mod reader;

// HTTP client subprocess.
pub mod curl;

// Worker and its supervisor.
pub mod launcher;
pub mod worker;

pub mod config;
