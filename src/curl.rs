//! # curl-based stream client
//!
//! The HTTP work is done by an external client process whose stdout carries the raw event
//! stream.

use std::io;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::debug;

use super::errors::{ErrorKind, Result, ResultExt};

/// Program used when none is configured.
pub const DEFAULT_PROGRAM: &str = "curl";

/// Silent, fail on HTTP errors, follow redirects, no output buffering.
const DEFAULT_FLAGS: &[&str] = &[
    "--silent",
    "--show-error",
    "--fail",
    "--location",
    "--no-buffer",
    "-H",
    "Accept: text/event-stream",
];

/// An external HTTP client invocation.
///
/// The client is run as `<program> <flags...> <url>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamClient {
    program: String,
    flags: Vec<String>,
}

impl Default for StreamClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamClient {
    /// `curl` with the default streaming flags.
    pub fn new() -> StreamClient {
        StreamClient::with_program(DEFAULT_PROGRAM)
    }

    /// A curl-compatible program, run with the default streaming flags.
    pub fn with_program<P: Into<String>>(program: P) -> StreamClient {
        StreamClient {
            program: program.into(),
            flags: DEFAULT_FLAGS.iter().map(|flag| flag.to_string()).collect(),
        }
    }

    /// Any program with its own flags. The URL is still appended last.
    pub fn custom<P, I, S>(program: P, flags: I) -> StreamClient
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StreamClient {
            program: program.into(),
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Builds the command for `url` without starting it.
    ///
    /// stdout is piped, stderr is inherited so the client's own diagnostics reach the terminal.
    /// The child is killed if its handle is dropped.
    pub fn command(&self, url: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.flags)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        cmd
    }

    /// Starts the client against `url`.
    pub fn spawn(&self, url: &str) -> Result<Child> {
        debug!(program = %self.program, flags = ?self.flags, url, "starting stream client");
        match self.command(url).spawn() {
            Ok(child) => Ok(child),
            Err(ref err) if err.kind() == io::ErrorKind::NotFound => {
                Err(ErrorKind::ClientNotFound(self.program.clone()).into())
            }
            Err(err) => Err(err).chain_err(|| ErrorKind::ClientSpawn(self.program.clone())),
        }
    }
}
