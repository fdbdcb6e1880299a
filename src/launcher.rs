//! Runs a worker against a deadline.

use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::oneshot;
use tokio::task::JoinError;
use tokio::time::timeout;
use tracing::{info, warn};

use super::config::Config;
use super::errors::{Error, ErrorKind, Result};
use super::worker::{watch, StreamEnd};

/// How a run finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The worker finished before the deadline.
    Finished(StreamEnd),
    /// The deadline passed and the worker was stopped.
    TimedOut(Duration),
}

impl RunOutcome {
    /// A closed stream counts as success, whatever the client's exit status was.
    pub fn is_success(&self) -> bool {
        match *self {
            RunOutcome::Finished(_) => true,
            RunOutcome::TimedOut(_) => false,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// First line of output.
pub fn banner(url: &str) -> String {
    format!("Event URL:  {}", url)
}

/// Last line of output when the deadline passes.
pub fn timeout_message(limit: Duration) -> String {
    format!("Timeout after {}, stream did not end", format_duration(limit))
}

fn format_duration(d: Duration) -> String {
    match (d.as_secs(), d.subsec_nanos()) {
        (1, 0) => "1 second".to_string(),
        (secs, 0) => format!("{} seconds", secs),
        _ => format!("{:?}", d),
    }
}

fn worker_failed(err: JoinError) -> Error {
    ErrorKind::WorkerFailed(err.to_string()).into()
}

async fn write_line<W: AsyncWrite + Unpin>(out: &mut W, line: &str) -> Result<()> {
    out.write_all(line.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

/// Print the banner, then follow `config.url` until the stream ends or `config.timeout` passes.
///
/// The worker runs as its own task. When the deadline passes it is told to stop, and this only
/// returns once the HTTP client has been killed. Lines go to `out`, the banner first and the
/// timeout warning last.
pub async fn run<W>(config: &Config, mut out: W) -> Result<RunOutcome>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    write_line(&mut out, &banner(&config.url)).await?;

    let (stop_tx, stop_rx) = oneshot::channel();
    let client = config.client.clone();
    let url = config.url.clone();
    let mut worker = tokio::spawn(async move {
        let end = watch(&client, &url, &mut out, stop_rx).await;
        (end, out)
    });

    match timeout(config.timeout, &mut worker).await {
        Ok(joined) => {
            let (end, _) = joined.map_err(worker_failed)?;
            let end = end?;
            info!(?end, "worker finished");
            Ok(RunOutcome::Finished(end))
        }
        Err(_) => {
            warn!(timeout = ?config.timeout, "stream did not end in time, stopping worker");
            // The worker may have finished in the meantime, in which case nobody is listening.
            let _ = stop_tx.send(());
            let (end, mut out) = worker.await.map_err(worker_failed)?;
            match end? {
                StreamEnd::Stopped => {
                    write_line(&mut out, &timeout_message(config.timeout)).await?;
                    Ok(RunOutcome::TimedOut(config.timeout))
                }
                end => Ok(RunOutcome::Finished(end)),
            }
        }
    }
}
