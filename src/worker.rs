//! The stream worker: one HTTP client process and the reader draining it.

use std::process::ExitStatus;
use std::time::Duration;
use tokio::io::{AsyncWrite, BufReader};
use tokio::sync::oneshot;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::curl::StreamClient;
use super::errors::{ErrorKind, Result};
use super::reader::{read_lines, ReadEnd};

/// How long a client may keep running after closing its stdout.
pub const CLOSE_GRACE: Duration = Duration::from_secs(1);

/// How a worker finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The terminator line was received.
    Terminated,
    /// The client closed its stdout without sending the terminator. A client still running
    /// [`CLOSE_GRACE`] after that is killed.
    Closed {
        /// Exit status of the client. curl reports HTTP and connection failures here.
        status: ExitStatus,
    },
    /// The worker was told to stop.
    Stopped,
}

/// Follow `url` with `client`, writing every line to `out`.
///
/// Resolving `stop` (or dropping its sender) kills the client and returns
/// [`StreamEnd::Stopped`]. The client process is always killed or reaped before this returns.
pub async fn watch<W>(
    client: &StreamClient,
    url: &str,
    out: &mut W,
    mut stop: oneshot::Receiver<()>,
) -> Result<StreamEnd>
where
    W: AsyncWrite + Unpin,
{
    let mut child = client.spawn(url)?;
    info!(pid = ?child.id(), program = client.program(), "stream client started");

    let stdout = child.stdout.take().ok_or(ErrorKind::NoClientStdout)?;
    let mut reader = BufReader::new(stdout);

    let read = read_lines(&mut reader, out, &mut stop).await;

    match read {
        Ok(ReadEnd::Stopped) => {
            debug!("stop signal received, killing stream client");
            child.kill().await?;
            Ok(StreamEnd::Stopped)
        }
        Ok(ReadEnd::Terminated) => {
            // The client may still be streaming; nothing after the terminator is wanted.
            if let Err(err) = child.kill().await {
                warn!(error = %err, "failed to kill stream client");
            }
            info!("stream terminated");
            Ok(StreamEnd::Terminated)
        }
        Ok(ReadEnd::Eof) => {
            // A client can close stdout and keep running. Give it a moment, then kill it.
            let status = tokio::select! {
                status = child.wait() => status?,
                _ = &mut stop => {
                    debug!("stop signal received after stream closed, killing stream client");
                    child.kill().await?;
                    return Ok(StreamEnd::Stopped);
                }
                _ = sleep(CLOSE_GRACE) => {
                    warn!(grace = ?CLOSE_GRACE, "stream client still running after closing the stream, killing it");
                    child.kill().await?;
                    child.wait().await?
                }
            };
            if status.success() {
                info!("stream closed by client");
            } else {
                warn!(%status, "stream client exited unsuccessfully");
            }
            Ok(StreamEnd::Closed { status })
        }
        Err(err) => {
            if let Err(kill_err) = child.kill().await {
                warn!(error = %kill_err, "failed to kill stream client");
            }
            Err(err)
        }
    }
}
