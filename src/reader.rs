//! Echo a line-oriented byte stream until the terminator line.

use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::errors::Result;
use super::line::{classify_line, LineOutcome};

/// Why [`read_lines`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadEnd {
    /// The terminator line was read. Nothing after it was consumed.
    Terminated,
    /// The source has no more data.
    Eof,
    /// `stop` resolved while waiting for the next line.
    Stopped,
}

/// Read `reader` line by line and write every printable line to `out`.
///
/// Each line is written together with its newline and flushed right away, so output shows up as
/// soon as the stream produces it. `stop` is only raced against reading: a line that has been
/// read is always written out completely before `stop` is looked at again.
pub async fn read_lines<R, W, S>(reader: &mut R, out: &mut W, stop: &mut S) -> Result<ReadEnd>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future + Unpin,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = tokio::select! {
            read = reader.read_until(b'\n', &mut line) => read?,
            _ = &mut *stop => {
                debug!("stopped while waiting for a line");
                return Ok(ReadEnd::Stopped);
            }
        };
        if read == 0 {
            debug!("stream closed");
            return Ok(ReadEnd::Eof);
        }
        match classify_line(&line)? {
            LineOutcome::Terminate => {
                debug!("terminator line received");
                return Ok(ReadEnd::Terminated);
            }
            LineOutcome::Print(text) => {
                debug!(len = text.len(), "line received");
                let mut buf = text.into_bytes();
                buf.push(b'\n');
                out.write_all(&buf).await?;
                out.flush().await?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::future;

    async fn read(input: &[u8]) -> (Result<ReadEnd>, String) {
        let mut reader = input;
        let mut out = Vec::new();
        let end = read_lines(&mut reader, &mut out, &mut future::pending::<()>()).await;
        (end, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn prints_lines_until_terminator() {
        let (end, out) = read(b"data: hello\nevent: end\n").await;
        assert_eq!(end.unwrap(), ReadEnd::Terminated);
        assert_eq!(out, "data: hello\n");
    }

    #[tokio::test]
    async fn prints_exactly_the_lines_before_terminator() {
        for n in 0..5 {
            let mut input = String::new();
            for i in 0..n {
                input.push_str(&format!("data: {}\n", i));
            }
            input.push_str("event: end\n");

            let (end, out) = read(input.as_bytes()).await;
            assert_eq!(end.unwrap(), ReadEnd::Terminated);
            assert_eq!(out.lines().count(), n);
        }
    }

    #[tokio::test]
    async fn stops_reading_at_terminator() {
        let mut reader: &[u8] = b"a\nevent: end\nb\n";
        let mut out = Vec::new();
        let end = read_lines(&mut reader, &mut out, &mut future::pending::<()>())
            .await
            .unwrap();
        assert_eq!(end, ReadEnd::Terminated);
        assert_eq!(out, b"a\n");
        assert_eq!(reader, b"b\n");
    }

    #[tokio::test]
    async fn eof_without_terminator() {
        let (end, out) = read(b"id: 1\r\ndata: event: end\n\nevent: end").await;
        assert_eq!(end.unwrap(), ReadEnd::Eof);
        assert_eq!(out, "id: 1\ndata: event: end\n\nevent: end\n");
    }

    #[tokio::test]
    async fn empty_stream() {
        let (end, out) = read(b"").await;
        assert_eq!(end.unwrap(), ReadEnd::Eof);
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn stop_while_waiting_for_data() {
        let (_tx, mut reader) = tokio::io::duplex(64);
        let mut reader = tokio::io::BufReader::new(&mut reader);
        let mut out = Vec::new();
        let end = read_lines(&mut reader, &mut out, &mut future::ready(()))
            .await
            .unwrap();
        assert_eq!(end, ReadEnd::Stopped);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn fails_on_malformed_line() {
        let (end, out) = read(b"ok\n\xc3\x28\nlater\n").await;
        match end {
            Err(ref err) => match *err.kind() {
                ErrorKind::Utf8(_) => (),
                ref other => panic!("expected Utf8 error, got {:?}", other),
            },
            Ok(end) => panic!("expected an error, got {:?}", end),
        }
        assert_eq!(out, "ok\n");
    }
}
