use std::str;

use super::errors::Result;

/// The line that ends a stream. Only an exact match, trailing newline included, counts.
pub const TERMINATOR: &[u8] = b"event: end\n";

/// Possible results from classifying a single line of the stream.
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// Decoded line with surrounding whitespace stripped, ready to be printed.
    Print(String),
    /// The terminator line. Stop reading.
    Terminate,
}

/// Classify a single line read from the HTTP client.
///
/// The line should include its newline, as returned by `read_until(b'\n', ..)`. Anything that is
/// not exactly [`TERMINATOR`] is decoded as UTF-8 and stripped. Malformed UTF-8 is an error.
///
/// # Examples
///
/// ```
/// # use sse_watch::line::{LineOutcome, classify_line};
/// assert_eq!(classify_line(b"data: hello\n").unwrap(), LineOutcome::Print("data: hello".into()));
/// assert_eq!(classify_line(b"event: end\n").unwrap(), LineOutcome::Terminate);
/// // Only the full line counts.
/// assert_eq!(
///     classify_line(b"data: event: end\n").unwrap(),
///     LineOutcome::Print("data: event: end".into()));
/// ```
pub fn classify_line(line: &[u8]) -> Result<LineOutcome> {
    if line == TERMINATOR {
        return Ok(LineOutcome::Terminate);
    }
    let text = str::from_utf8(line)?;
    Ok(LineOutcome::Print(text.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn strips_surrounding_whitespace() {
        assert_eq!(classify_line(b"  data: hi \r\n").unwrap(), LineOutcome::Print("data: hi".into()));
        assert_eq!(classify_line(b"\n").unwrap(), LineOutcome::Print("".into()));
        assert_eq!(classify_line(b"id: 7").unwrap(), LineOutcome::Print("id: 7".into()));
    }

    #[test]
    fn terminator_needs_exact_line() {
        assert_eq!(classify_line(b"event: end\n").unwrap(), LineOutcome::Terminate);
        // No newline means the stream closed mid-line.
        assert_eq!(classify_line(b"event: end").unwrap(), LineOutcome::Print("event: end".into()));
        assert_eq!(classify_line(b"event: end\r\n").unwrap(), LineOutcome::Print("event: end".into()));
        assert_eq!(classify_line(b" event: end\n").unwrap(), LineOutcome::Print("event: end".into()));
        assert_eq!(classify_line(b"event: ended\n").unwrap(), LineOutcome::Print("event: ended".into()));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        match classify_line(b"data: \xff\xfe\n") {
            Err(err) => match *err.kind() {
                ErrorKind::Utf8(_) => (),
                ref other => panic!("expected Utf8 error, got {:?}", other),
            },
            Ok(outcome) => panic!("expected an error, got {:?}", outcome),
        }
    }
}
