//! Wire format encoding and decoding.
//!
//! A frame on the wire is the command line, zero or more header lines, a
//! blank line, the raw body bytes, and a single terminator byte:
//!
//! ```text
//! COMMAND\n
//! header-key:header-value\n
//! \n
//! <body bytes>\x00
//! ```
//!
//! Bodies are binary-safe only when a `content-length` header declares the
//! exact byte count; without it the terminator byte marks the end of frame
//! and must not appear inside the body. Header values are passed through as
//! literal bytes; escaping is the caller's concern.
//!
//! This module is pure: it never performs I/O.

use bytes::{BufMut, Bytes, BytesMut};

use super::command::Command;
use super::headers::Headers;
use crate::error::{Result, StompError};

/// Byte marking the end of a frame.
pub const TERMINATOR: u8 = 0x00;

/// Line delimiter separating the command line and header lines.
pub const LINE_DELIMITER: u8 = b'\n';

/// End-of-frame marker as seen at the end of a line: terminator byte
/// followed by the line delimiter.
pub const END_OF_FRAME: &[u8] = b"\x00\n";

/// Header declaring the exact byte length of the body.
pub const CONTENT_LENGTH: &str = "content-length";

/// Encode a frame as wire bytes.
///
/// Headers are written in insertion order. Enforces the body invariants:
/// a declared `content-length` must equal the body length, and a body
/// without one must not contain the terminator byte.
///
/// # Example
///
/// ```
/// use stompwire::protocol::{wire_format, Command, Headers};
///
/// let mut headers = Headers::new();
/// headers.set("destination", "/queue/a");
/// let bytes = wire_format::encode(Command::Send, &headers, b"hello").unwrap();
/// assert_eq!(&bytes[..], b"SEND\ndestination:/queue/a\n\nhello\x00");
/// ```
pub fn encode(command: Command, headers: &Headers, body: &[u8]) -> Result<Bytes> {
    if let Some(declared) = headers.get(CONTENT_LENGTH) {
        let declared: usize = declared.parse().map_err(|_| {
            StompError::Logic(format!("content-length is not a byte count: {:?}", declared))
        })?;
        if declared != body.len() {
            return Err(StompError::Logic(format!(
                "content-length {} does not match body length {}",
                declared,
                body.len()
            )));
        }
    } else if body.contains(&TERMINATOR) {
        return Err(StompError::Logic(
            "body contains the terminator byte; declare content-length".to_string(),
        ));
    }

    let mut buf = BytesMut::with_capacity(64 + body.len());
    buf.extend_from_slice(command.as_str().as_bytes());
    buf.put_u8(LINE_DELIMITER);
    for (name, value) in headers.iter() {
        buf.extend_from_slice(name.as_bytes());
        buf.put_u8(b':');
        buf.extend_from_slice(value.as_bytes());
        buf.put_u8(LINE_DELIMITER);
    }
    buf.put_u8(LINE_DELIMITER);
    buf.extend_from_slice(body);
    buf.put_u8(TERMINATOR);
    Ok(buf.freeze())
}

/// Extract the command verb from raw frame bytes.
///
/// The command is the first `\n`-terminated line. An empty first line or an
/// unknown verb is a decode error.
pub fn extract_command(raw: &[u8]) -> Result<Command> {
    let line = raw
        .split(|&b| b == LINE_DELIMITER)
        .next()
        .unwrap_or_default();
    let line = std::str::from_utf8(line)
        .map_err(|_| StompError::Decode("command line is not valid UTF-8".to_string()))?
        .trim();
    if line.is_empty() {
        return Err(StompError::Decode(
            "malformed frame: empty command line".to_string(),
        ));
    }
    line.parse()
}

/// Extract the headers from raw frame bytes.
///
/// Parses the lines after the command line up to the first line that is
/// empty after trimming. Each line is split at the first `:`, name and
/// value trimmed. A header line without a colon is a decode error (the
/// parser fails rather than skipping).
pub fn extract_headers(raw: &[u8]) -> Result<Headers> {
    let mut headers = Headers::new();
    let mut lines = raw.split(|&b| b == LINE_DELIMITER);
    lines.next(); // command line

    for line in lines {
        let line = std::str::from_utf8(line)
            .map_err(|_| StompError::Decode("header line is not valid UTF-8".to_string()))?;
        if line.trim().is_empty() {
            break;
        }
        let (name, value) = line.split_once(':').ok_or_else(|| {
            StompError::Decode(format!("malformed header line: {:?}", line))
        })?;
        headers.set(name.trim(), value.trim());
    }
    Ok(headers)
}

/// Extract the body from raw frame bytes.
///
/// The body is everything after the header-terminating blank line, with one
/// trailing line delimiter (if present) and one trailing terminator byte
/// (if present) stripped. Returns an empty body when no blank line exists.
pub fn extract_body(raw: &[u8]) -> Bytes {
    let Some(pos) = raw.windows(2).position(|w| w == b"\n\n") else {
        return Bytes::new();
    };
    let mut body = &raw[pos + 2..];
    if body.last() == Some(&LINE_DELIMITER) {
        body = &body[..body.len() - 1];
    }
    if body.last() == Some(&TERMINATOR) {
        body = &body[..body.len() - 1];
    }
    Bytes::copy_from_slice(body)
}

/// Parse complete frame bytes into command, headers, and body.
pub fn parse(raw: &[u8]) -> Result<(Command, Headers, Bytes)> {
    let command = extract_command(raw)?;
    let headers = extract_headers(raw)?;
    let body = extract_body(raw);
    Ok((command, headers, body))
}
