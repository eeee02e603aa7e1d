//! Frame struct and the pluggable frame contract.
//!
//! A [`Connection`](crate::Connection) never depends on a concrete frame
//! type: outbound frames are serialized through [`StompFrame::to_wire`] and
//! inbound frames are built through the injected [`FrameFactory`]. The
//! built-in [`Frame`] backed by `bytes::Bytes` is the default.
//!
//! # Example
//!
//! ```
//! use stompwire::protocol::{Command, Frame, StompFrame};
//!
//! let mut frame = Frame::new();
//! frame.set_command(Command::Send);
//! frame.set_header("destination", "/queue/a");
//! frame.set_body("hello".into());
//!
//! let bytes = frame.to_wire().unwrap();
//! assert_eq!(&bytes[..], b"SEND\ndestination:/queue/a\n\nhello\x00");
//! ```

use std::fmt;

use bytes::Bytes;

use super::command::Command;
use super::headers::Headers;
use super::wire_format;
use crate::error::{Result, StompError};

/// Capability contract for a frame representation.
///
/// Anything that can hold a command, an ordered header map, and a body, and
/// serialize itself to wire bytes, can travel through a `Connection`.
pub trait StompFrame: fmt::Debug + Send {
    /// The command verb, if one has been set.
    fn command(&self) -> Option<Command>;

    /// Set the command verb. Required before serialization.
    fn set_command(&mut self, command: Command);

    /// The header map, in insertion order.
    fn headers(&self) -> &Headers;

    /// Get a single header value.
    fn header(&self, name: &str) -> Option<&str>;

    /// Set a single header.
    fn set_header(&mut self, name: &str, value: &str);

    /// Replace the whole header map.
    fn set_headers(&mut self, headers: Headers);

    /// The body bytes.
    fn body(&self) -> &[u8];

    /// Replace the body bytes.
    fn set_body(&mut self, body: Bytes);

    /// Serialize to wire bytes.
    ///
    /// Fails with [`StompError::Logic`] when no command is set or a body
    /// invariant is violated (see [`wire_format::encode`]).
    fn to_wire(&self) -> Result<Bytes>;
}

/// Factory producing empty frames for a `Connection` to fill in.
pub trait FrameFactory: Send + Sync {
    /// Build an empty frame: no command, no headers, empty body.
    fn create(&self) -> Box<dyn StompFrame>;
}

/// The built-in frame implementation.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    command: Option<Command>,
    headers: Headers,
    body: Bytes,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse complete wire bytes into a frame.
    pub fn from_wire(raw: &[u8]) -> Result<Self> {
        let (command, headers, body) = wire_format::parse(raw)?;
        Ok(Self {
            command: Some(command),
            headers,
            body,
        })
    }
}

impl StompFrame for Frame {
    fn command(&self) -> Option<Command> {
        self.command
    }

    fn set_command(&mut self, command: Command) {
        self.command = Some(command);
    }

    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.set(name, value);
    }

    fn set_headers(&mut self, headers: Headers) {
        self.headers = headers;
    }

    fn body(&self) -> &[u8] {
        &self.body
    }

    fn set_body(&mut self, body: Bytes) {
        self.body = body;
    }

    fn to_wire(&self) -> Result<Bytes> {
        let command = self
            .command
            .ok_or_else(|| StompError::Logic("frame command is not set".to_string()))?;
        wire_format::encode(command, &self.headers, &self.body)
    }
}

/// Factory for the built-in [`Frame`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFrameFactory;

impl FrameFactory for DefaultFrameFactory {
    fn create(&self) -> Box<dyn StompFrame> {
        Box::new(Frame::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let mut frame = Frame::new();
        assert_eq!(frame.command(), None);
        assert!(frame.headers().is_empty());
        assert!(frame.body().is_empty());

        frame.set_command(Command::Send);
        frame.set_header("destination", "/q");
        frame.set_body(Bytes::from_static(b"data"));

        assert_eq!(frame.command(), Some(Command::Send));
        assert_eq!(frame.header("destination"), Some("/q"));
        assert_eq!(frame.body(), b"data");
    }

    #[test]
    fn test_to_wire_requires_command() {
        let frame = Frame::new();
        assert!(matches!(frame.to_wire(), Err(StompError::Logic(_))));
    }

    #[test]
    fn test_set_headers_replaces_map() {
        let mut frame = Frame::new();
        frame.set_header("old", "1");

        let mut headers = Headers::new();
        headers.set("new", "2");
        frame.set_headers(headers);

        assert_eq!(frame.header("old"), None);
        assert_eq!(frame.header("new"), Some("2"));
    }

    #[test]
    fn test_from_wire_roundtrip() {
        let mut frame = Frame::new();
        frame.set_command(Command::Message);
        frame.set_header("message-id", "m-1");
        frame.set_body(Bytes::from_static(b"hello"));

        let bytes = frame.to_wire().unwrap();
        let parsed = Frame::from_wire(&bytes).unwrap();

        assert_eq!(parsed.command(), Some(Command::Message));
        assert_eq!(parsed.header("message-id"), Some("m-1"));
        assert_eq!(parsed.body(), b"hello");
    }

    #[test]
    fn test_default_factory_produces_empty_frame() {
        let frame = DefaultFrameFactory.create();
        assert_eq!(frame.command(), None);
        assert!(frame.headers().is_empty());
        assert!(frame.body().is_empty());
    }
}
