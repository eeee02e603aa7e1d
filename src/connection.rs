//! Connection lifecycle and the frame read/write algorithm.
//!
//! One [`Connection`] owns one socket, exclusively. Writes encode a frame
//! and push it to the wire in full; reads run the dual-mode algorithm of
//! the STOMP text protocol:
//!
//! 1. The command and header block are `\n`-delimited lines up to a blank
//!    line.
//! 2. Without a `content-length` header the body is terminator-delimited:
//!    lines are scanned until one ends with the end-of-frame marker.
//! 3. With `content-length` the body is read to the declared byte count,
//!    so it may legitimately contain terminator bytes.
//!
//! There is no background task or internal channel; suspension happens only
//! inside `read`/`write` awaits, and every single read is bounded by the
//! configured timeout. A timeout closes the connection.
//!
//! Dropping an open `Connection` releases the socket without sending a
//! DISCONNECT frame (the non-graceful path, no network I/O). Call
//! [`Connection::close`] with `graceful = true` for an orderly shutdown.

use std::fmt;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::time;

use crate::error::{Result, StompError};
use crate::protocol::{
    wire_format, Command, DefaultFrameFactory, FrameFactory, StompFrame, CONTENT_LENGTH,
    END_OF_FRAME, LINE_DELIMITER,
};
use crate::transport::{Scheme, Socket};

/// Default read timeout, seconds component.
pub const READ_TIMEOUT_DEFAULT_SEC: u64 = 5;

/// Default read timeout, microseconds component.
pub const READ_TIMEOUT_DEFAULT_USEC: u32 = 0;

/// Bounded interval for the `can_read` poll.
const CAN_READ_POLL: Duration = Duration::from_millis(100);

/// Chunk size cap for declared-length body reads.
const READ_CHUNK_SIZE: usize = 8 * 1024;

const NOT_CONNECTED: &str = "not connected to a broker";

/// Connection configuration.
///
/// `timeout_sec` and `timeout_usec` together bound how long any single
/// blocking read may wait; `frame_factory` builds the frames handed back
/// from [`Connection::read`] and [`Connection::create_frame`].
#[derive(Clone)]
pub struct ConnectionOptions {
    /// Read timeout, seconds component.
    pub timeout_sec: u64,
    /// Read timeout, microseconds component.
    pub timeout_usec: u32,
    /// Factory for empty frames.
    pub frame_factory: Arc<dyn FrameFactory>,
}

impl ConnectionOptions {
    /// The combined read timeout.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec) + Duration::from_micros(u64::from(self.timeout_usec))
    }
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            timeout_sec: READ_TIMEOUT_DEFAULT_SEC,
            timeout_usec: READ_TIMEOUT_DEFAULT_USEC,
            frame_factory: Arc::new(DefaultFrameFactory),
        }
    }
}

impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("timeout_sec", &self.timeout_sec)
            .field("timeout_usec", &self.timeout_usec)
            .finish_non_exhaustive()
    }
}

/// A connection to one broker.
///
/// Starts closed; [`open`](Connection::open) transitions it to open,
/// [`close`](Connection::close) (or a detected read timeout) back to
/// closed. All operations take `&mut self`, so concurrent use requires
/// external serialization.
#[derive(Debug, Default)]
pub struct Connection {
    /// `None` = closed. The reader buffers line reads; writes pass through.
    socket: Option<BufReader<Socket>>,
    options: ConnectionOptions,
}

impl Connection {
    /// Create a closed connection with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a socket to `scheme://host:port` and record the options.
    ///
    /// The configured read timeout bounds every subsequent blocking read on
    /// the stream. Fails with a connection error carrying the endpoint and
    /// the underlying cause.
    pub async fn open(
        &mut self,
        scheme: Scheme,
        host: &str,
        port: u16,
        options: ConnectionOptions,
    ) -> Result<()> {
        let socket = Socket::connect(scheme, host, port).await.map_err(|e| {
            StompError::Connection(format!(
                "unable to connect to {}://{}:{}: {}",
                scheme, host, port, e
            ))
        })?;
        tracing::debug!("connected to {}://{}:{}", scheme, host, port);
        self.socket = Some(BufReader::new(socket));
        self.options = options;
        Ok(())
    }

    /// Check that the connection is open.
    ///
    /// Called internally before every write and at the start of every read.
    /// No network round trip is made.
    pub fn ping(&self) -> Result<()> {
        if self.socket.is_some() {
            Ok(())
        } else {
            Err(StompError::Connection(NOT_CONNECTED.to_string()))
        }
    }

    /// The effective options.
    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// The configured frame factory.
    pub fn frame_factory(&self) -> &Arc<dyn FrameFactory> {
        &self.options.frame_factory
    }

    /// Replace the frame factory.
    pub fn set_frame_factory(&mut self, factory: Arc<dyn FrameFactory>) {
        self.options.frame_factory = factory;
    }

    /// Write a frame to the broker.
    ///
    /// The frame is encoded and written in full; any failure is fatal for
    /// the write (never retried) and surfaces as a write error. Returns
    /// `&mut Self` for the fluent `write(..).await?.read()` pattern.
    pub async fn write(&mut self, frame: &dyn StompFrame) -> Result<&mut Self> {
        self.ping()?;
        let bytes = frame.to_wire()?;

        let socket = self.socket_mut()?;
        socket
            .write_all(&bytes)
            .await
            .map_err(|e| StompError::Write(format!("no bytes written: {}", e)))?;
        socket
            .flush()
            .await
            .map_err(|e| StompError::Write(format!("no bytes written: {}", e)))?;
        tracing::trace!("wrote {} byte frame", bytes.len());
        Ok(self)
    }

    /// Read one frame from the broker, or `None` when no data is available.
    ///
    /// Runs the dual-mode body algorithm described at the module level.
    /// End-of-stream is a normal stop condition for whichever phase it
    /// interrupts; a timeout closes the connection and fails.
    ///
    /// Limitation inherited from the wire format: without `content-length`
    /// the scan stops at the first line ending in terminator + delimiter,
    /// so a body containing that two-byte sequence is cut short there.
    /// Bodies that may contain the terminator byte must declare
    /// `content-length`.
    pub async fn read(&mut self) -> Result<Option<Box<dyn StompFrame>>> {
        self.ping()?;

        let mut response = BytesMut::new();

        // Command and header block: lines up to the first blank one.
        loop {
            let mut line = Vec::new();
            if self.read_line(&mut line).await? == 0 {
                break; // end of stream
            }
            response.extend_from_slice(&line);
            if is_blank(&line) {
                break;
            }
        }

        // content-length decides how the body is delimited.
        let headers = wire_format::extract_headers(&response)?;

        match headers.get(CONTENT_LENGTH) {
            None => loop {
                let mut chunk = Vec::new();
                if self.read_line(&mut chunk).await? == 0 {
                    break; // end of stream
                }
                let done = chunk.ends_with(END_OF_FRAME);
                response.extend_from_slice(&chunk);
                if done {
                    break;
                }
            },
            Some(value) => {
                let content_length: usize = value.parse().map_err(|_| {
                    StompError::Decode(format!("bad content-length value: {:?}", value))
                })?;
                // +2 for the terminator byte and trailing delimiter that
                // follow a declared-length body.
                let mut remaining = content_length.checked_add(2).ok_or_else(|| {
                    StompError::Decode(format!("bad content-length value: {:?}", value))
                })?;
                let mut buf = vec![0u8; remaining.min(READ_CHUNK_SIZE)];
                while remaining > 0 {
                    let len = buf.len().min(remaining);
                    let n = self.read_chunk(&mut buf[..len]).await?;
                    if n == 0 {
                        break; // end of stream
                    }
                    response.extend_from_slice(&buf[..n]);
                    remaining -= n;
                }
            }
        }

        if response.is_empty() {
            return Ok(None);
        }

        // Assemble through the configured factory, reusing the header block
        // parsed above.
        let mut frame = self.create_frame()?;
        frame.set_command(wire_format::extract_command(&response)?);
        frame.set_headers(headers);
        frame.set_body(wire_format::extract_body(&response));
        Ok(Some(frame))
    }

    /// Poll for pending input without consuming it.
    ///
    /// Bounded at roughly 100 ms. Returns `false` when nothing arrives in
    /// that window, at end of stream, or on a closed connection.
    pub async fn can_read(&mut self) -> bool {
        let Some(socket) = self.socket.as_mut() else {
            return false;
        };
        match time::timeout(CAN_READ_POLL, socket.fill_buf()).await {
            Ok(Ok(buf)) => !buf.is_empty(),
            Ok(Err(_)) | Err(_) => false,
        }
    }

    /// Close the connection.
    ///
    /// A graceful close first sends a DISCONNECT frame best-effort; send
    /// failures are logged and swallowed, never surfaced. A non-graceful
    /// close performs no network I/O. Idempotent: closing a closed
    /// connection is a no-op.
    pub async fn close(&mut self, graceful: bool) {
        if graceful && self.socket.is_some() {
            match self.create_frame() {
                Ok(mut frame) => {
                    frame.set_command(Command::Disconnect);
                    if let Err(e) = self.write(&*frame).await {
                        tracing::debug!("disconnect frame not sent during close: {}", e);
                    }
                }
                Err(e) => {
                    tracing::debug!("no disconnect frame during close: {}", e);
                }
            }
        }
        if self.socket.take().is_some() {
            tracing::debug!("connection closed");
        }
    }

    /// Build an empty frame via the configured factory.
    ///
    /// The factory must produce an empty frame (no command, no headers,
    /// empty body); anything else fails with a logic error.
    pub fn create_frame(&self) -> Result<Box<dyn StompFrame>> {
        let frame = self.options.frame_factory.create();
        if frame.command().is_some() || !frame.headers().is_empty() || !frame.body().is_empty() {
            return Err(StompError::Logic(
                "frame factory must produce an empty frame".to_string(),
            ));
        }
        Ok(frame)
    }

    fn socket_mut(&mut self) -> Result<&mut BufReader<Socket>> {
        self.socket
            .as_mut()
            .ok_or_else(|| StompError::Connection(NOT_CONNECTED.to_string()))
    }

    /// Read one `\n`-terminated line (or the final unterminated bytes)
    /// into `buf`. Returns 0 at end of stream.
    async fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<usize> {
        let wait = self.options.read_timeout();
        let socket = self.socket_mut()?;
        let result = time::timeout(wait, socket.read_until(LINE_DELIMITER, buf)).await;
        self.classify_read(result).await
    }

    /// Read up to `buf.len()` bytes of a declared-length body. Returns 0 at
    /// end of stream; a single read may return fewer bytes than requested.
    async fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
        let wait = self.options.read_timeout();
        let socket = self.socket_mut()?;
        let result = time::timeout(wait, socket.read(buf)).await;
        self.classify_read(result).await
    }

    /// Classify a bounded read: success, timeout (close + connection
    /// error), or I/O failure. End-of-stream arrives here as `Ok(0)` and is
    /// left for the caller to treat as a normal stop.
    async fn classify_read(
        &mut self,
        result: std::result::Result<io::Result<usize>, time::error::Elapsed>,
    ) -> Result<usize> {
        match result {
            Ok(Ok(n)) => Ok(n),
            Ok(Err(e))
                if e.kind() == io::ErrorKind::TimedOut
                    || e.kind() == io::ErrorKind::WouldBlock =>
            {
                self.timed_out().await
            }
            Ok(Err(e)) => Err(StompError::Io(e)),
            Err(_) => self.timed_out().await,
        }
    }

    async fn timed_out<T>(&mut self) -> Result<T> {
        tracing::warn!(
            "read timed out after {} seconds, closing connection",
            self.options.timeout_sec
        );
        self.close(false).await;
        Err(StompError::Connection(format!(
            "read timed out after {} seconds",
            self.options.timeout_sec
        )))
    }
}

/// A line that is empty after trimming ends the command/header block.
fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}
