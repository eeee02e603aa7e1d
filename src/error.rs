//! Error types for stompwire.

use thiserror::Error;

/// Main error type for all stompwire operations.
#[derive(Debug, Error)]
pub enum StompError {
    /// I/O error outside an established read/write path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection failure: could not open the socket, socket handle absent,
    /// or a read timed out (which also closes the connection).
    #[error("connection error: {0}")]
    Connection(String),

    /// A write to an established socket failed or wrote nothing.
    /// Fatal for the connection; never retried.
    #[error("write error: {0}")]
    Write(String),

    /// The configured frame factory does not satisfy the frame contract.
    #[error("logic error: {0}")]
    Logic(String),

    /// Malformed wire data (empty command line, unknown verb, header line
    /// without a colon, bad content-length value).
    #[error("decode error: {0}")]
    Decode(String),
}

/// Result type alias using StompError.
pub type Result<T> = std::result::Result<T, StompError>;
