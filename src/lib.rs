//! # stompwire
//!
//! Transport-layer client for the STOMP text-based messaging protocol:
//! opens a socket to a broker, serializes outbound frames onto the wire,
//! and parses inbound bytes back into frames.
//!
//! ## Architecture
//!
//! - **Wire codec** ([`protocol::wire_format`]): pure encode/decode between
//!   a structured frame (command, ordered headers, body bytes) and the
//!   wire byte format. Never performs I/O.
//! - **Connection** ([`Connection`]): owns one socket; writes encoded
//!   frames and incrementally reads frames back, switching between
//!   terminator-delimited and `content-length`-delimited body reads. Owns
//!   the timeout configuration and graceful shutdown.
//! - **Client facade** ([`Client`]): holds at most one connection and
//!   forwards send/receive/poll/close to it.
//!
//! One logical caller per connection: every operation takes `&mut self`,
//! there is no internal concurrency, and failures are surfaced rather than
//! recovered from. Retry policy belongs to the caller.
//!
//! ## Example
//!
//! ```ignore
//! use stompwire::protocol::Command;
//! use stompwire::{Client, ConnectionOptions, Scheme};
//!
//! #[tokio::main]
//! async fn main() -> stompwire::Result<()> {
//!     let mut client =
//!         Client::connect(Scheme::Tcp, "localhost", 61613, ConnectionOptions::default())
//!             .await?;
//!
//!     let mut frame = client.create_frame()?;
//!     frame.set_command(Command::Connect);
//!     frame.set_header("login", "guest");
//!
//!     // Fluent form on the connection: write, then read the reply.
//!     if let Some(connection) = client.connection_mut() {
//!         let reply = connection.write(&*frame).await?.read().await?;
//!         println!("broker replied: {:?}", reply.map(|f| f.command()));
//!     }
//!     client.close(true).await;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod protocol;
pub mod transport;

mod client;
mod connection;

pub use client::Client;
pub use connection::{
    Connection, ConnectionOptions, READ_TIMEOUT_DEFAULT_SEC, READ_TIMEOUT_DEFAULT_USEC,
};
pub use error::{Result, StompError};
pub use protocol::{Command, Frame, FrameFactory, StompFrame};
pub use transport::Scheme;
