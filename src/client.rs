//! Client facade.
//!
//! [`Client`] holds at most one [`Connection`] and forwards every call to
//! it; all protocol and I/O logic lives in the connection and the wire
//! codec. Adding a connection while one is already held replaces it.
//!
//! # Example
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
//!     client.send(&*frame).await?;
//!
//!     if let Some(reply) = client.receive().await? {
//!         println!("broker replied: {:?}", reply.command());
//!     }
//!     client.close(true).await;
//!     Ok(())
//! }
//! ```

use crate::connection::{Connection, ConnectionOptions};
use crate::error::{Result, StompError};
use crate::protocol::StompFrame;
use crate::transport::Scheme;

const NO_CONNECTION: &str = "no connection added";

/// A STOMP client holding at most one connection.
#[derive(Debug, Default)]
pub struct Client {
    connection: Option<Connection>,
}

impl Client {
    /// Create a client with no connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect to a broker and return a client holding the connection.
    pub async fn connect(
        scheme: Scheme,
        host: &str,
        port: u16,
        options: ConnectionOptions,
    ) -> Result<Self> {
        let mut client = Self::new();
        client.add_connection(scheme, host, port, options).await?;
        Ok(client)
    }

    /// Construct and open a connection, storing it on success.
    ///
    /// On failure the partially opened connection is released before the
    /// error is surfaced. A connection added while one is already held
    /// replaces it.
    pub async fn add_connection(
        &mut self,
        scheme: Scheme,
        host: &str,
        port: u16,
        options: ConnectionOptions,
    ) -> Result<()> {
        let mut connection = Connection::new();
        match connection.open(scheme, host, port, options).await {
            Ok(()) => {
                self.connection = Some(connection);
                Ok(())
            }
            Err(e) => {
                connection.close(false).await;
                Err(e)
            }
        }
    }

    /// The held connection, if any.
    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    /// Mutable access to the held connection, if any.
    pub fn connection_mut(&mut self) -> Option<&mut Connection> {
        self.connection.as_mut()
    }

    /// Replace the held connection with an already-built one.
    pub fn set_connection(&mut self, connection: Connection) {
        self.connection = Some(connection);
    }

    /// Send a frame over the held connection.
    pub async fn send(&mut self, frame: &dyn StompFrame) -> Result<()> {
        self.held()?.write(frame).await?;
        Ok(())
    }

    /// Receive a frame; `Ok(None)` when no data is available.
    pub async fn receive(&mut self) -> Result<Option<Box<dyn StompFrame>>> {
        self.held()?.read().await
    }

    /// Whether input is pending on the held connection.
    pub async fn can_read(&mut self) -> bool {
        match self.connection.as_mut() {
            Some(connection) => connection.can_read().await,
            None => false,
        }
    }

    /// Build an empty frame via the connection's frame factory.
    pub fn create_frame(&self) -> Result<Box<dyn StompFrame>> {
        self.connection
            .as_ref()
            .ok_or_else(|| StompError::Connection(NO_CONNECTION.to_string()))?
            .create_frame()
    }

    /// Close and drop the held connection. No-op when none is held.
    pub async fn close(&mut self, graceful: bool) {
        if let Some(mut connection) = self.connection.take() {
            connection.close(graceful).await;
        }
    }

    fn held(&mut self) -> Result<&mut Connection> {
        self.connection
            .as_mut()
            .ok_or_else(|| StompError::Connection(NO_CONNECTION.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_has_no_connection() {
        let client = Client::new();
        assert!(client.connection().is_none());
    }

    #[test]
    fn test_create_frame_without_connection_fails() {
        let client = Client::new();
        assert!(matches!(
            client.create_frame(),
            Err(StompError::Connection(_))
        ));
    }

    #[tokio::test]
    async fn test_send_without_connection_fails() {
        let mut client = Client::new();
        let frame = crate::protocol::Frame::new();
        assert!(matches!(
            client.send(&frame).await,
            Err(StompError::Connection(_))
        ));
    }

    #[tokio::test]
    async fn test_can_read_without_connection_is_false() {
        let mut client = Client::new();
        assert!(!client.can_read().await);
    }

    #[tokio::test]
    async fn test_close_without_connection_is_noop() {
        let mut client = Client::new();
        client.close(true).await;
        client.close(false).await;
    }

    #[test]
    fn test_set_connection_stores_it() {
        let mut client = Client::new();
        client.set_connection(Connection::new());
        assert!(client.connection().is_some());
    }
}
