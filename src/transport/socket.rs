//! Broker endpoint scheme and socket abstraction.
//!
//! A [`Socket`] is one exclusively-owned duplex byte stream to the broker:
//!
//! - `tcp`: a connected [`TcpStream`]
//! - `udp`: a connected [`UdpSocket`] driven through `poll_recv`/`poll_send`
//!
//! Both variants present the same `AsyncRead`/`AsyncWrite` surface so the
//! connection layer never branches on the transport. UDP keeps datagram
//! boundaries; reads see whatever the peer sent per datagram.

use std::fmt;
use std::io;
use std::pin::Pin;
use std::str::FromStr;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::{TcpStream, UdpSocket};

use crate::error::StompError;

/// Transport scheme for a broker endpoint (`scheme://host:port`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Stream transport.
    Tcp,
    /// Connected datagram transport.
    Udp,
}

impl Scheme {
    /// The URI scheme name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Tcp => "tcp",
            Scheme::Udp => "udp",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = StompError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Scheme::Tcp),
            "udp" => Ok(Scheme::Udp),
            other => Err(StompError::Connection(format!(
                "unsupported scheme: {:?}",
                other
            ))),
        }
    }
}

/// A connected duplex byte stream to a broker.
#[derive(Debug)]
pub enum Socket {
    /// TCP stream.
    Tcp(TcpStream),
    /// Connected UDP socket.
    Udp(UdpSocket),
}

impl Socket {
    /// Connect to `host:port` over the given scheme.
    pub async fn connect(scheme: Scheme, host: &str, port: u16) -> io::Result<Self> {
        match scheme {
            Scheme::Tcp => Ok(Socket::Tcp(TcpStream::connect((host, port)).await?)),
            Scheme::Udp => {
                let socket = UdpSocket::bind("0.0.0.0:0").await?;
                socket.connect((host, port)).await?;
                Ok(Socket::Udp(socket))
            }
        }
    }
}

impl AsyncRead for Socket {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Socket::Tcp(stream) => Pin::new(stream).poll_read(cx, buf),
            Socket::Udp(socket) => socket.poll_recv(cx, buf),
        }
    }
}

impl AsyncWrite for Socket {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            Socket::Tcp(stream) => Pin::new(stream).poll_write(cx, buf),
            Socket::Udp(socket) => socket.poll_send(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Socket::Tcp(stream) => Pin::new(stream).poll_flush(cx),
            // Datagrams are sent immediately; nothing to flush.
            Socket::Udp(_) => Poll::Ready(Ok(())),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Socket::Tcp(stream) => Pin::new(stream).poll_shutdown(cx),
            Socket::Udp(_) => Poll::Ready(Ok(())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_parse() {
        assert_eq!("tcp".parse::<Scheme>().unwrap(), Scheme::Tcp);
        assert_eq!("udp".parse::<Scheme>().unwrap(), Scheme::Udp);
    }

    #[test]
    fn test_scheme_unsupported() {
        let result = "ssl".parse::<Scheme>();
        assert!(matches!(result, Err(StompError::Connection(_))));
    }

    #[test]
    fn test_scheme_display() {
        assert_eq!(Scheme::Tcp.to_string(), "tcp");
        assert_eq!(Scheme::Udp.to_string(), "udp");
    }
}
