//! STOMP command verbs.
//!
//! Every frame starts with one verb from a fixed set. Client frames
//! (CONNECT, SEND, SUBSCRIBE, ...) travel to the broker; server frames
//! (CONNECTED, MESSAGE, RECEIPT, ERROR) travel back. The wire encoding is
//! the uppercase ASCII name followed by a line delimiter.

use std::fmt;
use std::str::FromStr;

use crate::error::StompError;

/// A STOMP command verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Open a session with the broker.
    Connect,
    /// Broker reply to CONNECT.
    Connected,
    /// Deliver a message to a destination.
    Send,
    /// Register interest in a destination.
    Subscribe,
    /// Remove a subscription.
    Unsubscribe,
    /// Start a transaction.
    Begin,
    /// Commit a transaction.
    Commit,
    /// Roll back a transaction.
    Abort,
    /// Acknowledge a consumed message.
    Ack,
    /// Reject a consumed message.
    Nack,
    /// Close the session gracefully.
    Disconnect,
    /// Broker delivery of a message to a subscriber.
    Message,
    /// Broker confirmation of a receipt-requested frame.
    Receipt,
    /// Broker-side failure report.
    Error,
}

impl Command {
    /// The wire name of this verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Connect => "CONNECT",
            Command::Connected => "CONNECTED",
            Command::Send => "SEND",
            Command::Subscribe => "SUBSCRIBE",
            Command::Unsubscribe => "UNSUBSCRIBE",
            Command::Begin => "BEGIN",
            Command::Commit => "COMMIT",
            Command::Abort => "ABORT",
            Command::Ack => "ACK",
            Command::Nack => "NACK",
            Command::Disconnect => "DISCONNECT",
            Command::Message => "MESSAGE",
            Command::Receipt => "RECEIPT",
            Command::Error => "ERROR",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = StompError;

    /// Parse a wire verb. Unknown verbs are a decode error; the command set
    /// is fixed by the protocol.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONNECT" => Ok(Command::Connect),
            "CONNECTED" => Ok(Command::Connected),
            "SEND" => Ok(Command::Send),
            "SUBSCRIBE" => Ok(Command::Subscribe),
            "UNSUBSCRIBE" => Ok(Command::Unsubscribe),
            "BEGIN" => Ok(Command::Begin),
            "COMMIT" => Ok(Command::Commit),
            "ABORT" => Ok(Command::Abort),
            "ACK" => Ok(Command::Ack),
            "NACK" => Ok(Command::Nack),
            "DISCONNECT" => Ok(Command::Disconnect),
            "MESSAGE" => Ok(Command::Message),
            "RECEIPT" => Ok(Command::Receipt),
            "ERROR" => Ok(Command::Error),
            other => Err(StompError::Decode(format!(
                "unknown command verb: {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[Command] = &[
        Command::Connect,
        Command::Connected,
        Command::Send,
        Command::Subscribe,
        Command::Unsubscribe,
        Command::Begin,
        Command::Commit,
        Command::Abort,
        Command::Ack,
        Command::Nack,
        Command::Disconnect,
        Command::Message,
        Command::Receipt,
        Command::Error,
    ];

    #[test]
    fn test_wire_name_roundtrip() {
        for &command in ALL {
            let parsed: Command = command.as_str().parse().unwrap();
            assert_eq!(parsed, command);
        }
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(Command::Message.to_string(), "MESSAGE");
        assert_eq!(format!("{}", Command::Disconnect), "DISCONNECT");
    }

    #[test]
    fn test_unknown_verb_rejected() {
        let result = "FETCH".parse::<Command>();
        assert!(matches!(result, Err(StompError::Decode(_))));
    }

    #[test]
    fn test_lowercase_verb_rejected() {
        // Verbs are uppercase on the wire; no case folding.
        assert!("connect".parse::<Command>().is_err());
    }
}
