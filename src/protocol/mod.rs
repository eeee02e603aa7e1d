//! Protocol module - commands, headers, frames, and the wire codec.
//!
//! Everything here is pure data and byte manipulation:
//! - [`Command`] - the fixed set of STOMP verbs
//! - [`Headers`] - insertion-ordered header map
//! - [`Frame`] / [`StompFrame`] / [`FrameFactory`] - the frame contract
//! - [`wire_format`] - encoding/decoding between frame parts and wire bytes

mod command;
mod frame;
mod headers;
pub mod wire_format;

pub use command::Command;
pub use frame::{DefaultFrameFactory, Frame, FrameFactory, StompFrame};
pub use headers::Headers;
pub use wire_format::{CONTENT_LENGTH, END_OF_FRAME, LINE_DELIMITER, TERMINATOR};
