//! Transport module - broker endpoint schemes and socket handling.
//!
//! Provides abstraction over:
//! - TCP streams
//! - Connected UDP sockets

mod socket;

pub use socket::{Scheme, Socket};
