//! # Transport Port
//!
//! The only thing the dispatch engine knows about the bus.

use dw_types::Bundle;
use thiserror::Error;

/// Errors raised when handing a message to the bus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The bus has been shut down.
    #[error("Transport closed")]
    Closed,

    /// The bus refused the message.
    #[error("Transport rejected message: {0}")]
    Rejected(String),
}

/// A message as delivered by the bus: a topic (intent action) plus extras.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Bundle,
}

impl InboundMessage {
    /// Create a new message.
    pub fn new(topic: impl Into<String>, payload: Bundle) -> Self {
        Self {
            topic: topic.into(),
            payload,
        }
    }
}

/// Outbound side of the bus.
///
/// Publishing is fire-and-forget: `Ok(())` means the bus accepted the
/// message, not that anyone received it.
pub trait Transport: Send + Sync {
    /// Broadcast `payload` on `topic`.
    fn publish(&self, topic: &str, payload: Bundle) -> Result<(), TransportError>;
}
