//! # In-Memory Bus
//!
//! Publishing side of the in-process intent bus.

use crate::subscriber::{MessageStream, Subscription, TopicFilter};
use crate::transport::{InboundMessage, Transport, TransportError};
use crate::DEFAULT_CHANNEL_CAPACITY;
use dw_types::Bundle;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// In-memory implementation of the intent bus.
///
/// Uses `tokio::sync::broadcast` for multi-producer, multi-consumer
/// semantics. A message published with no subscribers is dropped, which is
/// the same guarantee (none) the platform broadcast gives.
pub struct InMemoryBus {
    /// Broadcast sender for messages.
    sender: broadcast::Sender<InboundMessage>,

    /// Total messages accepted.
    messages_published: AtomicU64,

    /// Set once `close()` has been called.
    closed: AtomicBool,

    /// Channel capacity.
    capacity: usize,
}

impl InMemoryBus {
    /// Create a new bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new bus with the given per-subscriber capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            messages_published: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            capacity,
        }
    }

    /// Subscribe to messages matching a filter.
    #[must_use]
    pub fn subscribe(&self, filter: TopicFilter) -> Subscription {
        debug!(topics = ?filter.topics, "New subscription created");
        Subscription::new(self.sender.subscribe(), filter)
    }

    /// Convenience wrapper returning a `Stream` of matching messages.
    #[must_use]
    pub fn message_stream(&self, filter: TopicFilter) -> MessageStream {
        self.subscribe(filter).into_stream()
    }

    /// Refuse all further publishes.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Whether `close()` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Total messages accepted by `publish`.
    #[must_use]
    pub fn messages_published(&self) -> u64 {
        self.messages_published.load(Ordering::Relaxed)
    }

    /// Channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for InMemoryBus {
    fn publish(&self, topic: &str, payload: Bundle) -> Result<(), TransportError> {
        if self.is_closed() {
            return Err(TransportError::Closed);
        }

        self.messages_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(InboundMessage::new(topic, payload)) {
            Ok(receivers) => {
                debug!(topic, receivers, "Message published");
            }
            Err(_) => {
                warn!(topic, "Message dropped (no receivers)");
            }
        }
        Ok(())
    }
}
