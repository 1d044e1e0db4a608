//! # Subscriber
//!
//! Receiving side of the in-memory bus.

use crate::transport::InboundMessage;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The bus was dropped.
    #[error("Bus closed")]
    Closed,
}

/// Topic filter; an empty topic list matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFilter {
    pub topics: Vec<String>,
}

impl TopicFilter {
    /// Match every topic.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Match only the given topics.
    pub fn topics<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            topics: topics.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `message` passes the filter.
    #[must_use]
    pub fn matches(&self, message: &InboundMessage) -> bool {
        self.topics.is_empty() || self.topics.iter().any(|t| *t == message.topic)
    }
}

/// A subscription handle for receiving messages.
pub struct Subscription {
    receiver: broadcast::Receiver<InboundMessage>,
    filter: TopicFilter,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<InboundMessage>, filter: TopicFilter) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next matching message.
    ///
    /// Returns `None` once the bus has been dropped.
    pub async fn recv(&mut self) -> Option<InboundMessage> {
        loop {
            let message = match self.receiver.recv().await {
                Ok(m) => m,
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Subscriber lagged, some messages dropped");
                    continue;
                }
            };

            if self.filter.matches(&message) {
                return Some(message);
            }
        }
    }

    /// Receive the next matching message without waiting.
    ///
    /// `Ok(None)` means nothing is queued right now.
    pub fn try_recv(&mut self) -> Result<Option<InboundMessage>, SubscriptionError> {
        loop {
            let message = match self.receiver.try_recv() {
                Ok(m) => m,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            };

            if self.filter.matches(&message) {
                return Ok(Some(message));
            }
        }
    }

    /// Filter of this subscription.
    #[must_use]
    pub fn filter(&self) -> &TopicFilter {
        &self.filter
    }

    /// Turn the subscription into a `Stream`.
    #[must_use]
    pub fn into_stream(self) -> MessageStream {
        let filter = self.filter.clone();
        let stream = BroadcastStream::new(self.receiver).filter_map(move |item| match item {
            Ok(message) if filter.matches(&message) => Some(message),
            Ok(_) => None,
            Err(BroadcastStreamRecvError::Lagged(count)) => {
                debug!(lagged = count, "Stream lagged, some messages dropped");
                None
            }
        });
        MessageStream {
            inner: Box::pin(stream),
        }
    }
}

/// `Stream` of messages matching a subscription's filter.
pub struct MessageStream {
    inner: Pin<Box<dyn Stream<Item = InboundMessage> + Send>>,
}

impl Stream for MessageStream {
    type Item = InboundMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
