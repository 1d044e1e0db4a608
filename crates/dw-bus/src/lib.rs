//! # DataWedge Bus
//!
//! The broadcast side of the bridge.
//!
//! ```text
//! ┌──────────────┐   publish()    ┌──────────────┐   subscribe()   ┌──────────────┐
//! │  Dispatcher  │ ─────────────▶ │ Intent Bus   │ ──────────────▶ │  Subscriber  │
//! └──────────────┘                └──────────────┘                 └──────────────┘
//! ```
//!
//! - [`Transport`]: the outbound port the dispatch engine publishes through.
//! - [`InMemoryBus`]: a `tokio::sync::broadcast` implementation used for
//!   local wiring and tests. Delivery is fire-and-forget, exactly like the
//!   platform broadcast it stands in for.
//! - [`Subscription`] / [`MessageStream`]: the receiving side, filtered by
//!   topic.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod publisher;
pub mod subscriber;
pub mod transport;

pub use publisher::InMemoryBus;
pub use subscriber::{MessageStream, Subscription, SubscriptionError, TopicFilter};
pub use transport::{InboundMessage, Transport, TransportError};

/// Maximum messages to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
