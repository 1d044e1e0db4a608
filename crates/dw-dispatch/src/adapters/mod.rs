//! Adapters Layer
//!
//! - [`ChannelEventSink`]: unsolicited events into a tokio channel
//! - [`pump`]: drives a bus subscription into the dispatcher
//! - [`sweep`]: periodic expiry of unanswered commands

pub mod channel_sink;
pub mod pump;
pub mod sweep;

pub use channel_sink::ChannelEventSink;
pub use pump::spawn_pump;
pub use sweep::spawn_expiry_sweep;
