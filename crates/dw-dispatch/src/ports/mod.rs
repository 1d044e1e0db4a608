//! Ports Layer
//!
//! - Driving Port (inbound): [`InboundHandler`], fed by the bus
//! - Driven Ports (outbound): [`Transport`], [`EventSink`], [`Clock`]

pub mod inbound;
pub mod outbound;

pub use inbound::InboundHandler;
pub use outbound::{Clock, EventSink, ManualClock, SystemClock, Transport, UnsolicitedEvent};
