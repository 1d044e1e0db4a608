//! Inbound Ports (Driving Ports)

use dw_types::Bundle;

/// Entry point for messages arriving from the bus.
///
/// Implementations must not fail or panic back into the transport: a
/// message that cannot be handled is logged and dropped.
pub trait InboundHandler: Send + Sync {
    fn on_inbound_message(&self, topic: &str, payload: &Bundle);
}
