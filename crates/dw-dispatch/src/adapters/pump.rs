//! Bus → dispatcher pump.

use crate::ports::InboundHandler;
use dw_bus::Subscription;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tracing::{info, warn};

/// Feed every message of `subscription` into `handler`, one at a time.
///
/// Returns the number of messages handled once the bus goes away.
pub async fn run<H>(handler: Arc<H>, subscription: Subscription) -> u64
where
    H: InboundHandler + ?Sized,
{
    info!(topics = ?subscription.filter().topics, "Inbound pump started");

    let mut stream = subscription.into_stream();
    let mut handled = 0u64;

    while let Some(message) = stream.next().await {
        handler.on_inbound_message(&message.topic, &message.payload);
        handled += 1;
    }

    warn!(handled, "Bus stream ended, inbound pump stopping");
    handled
}

/// Spawn [`run`] on the current runtime.
pub fn spawn_pump<H>(handler: Arc<H>, subscription: Subscription) -> JoinHandle<u64>
where
    H: InboundHandler + ?Sized + 'static,
{
    tokio::spawn(run(handler, subscription))
}
