//! Channel-backed event sink.

use crate::ports::{EventSink, UnsolicitedEvent};
use dw_types::{ScanEvent, StatusChangeEvent};
use tokio::sync::mpsc;
use tracing::warn;

/// Default number of events buffered before new ones are dropped.
pub const DEFAULT_EVENT_BUFFER: usize = 256;

/// Forwards unsolicited events into a bounded mpsc channel.
///
/// The inbound path must never block, so a full or closed channel drops
/// the event with a warning.
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    sender: mpsc::Sender<UnsolicitedEvent>,
}

impl ChannelEventSink {
    /// Create a sink and the receiver the host reads events from.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<UnsolicitedEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    fn forward(&self, event: UnsolicitedEvent) {
        if let Err(err) = self.sender.try_send(event) {
            let (reason, event) = match err {
                mpsc::error::TrySendError::Full(event) => ("full", event),
                mpsc::error::TrySendError::Closed(event) => ("closed", event),
            };
            warn!(reason, event = ?event, "Dropping unsolicited event");
        }
    }
}

impl Default for ChannelEventSink {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER).0
    }
}

impl EventSink for ChannelEventSink {
    fn deliver_scan_event(&self, event: ScanEvent) {
        self.forward(UnsolicitedEvent::Scan(event));
    }

    fn deliver_status_change(&self, event: StatusChangeEvent) {
        self.forward(UnsolicitedEvent::StatusChange(event));
    }

    fn notify_profile_changed(&self, profile_name: Option<String>) {
        self.forward(UnsolicitedEvent::ProfileChanged { profile_name });
    }

    fn notify_config_updated(&self) {
        self.forward(UnsolicitedEvent::ConfigUpdated);
    }
}
