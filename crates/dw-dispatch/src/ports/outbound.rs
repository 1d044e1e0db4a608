//! Outbound Ports (Driven Ports)
//!
//! What the dispatcher needs from its host: a transport to publish
//! commands on, a sink for unsolicited events, and a clock.

use dw_types::{ScanEvent, StatusChangeEvent};
use parking_lot::Mutex;
use std::time::{Duration, Instant};

pub use dw_bus::Transport;

/// Unsolicited event handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsolicitedEvent {
    Scan(ScanEvent),
    StatusChange(StatusChangeEvent),
    ProfileChanged { profile_name: Option<String> },
    ConfigUpdated,
}

/// Receiver of unsolicited events.
///
/// Called from the inbound path; implementations should hand the event off
/// rather than block.
pub trait EventSink: Send + Sync {
    fn deliver_scan_event(&self, event: ScanEvent);

    fn deliver_status_change(&self, event: StatusChangeEvent);

    fn notify_profile_changed(&self, profile_name: Option<String>);

    fn notify_config_updated(&self);
}

/// Monotonic time source for testability
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// System clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}
