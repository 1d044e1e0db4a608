//! Dispatch counters.
//!
//! Thread-safe counters for the outbound and inbound paths. Registry
//! counters (resolved, expired, abandoned) live in
//! [`RegistryStats`](crate::domain::RegistryStats) and are merged into the
//! snapshot.

use crate::domain::RegistryStatsSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters owned by the dispatch facade
#[derive(Debug, Default)]
pub struct DispatchStats {
    /// Commands handed to the transport
    pub sent: AtomicU64,
    /// Commands that failed before or during publish
    pub send_failures: AtomicU64,
    /// Scan events delivered to the sink
    pub scan_events: AtomicU64,
    /// Status changes delivered to the sink
    pub status_changes: AtomicU64,
    /// Profile switch notifications delivered
    pub profile_changes: AtomicU64,
    /// Configuration update notifications delivered
    pub config_updates: AtomicU64,
    /// Notifications dropped by the time gate
    pub debounced: AtomicU64,
    /// Status notifications dropped by the value gate
    pub deduplicated: AtomicU64,
    /// Malformed or unrecognised inbound messages
    pub dropped: AtomicU64,
}

impl DispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Merge with the registry counters into one snapshot.
    pub fn snapshot(&self, registry: RegistryStatsSnapshot, pending: usize) -> DispatchStatsSnapshot {
        DispatchStatsSnapshot {
            sent: self.sent.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
            resolved: registry.resolved,
            unmatched: registry.unmatched,
            expired: registry.expired,
            abandoned: registry.abandoned,
            pending: pending as u64,
            scan_events: self.scan_events.load(Ordering::Relaxed),
            status_changes: self.status_changes.load(Ordering::Relaxed),
            profile_changes: self.profile_changes.load(Ordering::Relaxed),
            config_updates: self.config_updates.load(Ordering::Relaxed),
            debounced: self.debounced.load(Ordering::Relaxed),
            deduplicated: self.deduplicated.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of every dispatch counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStatsSnapshot {
    pub sent: u64,
    pub send_failures: u64,
    pub resolved: u64,
    pub unmatched: u64,
    pub expired: u64,
    pub abandoned: u64,
    /// Calls waiting for a result when the snapshot was taken
    pub pending: u64,
    pub scan_events: u64,
    pub status_changes: u64,
    pub profile_changes: u64,
    pub config_updates: u64,
    pub debounced: u64,
    pub deduplicated: u64,
    pub dropped: u64,
}
