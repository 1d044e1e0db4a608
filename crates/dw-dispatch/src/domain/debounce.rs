//! Notification debounce and status de-duplication.
//!
//! Two gates, evaluated in order under a single lock:
//!
//! 1. **Time gate**: a notification arriving less than `window` after the
//!    previously *accepted* one is dropped and changes nothing.
//! 2. **Value gate**: a scanner status equal to the last remembered status
//!    is dropped; otherwise it becomes the remembered status.
//!
//! The remembered status only moves when a message passes the time gate,
//! so a state flap inside the window is never observed.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Default window between accepted notifications.
pub const DEFAULT_STATUS_DEBOUNCE: Duration = Duration::from_secs(20);

/// Verdict for one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    /// Dropped by the time gate.
    Debounced,
    /// Dropped by the value gate.
    Duplicate,
}

#[derive(Debug, Default)]
struct DebounceState {
    last_accepted_at: Option<Instant>,
    last_status: Option<String>,
}

/// Debounce/dedup filter for the notification topic.
#[derive(Debug)]
pub struct StatusDebouncer {
    window: Duration,
    state: Mutex<DebounceState>,
}

impl StatusDebouncer {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: Mutex::new(DebounceState::default()),
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Run both gates for one notification arriving at `now`.
    ///
    /// `status` is the raw scanner status for `SCANNER_STATUS`
    /// notifications and `None` for every other notification, which then
    /// only passes through the time gate.
    pub fn admit(&self, now: Instant, status: Option<&str>) -> Admission {
        let mut state = self.state.lock();

        if let Some(last) = state.last_accepted_at {
            if now.saturating_duration_since(last) < self.window {
                return Admission::Debounced;
            }
        }
        state.last_accepted_at = Some(now);

        let Some(status) = status else {
            return Admission::Accepted;
        };

        if state.last_status.as_deref() == Some(status) {
            return Admission::Duplicate;
        }
        state.last_status = Some(status.to_string());
        Admission::Accepted
    }

    /// Last status that passed both gates.
    #[must_use]
    pub fn last_status(&self) -> Option<String> {
        self.state.lock().last_status.clone()
    }

    /// Forget all history.
    pub fn reset(&self) {
        *self.state.lock() = DebounceState::default();
    }
}

impl Default for StatusDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_DEBOUNCE)
    }
}
