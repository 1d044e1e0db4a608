//! Periodic expiry of unanswered commands.

use crate::service::DispatchFacade;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Run [`DispatchFacade::sweep_expired`] every `interval` until the
/// dispatcher is shut down.
pub fn spawn_expiry_sweep(facade: Arc<DispatchFacade>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if facade.is_closed() {
                debug!("Dispatcher closed, stopping expiry sweep");
                break;
            }
            facade.sweep_expired();
        }
    })
}
