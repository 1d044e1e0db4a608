//! # Lifecycle Flows
//!
//! Shutdown, expiry of commands DataWedge never answers, and startup
//! plumbing.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dw_dispatch::{CommandError, CommandKind, DispatchConfig, OutboundCommand};
    use dw_telemetry::TelemetryConfig;

    use crate::simulator::{eventually, Bridge};

    #[tokio::test]
    async fn test_shutdown_leaves_pending_calls_without_outcome() {
        let bridge = Bridge::start().unwrap();
        bridge.datawedge.hold_responses();

        let first = bridge
            .facade
            .send_command(OutboundCommand::text(CommandKind::CreateProfile, "A"));
        let second = bridge
            .facade
            .send_command(OutboundCommand::text(CommandKind::SoftScanTrigger, "START_SCANNING"));
        assert!(eventually(|| bridge.datawedge.received_count() == 2).await);

        bridge.facade.shutdown();
        assert_eq!(first.await, Err(CommandError::Abandoned));
        assert_eq!(second.await, Err(CommandError::Abandoned));

        // The late results now match nothing.
        assert_eq!(bridge.datawedge.release_reversed(), 2);
        assert!(eventually(|| bridge.facade.stats().unmatched == 2).await);
        assert_eq!(bridge.facade.stats().resolved, 0);
    }

    #[tokio::test]
    async fn test_commands_after_shutdown_never_reach_the_bus() {
        let bridge = Bridge::start().unwrap();
        bridge.facade.shutdown();

        assert_eq!(
            bridge.api.create_profile("Inventory").await,
            Err(CommandError::Closed)
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(bridge.datawedge.received_count(), 0);
    }

    #[tokio::test]
    async fn test_notification_registration_reclaimed_by_sweep() {
        let bridge = Bridge::with_config(
            DispatchConfig::for_package(Bridge::PACKAGE)
                .with_pending_ttl(Some(Duration::from_secs(300))),
        )
        .unwrap();

        bridge.api.register_for_notifications().unwrap();
        assert!(eventually(|| bridge.datawedge.received_count() == 1).await);
        let received = bridge.datawedge.received();
        assert_eq!(received[0].1.kind, CommandKind::RegisterForNotification);

        // The handle was dropped immediately, so the first sweep reclaims it.
        assert_eq!(bridge.facade.sweep_expired(), 1);
        assert_eq!(bridge.facade.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_unanswered_command_expires() {
        let bridge = Bridge::with_config(
            DispatchConfig::for_package(Bridge::PACKAGE)
                .with_pending_ttl(Some(Duration::from_secs(300))),
        )
        .unwrap();
        bridge.datawedge.hold_responses();

        let mut handle = bridge
            .facade
            .send_command(OutboundCommand::text(CommandKind::CreateProfile, "Slow"));
        assert!(eventually(|| bridge.datawedge.received_count() == 1).await);

        bridge.clock.advance(Duration::from_secs(299));
        assert_eq!(bridge.facade.sweep_expired(), 0);
        assert!(handle.try_outcome().is_none());

        bridge.clock.advance(Duration::from_secs(2));
        assert_eq!(bridge.facade.sweep_expired(), 1);
        assert_eq!(handle.try_outcome(), Some(Err(CommandError::Abandoned)));
        assert_eq!(bridge.facade.stats().expired, 1);
    }

    #[test]
    fn test_telemetry_config_defaults() {
        let config = TelemetryConfig::default();
        assert!(!config.service_name.is_empty());
        assert!(!config.log_level.is_empty());
    }
}
